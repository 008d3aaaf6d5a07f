use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::block::BlockId;
use crate::direction::Direction;
use crate::entity::{EntityId, EntityKind};

/// The set of typed components attached to an entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComponentSet {
    /// Containers and exits of a location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationComponent>,
    /// Position and inventory of a character.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character: Option<CharacterComponent>,
}

impl ComponentSet {
    /// The components an entity of `kind` starts with.
    pub fn for_kind(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Location => Self {
                location: Some(LocationComponent::default()),
                character: None,
            },
            EntityKind::Character => Self {
                location: None,
                character: Some(CharacterComponent::default()),
            },
            EntityKind::Item => Self::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// What a location holds, keyed by entity name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationComponent {
    /// Characters currently present.
    pub characters: BTreeMap<String, EntityId>,
    /// Items lying here.
    pub items: BTreeMap<String, EntityId>,
    /// Directed exits to other locations.
    pub exits: BTreeMap<Direction, Exit>,
}

/// One directed edge of the location graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exit {
    /// Where the exit leads.
    pub destination: EntityId,
    /// Blocks gating this edge, evaluated in attachment order.
    pub blocks: Vec<BlockId>,
}

impl Exit {
    /// An unblocked exit to `destination`.
    pub fn to(destination: EntityId) -> Self {
        Self {
            destination,
            blocks: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Character
// ---------------------------------------------------------------------------

/// Where a character stands and what it carries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CharacterComponent {
    /// Current location, if placed.
    pub location: Option<EntityId>,
    /// Carried items, keyed by name.
    pub inventory: BTreeMap<String, EntityId>,
}
