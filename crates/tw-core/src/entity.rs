use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::component::ComponentSet;
use crate::property::{Properties, PropertyValue};

/// Unique identifier for every entity in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Generate a new random entity ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// The kind of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A place characters and items can be in.
    Location,
    /// A person or creature; the player is one too.
    Character,
    /// A physical object held by a location or an inventory.
    Item,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Location => write!(f, "location"),
            Self::Character => write!(f, "character"),
            Self::Item => write!(f, "item"),
        }
    }
}

/// Core entity struct. Every world object is an Entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Unique identifier for this entity.
    pub id: EntityId,
    /// The kind (type) of this entity.
    pub kind: EntityKind,
    /// Display name of the entity, unique within the world.
    pub name: String,
    /// The property store rules read and write.
    pub properties: Properties,
    /// Commands a player can discover on this entity, e.g. "unlock door".
    pub command_hints: Vec<String>,
    /// Typed component data attached to this entity.
    pub components: ComponentSet,
    /// Timestamp when the entity was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp when the entity was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Entity {
    /// Create a new entity with a random ID and the component its kind needs.
    pub fn new(kind: EntityKind, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::new(),
            kind,
            name: name.into(),
            properties: Properties::new(),
            command_hints: Vec::new(),
            components: ComponentSet::for_kind(kind),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set a property (builder style).
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.set(key, value);
        self
    }

    /// Get a property value, if set.
    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Set a property and bump the modification timestamp.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.set(key, value);
        self.updated_at = Utc::now();
    }

    /// Attach a discoverable command hint, ignoring duplicates.
    pub fn add_command_hint(&mut self, hint: impl Into<String>) {
        let hint = hint.into();
        if !self.command_hints.contains(&hint) {
            self.command_hints.push(hint);
        }
    }
}
