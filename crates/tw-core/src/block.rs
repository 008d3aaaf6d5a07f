use std::any::Any;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::world::World;

/// Identifier of a block registered in a [`World`].
///
/// One block may be attached to several exits (a door gates both sides),
/// so exits store ids rather than owning the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockId(pub Uuid);

impl BlockId {
    /// Generate a new random block ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A predicate gating travel along one directed exit.
///
/// `is_blocked` reads the world and nothing else: calling it twice with no
/// mutation in between gives the same answer.
pub trait Block: fmt::Debug {
    /// Short identifier, e.g. "guard block".
    fn name(&self) -> &str;

    /// Text shown to the player when the block refuses travel.
    fn description(&self) -> &str;

    /// True when travel along the gated exit is currently refused.
    fn is_blocked(&self, world: &World) -> bool;

    /// Downcast support for variants with extra capabilities.
    fn as_any(&self) -> &dyn Any;
}
