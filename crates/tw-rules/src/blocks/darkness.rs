use std::any::Any;

use tw_core::{Block, EntityId, World};

/// Too dark to pass unless someone at the location carries a lit light.
#[derive(Debug, Clone)]
pub struct DarknessBlock {
    /// The dark side of the exit.
    pub location: EntityId,
    /// Where the exit leads.
    pub connection: EntityId,
}

impl DarknessBlock {
    /// Darken the exit from `location` toward `connection`.
    pub fn new(location: EntityId, connection: EntityId) -> Self {
        Self {
            location,
            connection,
        }
    }

    fn lit(world: &World, character: EntityId) -> bool {
        world.inventory(character).is_ok_and(|inventory| {
            inventory
                .values()
                .any(|item| world.flag(*item, "is_lightable") && world.flag(*item, "is_lit"))
        })
    }
}

impl Block for DarknessBlock {
    fn name(&self) -> &str {
        "darkness block"
    }

    fn description(&self) -> &str {
        "It's too dark to go down the stairs safely."
    }

    // A location that no longer exists has no light in it.
    fn is_blocked(&self, world: &World) -> bool {
        !world.characters_at(self.location).is_ok_and(|present| {
            present
                .values()
                .any(|character| Self::lit(world, *character))
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
