use std::any::Any;

use tw_core::{Block, EntityId, World};

/// Bars the way while a guard stands at the location, awake and alive.
#[derive(Debug, Clone)]
pub struct GuardBlock {
    /// Where the guard keeps watch.
    pub location: EntityId,
    /// The guarding character.
    pub guard: EntityId,
    /// The location the gated exit leads to.
    pub connection: EntityId,
}

impl GuardBlock {
    /// Bind a guard to the exit from `location` toward `connection`.
    pub fn new(location: EntityId, guard: EntityId, connection: EntityId) -> Self {
        Self {
            location,
            guard,
            connection,
        }
    }
}

impl Block for GuardBlock {
    fn name(&self) -> &str {
        "guard block"
    }

    fn description(&self) -> &str {
        "The castle guard bars your way. You'll need to deal with the guard first."
    }

    fn is_blocked(&self, world: &World) -> bool {
        world.here(self.location, self.guard)
            && !world.flag(self.guard, "is_unconscious")
            && !world.flag(self.guard, "is_dead")
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tw_core::{Entity, EntityKind, WorldMeta};

    fn gatehouse() -> (World, GuardBlock) {
        let mut world = World::new(WorldMeta::new("Test"));
        let gate = world
            .add_entity(Entity::new(EntityKind::Location, "gatehouse"))
            .unwrap();
        let yard = world
            .add_entity(Entity::new(EntityKind::Location, "yard"))
            .unwrap();
        let guard = world
            .add_entity(Entity::new(EntityKind::Character, "guard"))
            .unwrap();
        world.add_character(gate, guard).unwrap();
        (world, GuardBlock::new(gate, guard, yard))
    }

    #[test]
    fn awake_guard_blocks() {
        let (world, block) = gatehouse();
        assert!(block.is_blocked(&world));
    }

    #[test]
    fn subdued_guard_lets_pass() {
        for key in ["is_unconscious", "is_dead"] {
            let (mut world, block) = gatehouse();
            world.set_property(block.guard, key, true).unwrap();
            assert!(!block.is_blocked(&world), "{key}");
        }
    }

    #[test]
    fn absent_guard_lets_pass() {
        let (mut world, block) = gatehouse();
        world.remove_character(block.location, block.guard).unwrap();
        assert!(!block.is_blocked(&world));
    }

    proptest! {
        #[test]
        fn evaluation_is_idempotent(unconscious: bool, dead: bool, present: bool) {
            let (mut world, block) = gatehouse();
            world.set_property(block.guard, "is_unconscious", unconscious).unwrap();
            world.set_property(block.guard, "is_dead", dead).unwrap();
            if !present {
                world.remove_character(block.location, block.guard).unwrap();
            }
            let first = block.is_blocked(&world);
            prop_assert_eq!(first, block.is_blocked(&world));
            prop_assert_eq!(first, present && !unconscious && !dead);
        }
    }
}
