use std::any::Any;

use serde::{Deserialize, Serialize};
use tracing::info;
use tw_core::{Block, BlockId, EntityId, EntityKind, World};

use super::direction;
use crate::error::RulesResult;

/// Blocks the exit while the door item is locked. A door that was never
/// given an `is_locked` flag counts as locked.
#[derive(Debug, Clone)]
pub struct LockedDoorBlock {
    /// Where the door stands.
    pub location: EntityId,
    /// The door item.
    pub door: EntityId,
    /// Where the exit leads.
    pub connection: EntityId,
}

impl LockedDoorBlock {
    /// Bind a door to the exit from `location` toward `connection`.
    pub fn new(location: EntityId, door: EntityId, connection: EntityId) -> Self {
        Self {
            location,
            door,
            connection,
        }
    }
}

impl Block for LockedDoorBlock {
    fn name(&self) -> &str {
        "locked door block"
    }

    fn description(&self) -> &str {
        "The door at the top is locked."
    }

    fn is_blocked(&self, world: &World) -> bool {
        world.flag_or(self.door, "is_locked", true)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A door between two locations that can be saved and restored.
///
/// Installing it puts the door item in both rooms and gates both
/// directions of the connection with the same block, so the door can be
/// found and unlocked from either side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockedDoor {
    /// The side the door was installed from.
    pub location: EntityId,
    /// The door item.
    pub door: EntityId,
    /// The other side.
    pub connection: EntityId,
}

/// Persisted form of a [`LockedDoor`]: every reference by entity name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedDoorRecord {
    /// Name of the location the door was installed from.
    pub location: String,
    /// Name of the door item.
    pub door: String,
    /// Name of the location on the other side.
    pub connection: String,
}

impl LockedDoorRecord {
    /// Encode as a flat JSON object.
    pub fn to_json(&self) -> RulesResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from a flat JSON object.
    pub fn from_json(json: &str) -> RulesResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl LockedDoor {
    /// Install a locked door on the connection between two locations.
    ///
    /// Places the door in both item sets, locks it, gives it an
    /// "unlock door" hint and attaches one shared block to both exits.
    pub fn install(
        world: &mut World,
        location: EntityId,
        door: EntityId,
        connection: EntityId,
    ) -> RulesResult<BlockId> {
        let forward = direction(world, location, connection)?;
        let back = direction(world, connection, location)?;

        world.add_item(location, door)?;
        world.add_item(connection, door)?;
        world.set_property(door, "is_locked", true)?;
        world.entity_mut(door)?.add_command_hint("unlock door");

        let id = world.insert_block(Box::new(Self {
            location,
            door,
            connection,
        }));
        world.attach_block(location, forward, id)?;
        world.attach_block(connection, back, id)?;
        info!(door = %world.label(door), %forward, %back, "installed locked door");
        Ok(id)
    }

    /// The locked door registered under `id`, if that block is one.
    pub fn find(world: &World, id: BlockId) -> Option<&LockedDoor> {
        world.block(id)?.as_any().downcast_ref::<LockedDoor>()
    }

    /// Swap live references for entity names.
    pub fn to_primitive(&self, world: &World) -> RulesResult<LockedDoorRecord> {
        Ok(LockedDoorRecord {
            location: world.name_of(self.location)?.to_string(),
            door: world.name_of(self.door)?.to_string(),
            connection: world.name_of(self.connection)?.to_string(),
        })
    }

    /// Resolve a record's names against the world.
    ///
    /// Nothing in the world changes; see [`LockedDoor::restore`] to
    /// register the result.
    pub fn from_primitive(record: &LockedDoorRecord, world: &World) -> RulesResult<Self> {
        Ok(Self {
            location: world.resolve_name(&record.location, EntityKind::Location)?,
            door: world.resolve_name(&record.door, EntityKind::Item)?,
            connection: world.resolve_name(&record.connection, EntityKind::Location)?,
        })
    }

    /// Re-register a saved door on both exits of a restored world.
    ///
    /// The restored graph already holds the door items and lock state, so
    /// none of the install side effects run again.
    pub fn restore(record: &LockedDoorRecord, world: &mut World) -> RulesResult<BlockId> {
        let door = Self::from_primitive(record, world)?;
        let forward = direction(world, door.location, door.connection)?;
        let back = direction(world, door.connection, door.location)?;
        let (location, connection) = (door.location, door.connection);

        let id = world.insert_block(Box::new(door));
        world.attach_block(location, forward, id)?;
        world.attach_block(connection, back, id)?;
        Ok(id)
    }
}

impl Block for LockedDoor {
    fn name(&self) -> &str {
        "locked door"
    }

    fn description(&self) -> &str {
        "The door is locked"
    }

    fn is_blocked(&self, world: &World) -> bool {
        world.flag(self.door, "is_locked")
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RulesError;
    use proptest::prelude::*;
    use tw_core::{Direction, Entity, WorldError, WorldMeta};

    struct Tower {
        world: World,
        courtyard: EntityId,
        stairs: EntityId,
        door: EntityId,
    }

    fn tower() -> Tower {
        let mut world = World::new(WorldMeta::new("Test Castle"));
        let courtyard = world
            .add_entity(Entity::new(EntityKind::Location, "courtyard"))
            .unwrap();
        let stairs = world
            .add_entity(Entity::new(EntityKind::Location, "tower stairs"))
            .unwrap();
        let door = world
            .add_entity(Entity::new(EntityKind::Item, "door"))
            .unwrap();
        world.connect_both(courtyard, Direction::Up, stairs).unwrap();
        Tower {
            world,
            courtyard,
            stairs,
            door,
        }
    }

    #[test]
    fn install_locks_and_gates_both_sides() {
        let mut t = tower();
        let id = LockedDoor::install(&mut t.world, t.courtyard, t.door, t.stairs).unwrap();

        assert!(t.world.here(t.courtyard, t.door));
        assert!(t.world.here(t.stairs, t.door));
        assert!(t.world.flag(t.door, "is_locked"));
        assert_eq!(
            t.world.entity(t.door).unwrap().command_hints,
            vec!["unlock door".to_string()]
        );

        let up = t.world.blocking(t.courtyard, Direction::Up).unwrap();
        let down = t.world.blocking(t.stairs, Direction::Down).unwrap();
        assert_eq!(up.name(), "locked door");
        assert_eq!(down.description(), "The door is locked");
        assert!(LockedDoor::find(&t.world, id).is_some());

        t.world.set_property(t.door, "is_locked", false).unwrap();
        assert!(t.world.blocking(t.courtyard, Direction::Up).is_none());
        assert!(t.world.blocking(t.stairs, Direction::Down).is_none());
    }

    #[test]
    fn install_needs_both_directions() {
        let mut t = tower();
        let cellar = t
            .world
            .add_entity(Entity::new(EntityKind::Location, "cellar"))
            .unwrap();
        t.world.connect(t.courtyard, Direction::Down, cellar).unwrap();

        let err = LockedDoor::install(&mut t.world, t.courtyard, t.door, cellar).unwrap_err();
        assert!(matches!(
            err,
            RulesError::World(WorldError::NoConnection { .. })
        ));
        assert!(!t.world.here(t.courtyard, t.door));
    }

    #[test]
    fn unset_lock_differs_between_door_kinds() {
        let t = tower();
        let stateful = LockedDoor {
            location: t.courtyard,
            door: t.door,
            connection: t.stairs,
        };
        let plain = LockedDoorBlock::new(t.courtyard, t.door, t.stairs);
        assert!(!stateful.is_blocked(&t.world));
        assert!(plain.is_blocked(&t.world));
    }

    #[test]
    fn find_ignores_other_blocks() {
        let mut t = tower();
        let plain = LockedDoorBlock::new(t.courtyard, t.door, t.stairs);
        let id = crate::blocks::attach(&mut t.world, t.courtyard, t.stairs, Box::new(plain)).unwrap();
        assert!(LockedDoor::find(&t.world, id).is_none());
    }

    #[test]
    fn record_json_shape() {
        let mut t = tower();
        let id = LockedDoor::install(&mut t.world, t.courtyard, t.door, t.stairs).unwrap();
        let record = LockedDoor::find(&t.world, id)
            .unwrap()
            .to_primitive(&t.world)
            .unwrap();
        let json = record.to_json().unwrap();
        insta::assert_snapshot!(json, @r#"{"location":"courtyard","door":"door","connection":"tower stairs"}"#);
        assert_eq!(LockedDoorRecord::from_json(&json).unwrap(), record);
    }

    #[test]
    fn from_primitive_rejects_unknown_names() {
        let t = tower();
        let record = LockedDoorRecord {
            location: "courtyard".to_string(),
            door: "portcullis".to_string(),
            connection: "tower stairs".to_string(),
        };
        let err = LockedDoor::from_primitive(&record, &t.world).unwrap_err();
        assert!(matches!(
            err,
            RulesError::World(WorldError::InvalidReference { .. })
        ));
    }

    #[test]
    fn from_primitive_checks_kinds() {
        let t = tower();
        let record = LockedDoorRecord {
            location: "door".to_string(),
            door: "courtyard".to_string(),
            connection: "tower stairs".to_string(),
        };
        assert!(LockedDoor::from_primitive(&record, &t.world).is_err());
    }

    #[test]
    fn restore_reattaches_without_relocking() {
        let mut saved = tower();
        let id = LockedDoor::install(&mut saved.world, saved.courtyard, saved.door, saved.stairs)
            .unwrap();
        let record = LockedDoor::find(&saved.world, id)
            .unwrap()
            .to_primitive(&saved.world)
            .unwrap();

        // The reloaded graph: door already placed, already unlocked.
        let mut t = tower();
        t.world.add_item(t.courtyard, t.door).unwrap();
        t.world.add_item(t.stairs, t.door).unwrap();
        t.world.set_property(t.door, "is_locked", false).unwrap();

        let id = LockedDoor::restore(&record, &mut t.world).unwrap();
        assert!(!t.world.flag(t.door, "is_locked"));
        assert!(t.world.entity(t.door).unwrap().command_hints.is_empty());
        assert_eq!(t.world.blocks_on(t.courtyard, Direction::Up).len(), 1);
        assert_eq!(t.world.blocks_on(t.stairs, Direction::Down).len(), 1);
        assert!(t.world.blocking(t.courtyard, Direction::Up).is_none());

        t.world.set_property(t.door, "is_locked", true).unwrap();
        assert!(t.world.blocking(t.stairs, Direction::Down).is_some());
        assert_eq!(
            LockedDoor::find(&t.world, id).unwrap(),
            &LockedDoor {
                location: t.courtyard,
                door: t.door,
                connection: t.stairs,
            }
        );
    }

    proptest! {
        #[test]
        fn round_trip_preserves_blocking(
            locked in proptest::option::of(any::<bool>()),
            removed in any::<bool>(),
        ) {
            let mut t = tower();
            let id = LockedDoor::install(&mut t.world, t.courtyard, t.door, t.stairs).unwrap();
            match locked {
                Some(value) => t.world.set_property(t.door, "is_locked", value).unwrap(),
                None => {
                    t.world.entity_mut(t.door).unwrap().properties.remove("is_locked");
                }
            }
            if removed {
                t.world.remove_item(t.courtyard, t.door).unwrap();
            }

            let original = LockedDoor::find(&t.world, id).unwrap().clone();
            let record = original.to_primitive(&t.world).unwrap();
            let rebuilt = LockedDoor::from_primitive(&record, &t.world).unwrap();

            prop_assert_eq!(&rebuilt, &original);
            let blocked = original.is_blocked(&t.world);
            prop_assert_eq!(blocked, original.is_blocked(&t.world));
            prop_assert_eq!(blocked, rebuilt.is_blocked(&t.world));
            prop_assert_eq!(blocked, locked == Some(true));
        }
    }
}
