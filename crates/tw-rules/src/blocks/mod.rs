//! Concrete blocks gating travel between locations.
//!
//! Each block binds one directed connection, `location -> connection`, and
//! answers [`Block::is_blocked`] from the current world alone.

mod darkness;
mod door;
mod guard;

use tw_core::{Block, BlockId, Direction, EntityId, World, WorldError};

pub use darkness::DarknessBlock;
pub use door::{LockedDoor, LockedDoorBlock, LockedDoorRecord};
pub use guard::GuardBlock;

use crate::error::RulesResult;

/// The direction of the exit leading from `location` to `connection`.
pub(crate) fn direction(world: &World, location: EntityId, connection: EntityId) -> RulesResult<Direction> {
    world.direction_to(location, connection).ok_or_else(|| {
        WorldError::NoConnection {
            from: world.label(location),
            to: world.label(connection),
        }
        .into()
    })
}

/// Register `block` and attach it to the exit from `location` toward
/// `connection`.
pub fn attach(
    world: &mut World,
    location: EntityId,
    connection: EntityId,
    block: Box<dyn Block>,
) -> RulesResult<BlockId> {
    let direction = direction(world, location, connection)?;
    let id = world.insert_block(block);
    world.attach_block(location, direction, id)?;
    Ok(id)
}
