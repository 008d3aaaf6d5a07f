//! Building blocks for precondition lists.
//!
//! Each helper returns `Err(Refusal)` so a rule can chain them with `?`
//! and the first failing condition wins.

use tw_core::{EntityId, World};

use crate::error::{Refusal, RulesError, RulesResult};

/// The target resolved, or a resolution failure with `message`.
pub(super) fn matched(target: Option<EntityId>, message: &str) -> Result<EntityId, Refusal> {
    target.ok_or_else(|| Refusal::missing(message))
}

/// The entity is in the location's character or item set. Nothing is
/// here for an actor standing nowhere.
pub(super) fn here(
    world: &World,
    location: Option<EntityId>,
    entity: EntityId,
) -> Result<(), Refusal> {
    if location.is_some_and(|l| world.here(l, entity)) {
        Ok(())
    } else {
        Err(Refusal::NotHere(world.label(entity)))
    }
}

/// The character carries the item.
pub(super) fn carried(world: &World, character: EntityId, item: EntityId) -> Result<(), Refusal> {
    if world.is_in_inventory(character, item) {
        Ok(())
    } else {
        Err(Refusal::NotCarried(world.label(item)))
    }
}

/// A state condition holds, or a state mismatch with `message`.
pub(super) fn require(condition: bool, message: impl Into<String>) -> Result<(), Refusal> {
    if condition {
        Ok(())
    } else {
        Err(Refusal::state(message))
    }
}

/// A target that must have resolved by the time effects run.
pub(super) fn resolved(target: Option<EntityId>, what: &'static str) -> RulesResult<EntityId> {
    target.ok_or(RulesError::Unresolved(what))
}
