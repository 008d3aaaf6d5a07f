use tw_core::{EntityId, World};

use super::check::{carried, here, matched, require, resolved};
use super::{Action, ActionKind, actor};
use crate::error::{Refusal, RulesResult};
use crate::parser::split_connective;
use crate::session::Game;

/// Unlock a door in the room with a key from the actor's inventory.
///
/// `"unlock <door> with <key>"` names both targets; without the connective
/// the literal names "door" and "key" are tried.
#[derive(Debug, Clone)]
pub struct Unlock {
    character: EntityId,
    location: Option<EntityId>,
    door: Option<EntityId>,
    key: Option<EntityId>,
}

impl Unlock {
    /// Resolve the door among the room's items and the key in the inventory.
    pub fn new(game: &Game, command: &str) -> RulesResult<Self> {
        let actor = actor(game, command)?;
        let world = game.world();
        let (door_text, key_text) =
            split_connective(actor.body, &game.config().connective).unwrap_or(("door", "key"));

        let resolver = game.resolver();
        Ok(Self {
            character: actor.character,
            location: actor.location,
            door: actor
                .items(world)?
                .and_then(|items| resolver.match_item(door_text, items)),
            key: resolver.match_item(key_text, world.inventory(actor.character)?),
        })
    }
}

impl Action for Unlock {
    fn kind(&self) -> ActionKind {
        ActionKind::Unlock
    }

    fn preconditions(&self, world: &World) -> Result<(), Refusal> {
        let door = matched(self.door, "I don't see a door here.")?;
        let key = matched(self.key, "You don't have a key.")?;
        here(world, self.location, self.character)?;
        here(world, self.location, door)?;
        carried(world, self.character, key)?;
        require(world.flag(door, "is_locked"), "The door is already unlocked.")
    }

    fn effects(&self, world: &mut World) -> RulesResult<String> {
        let door = resolved(self.door, "door")?;
        world.set_property(door, "is_locked", false)?;
        Ok("You unlock the door with the key.".to_string())
    }
}
