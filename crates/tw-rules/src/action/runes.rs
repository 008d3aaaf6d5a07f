use tw_core::{Container, EntityId, World};

use super::check::{carried, matched, require, resolved};
use super::{Action, ActionKind, actor};
use crate::error::{Refusal, RulesResult};
use crate::parser::first_named_containing;
use crate::session::Game;

/// Read the runes on a lit candle to banish the ghost haunting the room.
///
/// The banished ghost leaves the room and drops everything it carried.
#[derive(Debug, Clone)]
pub struct ReadRunes {
    character: EntityId,
    location: Option<EntityId>,
    candle: Option<EntityId>,
    ghost: Option<EntityId>,
}

impl ReadRunes {
    /// Resolve the candle in the inventory and any ghost in the room.
    pub fn new(game: &Game, command: &str) -> RulesResult<Self> {
        let actor = actor(game, command)?;
        let world = game.world();
        Ok(Self {
            character: actor.character,
            location: actor.location,
            candle: game
                .resolver()
                .match_item("candle", world.inventory(actor.character)?),
            ghost: actor
                .characters(world)?
                .and_then(|scope| first_named_containing(scope, "ghost")),
        })
    }
}

impl Action for ReadRunes {
    fn kind(&self) -> ActionKind {
        ActionKind::ReadRunes
    }

    fn preconditions(&self, world: &World) -> Result<(), Refusal> {
        let candle = matched(self.candle, "You don't have a candle.")?;
        carried(world, self.character, candle)?;
        let ghost = matched(self.ghost, "There's no ghost here to banish.")?;
        require(
            world.flag(candle, "is_lit"),
            "The candle must be lit to read the runes.",
        )?;
        require(
            !world.flag(ghost, "is_banished"),
            "The ghost has already been banished.",
        )
    }

    fn effects(&self, world: &mut World) -> RulesResult<String> {
        let ghost = resolved(self.ghost, "ghost")?;
        let location = resolved(self.location, "location")?;
        world.set_property(ghost, "is_banished", true)?;
        world.remove_character(location, ghost)?;

        let dropped: Vec<EntityId> = world.inventory(ghost)?.values().copied().collect();
        for item in dropped {
            world.move_item(
                item,
                Container::Inventory(ghost),
                Container::Location(location),
            )?;
        }

        Ok("You intone the ancient words. A chilling wail echoes... then silence. \
            The ghost is banished."
            .to_string())
    }
}
