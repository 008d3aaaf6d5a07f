use tw_core::{EntityId, World};

use super::check::{carried, matched, require, resolved};
use super::{Action, ActionKind, actor};
use crate::error::{Refusal, RulesResult};
use crate::session::Game;

/// Put on a crown from the actor's inventory.
#[derive(Debug, Clone)]
pub struct WearCrown {
    character: EntityId,
    crown: Option<EntityId>,
}

impl WearCrown {
    /// Resolve the crown in the inventory.
    pub fn new(game: &Game, command: &str) -> RulesResult<Self> {
        let character = actor(game, command)?.character;
        Ok(Self {
            character,
            crown: game
                .resolver()
                .match_item("crown", game.world().inventory(character)?),
        })
    }
}

impl Action for WearCrown {
    fn kind(&self) -> ActionKind {
        ActionKind::WearCrown
    }

    fn preconditions(&self, world: &World) -> Result<(), Refusal> {
        let crown = matched(self.crown, "You don't have a crown.")?;
        carried(world, self.character, crown)?;
        require(
            !world.flag(crown, "is_worn"),
            "You are already wearing the crown.",
        )
    }

    fn effects(&self, world: &mut World) -> RulesResult<String> {
        let crown = resolved(self.crown, "crown")?;
        world.set_property(crown, "is_worn", true)?;
        Ok("You put the crown on your head. You feel regal!".to_string())
    }
}
