use tw_core::{EntityId, World};

use super::check::{here, matched, require, resolved};
use super::{Action, ActionKind, actor};
use crate::error::{Refusal, RulesResult};
use crate::parser::first_named_containing;
use crate::session::Game;

/// Propose marriage to the princess in the room. Marrying a royal makes
/// the actor royal too.
#[derive(Debug, Clone)]
pub struct Propose {
    character: EntityId,
    location: Option<EntityId>,
    princess: Option<EntityId>,
}

impl Propose {
    /// Resolve any princess among the characters in the room.
    pub fn new(game: &Game, command: &str) -> RulesResult<Self> {
        let actor = actor(game, command)?;
        Ok(Self {
            character: actor.character,
            location: actor.location,
            princess: actor
                .characters(game.world())?
                .and_then(|scope| first_named_containing(scope, "princess")),
        })
    }
}

impl Action for Propose {
    fn kind(&self) -> ActionKind {
        ActionKind::Propose
    }

    fn preconditions(&self, world: &World) -> Result<(), Refusal> {
        let princess = matched(self.princess, "There's no one here to propose to.")?;
        here(world, self.location, princess)?;
        require(
            !world.flag(self.character, "is_married"),
            "You are already married.",
        )?;
        require(
            !world.flag(princess, "is_married"),
            "The princess is already married.",
        )
    }

    fn effects(&self, world: &mut World) -> RulesResult<String> {
        let princess = resolved(self.princess, "princess")?;
        world.set_property(self.character, "is_married", true)?;
        world.set_property(princess, "is_married", true)?;
        if world.flag(princess, "is_royal") {
            world.set_property(self.character, "is_royal", true)?;
        }
        Ok(
            "With a sweet smile, the princess accepts your proposal. You are now betrothed!"
                .to_string(),
        )
    }
}
