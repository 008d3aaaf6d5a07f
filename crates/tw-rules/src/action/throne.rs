use tw_core::{EntityId, World};

use super::check::{here, matched, require};
use super::{Action, ActionKind, actor};
use crate::error::{Refusal, RulesResult};
use crate::session::Game;

/// Claim the throne. A royal actor wearing a crown who sits here reigns,
/// which wins the game.
#[derive(Debug, Clone)]
pub struct SitOnThrone {
    character: EntityId,
    location: Option<EntityId>,
    throne: Option<EntityId>,
}

impl SitOnThrone {
    /// Resolve the throne among the room's items.
    pub fn new(game: &Game, command: &str) -> RulesResult<Self> {
        let actor = actor(game, command)?;
        Ok(Self {
            character: actor.character,
            location: actor.location,
            throne: actor
                .items(game.world())?
                .and_then(|items| game.resolver().match_item("throne", items)),
        })
    }

    fn wearing_crown(&self, world: &World) -> bool {
        world.inventory(self.character).is_ok_and(|inventory| {
            inventory
                .iter()
                .any(|(name, id)| name.to_lowercase().contains("crown") && world.flag(*id, "is_worn"))
        })
    }
}

impl Action for SitOnThrone {
    fn kind(&self) -> ActionKind {
        ActionKind::SitOnThrone
    }

    fn preconditions(&self, world: &World) -> Result<(), Refusal> {
        let throne = matched(self.throne, "There's no throne here.")?;
        here(world, self.location, self.character)?;
        here(world, self.location, throne)?;
        require(
            world.flag(self.character, "is_royal"),
            "Only royalty may sit upon this throne.",
        )?;
        require(
            self.wearing_crown(world),
            "You should be wearing the crown to claim the throne.",
        )
    }

    fn effects(&self, world: &mut World) -> RulesResult<String> {
        world.set_property(self.character, "is_reigning", true)?;
        Ok(
            "You sit upon the throne as the court erupts in cheers. You are crowned ruler. You win!"
                .to_string(),
        )
    }
}
