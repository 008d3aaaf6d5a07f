use tw_core::{EntityId, World};

use super::check::{carried, matched, require, resolved};
use super::{Action, ActionKind, actor};
use crate::error::{Refusal, RulesResult};
use crate::parser::strip_phrase;
use crate::session::Game;

/// Light a lightable item the actor carries.
///
/// `"light <item>"` names the item; a bare `"light"` falls back to the
/// configured default light source.
#[derive(Debug, Clone)]
pub struct LightSource {
    character: EntityId,
    wanted: String,
    item: Option<EntityId>,
}

impl LightSource {
    /// Resolve the named item in the inventory.
    pub fn new(game: &Game, command: &str) -> RulesResult<Self> {
        let actor = actor(game, command)?;
        let character = actor.character;
        let wanted = strip_phrase(actor.body, ActionKind::Light.name())
            .filter(|rest| !rest.is_empty())
            .unwrap_or(game.config().default_light_source.as_str())
            .to_string();
        let item = game
            .resolver()
            .match_item(&wanted, game.world().inventory(character)?);
        Ok(Self {
            character,
            wanted,
            item,
        })
    }
}

impl Action for LightSource {
    fn kind(&self) -> ActionKind {
        ActionKind::Light
    }

    fn preconditions(&self, world: &World) -> Result<(), Refusal> {
        let item = matched(self.item, &format!("You don't have a {}.", self.wanted))?;
        carried(world, self.character, item)?;
        let name = world.label(item);
        require(
            world.flag(item, "is_lightable"),
            format!("The {name} can't be lit."),
        )?;
        require(
            !world.flag(item, "is_lit"),
            format!("The {name} is already lit."),
        )
    }

    fn effects(&self, world: &mut World) -> RulesResult<String> {
        let item = resolved(self.item, "light source")?;
        world.set_property(item, "is_lit", true)?;
        Ok(format!("You light the {}.", world.label(item)))
    }
}
