//! The action contract and the rules that implement it.
//!
//! An action is built fresh from one command, resolving its targets
//! eagerly. [`Action::check_preconditions`] then walks an ordered list of
//! conditions; the first failure is reported and nothing else runs. Only
//! after a passing check may [`Action::apply_effects`] mutate the world.

mod check;
mod crown;
mod light;
mod propose;
mod runes;
mod throne;
mod unlock;

use std::collections::BTreeMap;
use std::fmt;

use tracing::info;
use tw_core::{EntityId, World};

pub use crown::WearCrown;
pub use light::LightSource;
pub use propose::Propose;
pub use runes::ReadRunes;
pub use throne::SitOnThrone;
pub use unlock::Unlock;

use crate::error::{Refusal, RulesResult};
use crate::parser::strip_phrase;
use crate::report::Reporter;
use crate::session::Game;

/// One attempted rule invocation.
pub trait Action: fmt::Debug {
    /// Which rule this is.
    fn kind(&self) -> ActionKind;

    /// Evaluate the conditions in order, stopping at the first failure.
    fn preconditions(&self, world: &World) -> Result<(), Refusal>;

    /// Mutate the world and return the success text.
    fn effects(&self, world: &mut World) -> RulesResult<String>;

    /// Run the precondition list, reporting the first failure.
    ///
    /// Emits nothing when every condition passes.
    fn check_preconditions(&self, world: &World, out: &mut dyn Reporter) -> bool {
        match self.preconditions(world) {
            Ok(()) => true,
            Err(refusal) => {
                out.fail(&refusal.to_string());
                false
            }
        }
    }

    /// Apply the effects and report success. Call once, after a passing check.
    fn apply_effects(&self, world: &mut World, out: &mut dyn Reporter) -> RulesResult<()> {
        let message = self.effects(world)?;
        info!(action = self.kind().name(), "applied effects");
        out.ok(&message);
        Ok(())
    }
}

/// The catalog of rules a command can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Unlock a door with a key.
    Unlock,
    /// Banish a ghost with a lit, rune-carved candle.
    ReadRunes,
    /// Marry the princess.
    Propose,
    /// Put on a crown.
    WearCrown,
    /// Claim the throne.
    SitOnThrone,
    /// Light a carried light source.
    Light,
}

impl ActionKind {
    /// Every rule, in catalog order.
    pub const ALL: [ActionKind; 6] = [
        Self::Unlock,
        Self::ReadRunes,
        Self::Propose,
        Self::WearCrown,
        Self::SitOnThrone,
        Self::Light,
    ];

    /// Canonical verb phrase.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unlock => "unlock",
            Self::ReadRunes => "read runes",
            Self::Propose => "propose",
            Self::WearCrown => "wear crown",
            Self::SitOnThrone => "sit on throne",
            Self::Light => "light",
        }
    }

    /// One-line help text.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Unlock => "Unlock a door with a key",
            Self::ReadRunes => "Read runes off of the candle",
            Self::Propose => "Propose marriage to someone",
            Self::WearCrown => "Put a crown on your head",
            Self::SitOnThrone => "Sit on the throne, if you are royalty",
            Self::Light => "Light a candle or other light source",
        }
    }

    /// Other phrases that invoke the rule.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Unlock => &["unlock door"],
            Self::ReadRunes => &["read"],
            Self::Propose => &["propose to princess"],
            Self::WearCrown => &["wear"],
            Self::SitOnThrone => &["sit throne", "sit"],
            Self::Light => &["light candle"],
        }
    }

    /// The rule whose name or alias starts the command; the longest
    /// matching phrase wins. Expects the text after any addressee.
    pub fn from_command(body: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .flat_map(|kind| {
                std::iter::once(kind.name())
                    .chain(kind.aliases().iter().copied())
                    .map(move |phrase| (kind, phrase))
            })
            .filter(|(_, phrase)| strip_phrase(body, phrase).is_some())
            .max_by_key(|(_, phrase)| phrase.len())
            .map(|(kind, _)| kind)
    }

    /// Construct the rule for a command, resolving its targets.
    pub fn build(self, game: &Game, command: &str) -> RulesResult<Box<dyn Action>> {
        Ok(match self {
            Self::Unlock => Box::new(Unlock::new(game, command)?),
            Self::ReadRunes => Box::new(ReadRunes::new(game, command)?),
            Self::Propose => Box::new(Propose::new(game, command)?),
            Self::WearCrown => Box::new(WearCrown::new(game, command)?),
            Self::SitOnThrone => Box::new(SitOnThrone::new(game, command)?),
            Self::Light => Box::new(LightSource::new(game, command)?),
        })
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

type Scope = BTreeMap<String, EntityId>;

/// The acting character, where it stands, and the text addressed to it.
///
/// A character standing nowhere sees nothing, so its rule refuses instead
/// of failing to build.
struct Actor<'a> {
    character: EntityId,
    location: Option<EntityId>,
    body: &'a str,
}

impl Actor<'_> {
    fn items<'w>(&self, world: &'w World) -> RulesResult<Option<&'w Scope>> {
        Ok(self.location.map(|l| world.items_at(l)).transpose()?)
    }

    fn characters<'w>(&self, world: &'w World) -> RulesResult<Option<&'w Scope>> {
        Ok(self.location.map(|l| world.characters_at(l)).transpose()?)
    }
}

fn actor<'a>(game: &Game, command: &'a str) -> RulesResult<Actor<'a>> {
    let world = game.world();
    let (character, body) = game.resolver().direct(world, command);
    Ok(Actor {
        character,
        location: world.location_of(character)?,
        body,
    })
}
