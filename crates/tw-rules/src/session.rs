//! One actor-at-a-time command handling over a world.

use tracing::{debug, info, instrument};
use tw_core::{Direction, EntityId, EntityKind, World};

use crate::action::{Action, ActionKind};
use crate::config::RulesConfig;
use crate::error::{RulesError, RulesResult};
use crate::parser::Resolver;
use crate::report::{Reporter, Transcript};

/// A running game: the world, the player, and everything reported so far.
#[derive(Debug)]
pub struct Game {
    world: World,
    resolver: Resolver,
    config: RulesConfig,
    transcript: Transcript,
}

impl Game {
    /// Start a game in which `player_name` issues undirected commands.
    pub fn new(world: World, player_name: &str, config: RulesConfig) -> RulesResult<Self> {
        let player = world
            .resolve_name(player_name, EntityKind::Character)
            .map_err(|_| RulesError::PlayerNotFound(player_name.to_string()))?;
        Ok(Self {
            world,
            resolver: Resolver::new(player, &config),
            config,
            transcript: Transcript::new(),
        })
    }

    /// The world being played.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the world, for setup between commands.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The entity resolver.
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// The active configuration.
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// The player character.
    pub fn player(&self) -> EntityId {
        self.resolver.player()
    }

    /// Every message reported so far.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Mutable access to the transcript, e.g. to drain it after display.
    pub fn transcript_mut(&mut self) -> &mut Transcript {
        &mut self.transcript
    }

    /// Run one command. Returns whether the action succeeded.
    ///
    /// A refused action is `Ok(false)` with a failure report; `Err` means
    /// the command named no rule or the world is malformed.
    #[instrument(skip(self))]
    pub fn execute(&mut self, command: &str) -> RulesResult<bool> {
        let (_, body) = self.resolver.direct(&self.world, command);
        let kind = ActionKind::from_command(body)
            .ok_or_else(|| RulesError::UnknownCommand(command.to_string()))?;
        let action = kind.build(self, command)?;
        self.attempt(action.as_ref())
    }

    /// Check an already built action and apply it if every condition holds.
    pub fn attempt(&mut self, action: &dyn Action) -> RulesResult<bool> {
        if !action.check_preconditions(&self.world, &mut self.transcript) {
            debug!(action = %action.kind(), "preconditions failed");
            return Ok(false);
        }
        action.apply_effects(&mut self.world, &mut self.transcript)?;
        Ok(true)
    }

    /// Move a character along an exit unless a block refuses.
    #[instrument(skip(self))]
    pub fn travel(&mut self, character: EntityId, direction: Direction) -> RulesResult<bool> {
        let location = self
            .world
            .location_of(character)?
            .ok_or_else(|| RulesError::Unplaced(self.world.label(character)))?;

        let Some(destination) = self.world.exit(location, direction).map(|e| e.destination) else {
            self.transcript
                .fail(&format!("You can't go {direction} from here."));
            return Ok(false);
        };

        if let Some(block) = self.world.blocking(location, direction) {
            self.transcript.fail(block.description());
            return Ok(false);
        }

        self.world.add_character(destination, character)?;
        info!(
            character = %self.world.label(character),
            to = %self.world.label(destination),
            "travelled"
        );
        self.transcript.ok(&format!(
            "You go {direction} to the {}.",
            self.world.label(destination)
        ));
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{self, GuardBlock};
    use crate::report::Report;
    use crate::testing::{character, courtyard, game, only_report};
    use tw_core::Entity;

    #[test]
    fn new_requires_a_character() {
        let (world, _, _) = courtyard();
        let err = Game::new(world, "courtyard", RulesConfig::default()).unwrap_err();
        assert!(matches!(err, RulesError::PlayerNotFound(name) if name == "courtyard"));
    }

    #[test]
    fn unknown_command_is_an_error() {
        let (world, _, _) = courtyard();
        let mut game = game(world);
        assert!(matches!(
            game.execute("dance"),
            Err(RulesError::UnknownCommand(_))
        ));
        assert!(game.transcript().is_empty());
    }

    #[test]
    fn refused_action_reports_once() {
        let (world, _, _) = courtyard();
        let mut game = game(world);
        assert!(!game.execute("unlock door with key").unwrap());
        assert_eq!(
            only_report(&game),
            &Report::Fail("I don't see a door here.".to_string())
        );
    }

    #[test]
    fn travel_without_exit() {
        let (world, _, player) = courtyard();
        let mut game = game(world);
        assert!(!game.travel(player, Direction::North).unwrap());
        assert_eq!(
            only_report(&game),
            &Report::Fail("You can't go north from here.".to_string())
        );
    }

    #[test]
    fn guard_bars_travel_until_subdued() {
        let (mut world, room, player) = courtyard();
        let hall = world
            .add_entity(Entity::new(EntityKind::Location, "great hall"))
            .unwrap();
        world.connect_both(room, Direction::East, hall).unwrap();
        let guard = character(&mut world, room, Entity::new(EntityKind::Character, "guard"));
        blocks::attach(&mut world, room, hall, Box::new(GuardBlock::new(room, guard, hall)))
            .unwrap();
        let mut game = game(world);

        assert!(!game.travel(player, Direction::East).unwrap());
        assert_eq!(
            game.transcript().last().unwrap().message(),
            "The castle guard bars your way. You'll need to deal with the guard first."
        );
        assert_eq!(game.world().location_of(player).unwrap(), Some(room));

        game.world_mut()
            .set_property(guard, "is_unconscious", true)
            .unwrap();
        assert!(game.travel(player, Direction::East).unwrap());
        assert_eq!(game.world().location_of(player).unwrap(), Some(hall));
        assert!(!game.world().here(room, player));
        assert_eq!(
            game.transcript().last(),
            Some(&Report::Ok("You go east to the great hall.".to_string()))
        );
    }

    #[test]
    fn colon_in_command_is_not_an_addressee() {
        let (world, _, _) = courtyard();
        let mut game = game(world);
        assert!(!game.execute("unlock door with key: now").unwrap());
        assert_eq!(
            only_report(&game),
            &Report::Fail("I don't see a door here.".to_string())
        );
    }

    #[test]
    fn unplaced_addressee_is_refused_not_an_error() {
        let (mut world, _, _) = courtyard();
        let ghost = world
            .add_entity(Entity::new(EntityKind::Character, "ghost"))
            .unwrap();
        let crown = world
            .add_entity(Entity::new(EntityKind::Item, "crown"))
            .unwrap();
        world.add_to_inventory(ghost, crown).unwrap();
        let mut game = game(world);

        assert!(!game.execute("ghost: sit on throne").unwrap());
        assert_eq!(
            only_report(&game),
            &Report::Fail("There's no throne here.".to_string())
        );

        game.transcript_mut().drain();
        assert!(game.execute("ghost: wear crown").unwrap());
        assert!(game.world().flag(crown, "is_worn"));
    }
}
