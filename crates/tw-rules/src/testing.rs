//! Shared fixtures for unit tests.

use tw_core::{Entity, EntityId, EntityKind, World, WorldMeta};

use crate::config::RulesConfig;
use crate::report::Report;
use crate::session::Game;

/// A world with one location, "courtyard", and the player standing in it.
pub(crate) fn courtyard() -> (World, EntityId, EntityId) {
    let mut world = World::new(WorldMeta::new("Test Castle"));
    let room = world
        .add_entity(Entity::new(EntityKind::Location, "courtyard"))
        .unwrap();
    let player = world
        .add_entity(Entity::new(EntityKind::Character, "player"))
        .unwrap();
    world.add_character(room, player).unwrap();
    (world, room, player)
}

/// Add an item entity.
pub(crate) fn item(world: &mut World, entity: Entity) -> EntityId {
    assert_eq!(entity.kind, EntityKind::Item);
    world.add_entity(entity).unwrap()
}

/// Add a character and place it at `location`.
pub(crate) fn character(world: &mut World, location: EntityId, entity: Entity) -> EntityId {
    let id = world.add_entity(entity).unwrap();
    world.add_character(location, id).unwrap();
    id
}

/// Wrap a world with "player" as the acting character.
pub(crate) fn game(world: World) -> Game {
    Game::new(world, "player", RulesConfig::default()).unwrap()
}

/// The single report an attempt produced.
pub(crate) fn only_report(game: &Game) -> &Report {
    assert_eq!(game.transcript().len(), 1, "expected exactly one report");
    &game.transcript().entries()[0]
}
