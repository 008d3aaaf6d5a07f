//! Entity name resolution within a bounded scope.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use strsim::jaro_winkler;
use tracing::debug;
use tw_core::{EntityId, EntityKind, World};

use super::command::split_directed;
use crate::config::RulesConfig;

/// Matches command text to entities. Always answers with a definite
/// match-or-none; ambiguity is settled here, never by the rules.
#[derive(Debug, Clone)]
pub struct Resolver {
    player: EntityId,
    fuzzy_threshold: f64,
}

impl Resolver {
    /// Create a resolver that defaults undirected commands to `player`.
    pub fn new(player: EntityId, config: &RulesConfig) -> Self {
        Self {
            player,
            fuzzy_threshold: config.fuzzy_threshold,
        }
    }

    /// The character undirected commands act as.
    pub fn player(&self) -> EntityId {
        self.player
    }

    /// Find the item in `scope` that `text` refers to.
    ///
    /// Tried in order: exact name, names mentioned as whole words in the
    /// text (longest wins), names containing the text, fuzzy similarity.
    pub fn match_item(&self, text: &str, scope: &BTreeMap<String, EntityId>) -> Option<EntityId> {
        let text = text.trim().to_lowercase();
        if text.is_empty() {
            return None;
        }

        // Exact match first (case-insensitive)
        if let Some((_, id)) = scope.iter().find(|(name, _)| name.to_lowercase() == text) {
            return Some(*id);
        }

        let padded = format!(" {text} ");
        if let Some((_, id)) = scope
            .iter()
            .filter(|(name, _)| padded.contains(&format!(" {} ", name.to_lowercase())))
            .max_by_key(|(name, _)| name.len())
        {
            return Some(*id);
        }

        if let Some((_, id)) = scope
            .iter()
            .find(|(name, _)| name.to_lowercase().contains(&text))
        {
            return Some(*id);
        }

        let best = scope
            .iter()
            .map(|(name, id)| (jaro_winkler(&text, &name.to_lowercase()), *id))
            .filter(|(score, _)| *score >= self.fuzzy_threshold)
            .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal))
            .map(|(_, id)| id);
        debug!(%text, matched = best.is_some(), "fuzzy item match");
        best
    }

    /// Split a command into the character it is issued by and the text
    /// addressed to them.
    ///
    /// `"<name>: ..."` is directed only when the name is a character's;
    /// any other command, colon or not, is the player's in full.
    pub fn direct<'a>(&self, world: &World, command: &'a str) -> (EntityId, &'a str) {
        let (addressed, body) = split_directed(command);
        match addressed
            .and_then(|name| world.find_by_name(name))
            .filter(|e| e.kind == EntityKind::Character)
        {
            Some(character) => (character.id, body),
            None => (self.player, command.trim()),
        }
    }

    /// The character a command is issued by.
    pub fn get_character(&self, world: &World, command: &str) -> EntityId {
        self.direct(world, command).0
    }
}

/// First entity in `scope` whose name contains `needle` (case-insensitive).
///
/// This is the loose lookup used for targets the player never names,
/// like "the ghost in this room".
pub fn first_named_containing(scope: &BTreeMap<String, EntityId>, needle: &str) -> Option<EntityId> {
    let needle = needle.to_lowercase();
    scope
        .iter()
        .find(|(name, _)| name.to_lowercase().contains(&needle))
        .map(|(_, id)| *id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tw_core::{Entity, WorldMeta};

    fn scope(names: &[&str]) -> (BTreeMap<String, EntityId>, Vec<EntityId>) {
        let ids: Vec<EntityId> = names.iter().map(|_| EntityId::new()).collect();
        let map = names
            .iter()
            .zip(&ids)
            .map(|(n, id)| (n.to_string(), *id))
            .collect();
        (map, ids)
    }

    fn resolver() -> Resolver {
        Resolver::new(EntityId::new(), &RulesConfig::default())
    }

    #[test]
    fn exact_match() {
        let (scope, ids) = scope(&["door", "brass key"]);
        assert_eq!(resolver().match_item("brass key", &scope), Some(ids[1]));
    }

    #[test]
    fn case_insensitive_match() {
        let (scope, ids) = scope(&["Door"]);
        assert_eq!(resolver().match_item("DOOR", &scope), Some(ids[0]));
    }

    #[test]
    fn name_mentioned_in_text() {
        let (scope, ids) = scope(&["door", "trap door"]);
        assert_eq!(resolver().match_item("unlock door", &scope), Some(ids[0]));
        assert_eq!(resolver().match_item("unlock the trap door", &scope), Some(ids[1]));
    }

    #[test]
    fn name_containing_text() {
        let (scope, ids) = scope(&["brass key"]);
        assert_eq!(resolver().match_item("key", &scope), Some(ids[0]));
    }

    #[test]
    fn fuzzy_match_typo() {
        let (scope, ids) = scope(&["brass key", "candle"]);
        assert_eq!(resolver().match_item("brss key", &scope), Some(ids[0]));
    }

    #[test]
    fn no_match() {
        let (scope, _) = scope(&["door", "brass key"]);
        assert_eq!(resolver().match_item("completely different", &scope), None);
        assert_eq!(resolver().match_item("   ", &scope), None);
    }

    #[test]
    fn containment_scan() {
        let (scope, ids) = scope(&["Ghost of the Keep", "player"]);
        assert_eq!(first_named_containing(&scope, "ghost"), Some(ids[0]));
        assert_eq!(first_named_containing(&scope, "princess"), None);
    }

    #[test]
    fn get_character_defaults_to_player() {
        let mut world = World::new(WorldMeta::new("Test"));
        let player = world
            .add_entity(Entity::new(EntityKind::Character, "player"))
            .unwrap();
        let guard = world
            .add_entity(Entity::new(EntityKind::Character, "guard"))
            .unwrap();
        world
            .add_entity(Entity::new(EntityKind::Item, "note"))
            .unwrap();
        let resolver = Resolver::new(player, &RulesConfig::default());

        assert_eq!(resolver.get_character(&world, "wear crown"), player);
        assert_eq!(resolver.get_character(&world, "Guard: wear crown"), guard);
        assert_eq!(resolver.get_character(&world, "note: wear crown"), player);
    }

    #[test]
    fn colon_without_character_stays_in_command() {
        let mut world = World::new(WorldMeta::new("Test"));
        let player = world
            .add_entity(Entity::new(EntityKind::Character, "player"))
            .unwrap();
        let guard = world
            .add_entity(Entity::new(EntityKind::Character, "guard"))
            .unwrap();
        let resolver = Resolver::new(player, &RulesConfig::default());

        assert_eq!(
            resolver.direct(&world, "unlock door with key: now"),
            (player, "unlock door with key: now")
        );
        assert_eq!(
            resolver.direct(&world, " guard :  wear crown "),
            (guard, "wear crown")
        );
    }
}
