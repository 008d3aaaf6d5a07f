use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::block::{Block, BlockId};
use crate::component::{CharacterComponent, Exit, LocationComponent};
use crate::direction::Direction;
use crate::entity::{Entity, EntityId, EntityKind};
use crate::error::{WorldError, WorldResult};
use crate::property::PropertyValue;

/// Metadata about the world itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldMeta {
    /// Title of the world.
    pub name: String,
    /// Free-text blurb.
    pub description: String,
    /// When the world was built.
    pub created_at: DateTime<Utc>,
}

impl WorldMeta {
    /// Metadata with the given title and an empty description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            created_at: Utc::now(),
        }
    }
}

/// Something that holds items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// The item set of a location.
    Location(EntityId),
    /// The inventory of a character.
    Inventory(EntityId),
}

/// The central world model. Owns all entities and blocks.
#[derive(Debug)]
pub struct World {
    /// Metadata about this world.
    pub meta: WorldMeta,
    entities: HashMap<EntityId, Entity>,
    blocks: HashMap<BlockId, Box<dyn Block>>,

    // Name registry, lowercased
    by_name_lower: HashMap<String, EntityId>,
}

impl World {
    /// Create an empty world.
    pub fn new(meta: WorldMeta) -> Self {
        Self {
            meta,
            entities: HashMap::new(),
            blocks: HashMap::new(),
            by_name_lower: HashMap::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Entity registry
    // -----------------------------------------------------------------------

    /// Add an entity to the world. Returns the entity's ID.
    pub fn add_entity(&mut self, entity: Entity) -> WorldResult<EntityId> {
        let name_lower = entity.name.to_lowercase();
        if self.by_name_lower.contains_key(&name_lower) {
            return Err(WorldError::DuplicateName(entity.name.clone()));
        }

        let id = entity.id;
        self.by_name_lower.insert(name_lower, id);
        self.entities.insert(id, entity);
        Ok(id)
    }

    /// Look up an entity by ID.
    pub fn entity(&self, id: EntityId) -> WorldResult<&Entity> {
        self.entities.get(&id).ok_or(WorldError::EntityNotFound(id))
    }

    /// Look up an entity by ID for mutation.
    pub fn entity_mut(&mut self, id: EntityId) -> WorldResult<&mut Entity> {
        self.entities
            .get_mut(&id)
            .ok_or(WorldError::EntityNotFound(id))
    }

    /// Find an entity by name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&Entity> {
        self.by_name_lower
            .get(&name.to_lowercase())
            .and_then(|id| self.entities.get(id))
    }

    /// Find an entity ID by name (case-insensitive).
    pub fn find_id_by_name(&self, name: &str) -> Option<EntityId> {
        self.by_name_lower.get(&name.to_lowercase()).copied()
    }

    /// Resolve a name to an entity of the given kind.
    pub fn resolve_name(&self, name: &str, kind: EntityKind) -> WorldResult<EntityId> {
        self.find_by_name(name)
            .filter(|e| e.kind == kind)
            .map(|e| e.id)
            .ok_or_else(|| WorldError::InvalidReference {
                name: name.to_string(),
                expected_kind: Some(kind),
            })
    }

    /// Name of an entity.
    pub fn name_of(&self, id: EntityId) -> WorldResult<&str> {
        self.entity(id).map(|e| e.name.as_str())
    }

    /// Name of an entity for messages; falls back to the short id.
    pub fn label(&self, id: EntityId) -> String {
        self.entities
            .get(&id)
            .map_or_else(|| id.to_string(), |e| e.name.clone())
    }

    fn expect_kind(&self, id: EntityId, kind: EntityKind) -> WorldResult<&Entity> {
        let entity = self.entity(id)?;
        if entity.kind != kind {
            return Err(wrong_kind(entity, kind));
        }
        Ok(entity)
    }

    fn location_component(&self, id: EntityId) -> WorldResult<&LocationComponent> {
        let entity = self.entity(id)?;
        entity
            .components
            .location
            .as_ref()
            .ok_or_else(|| wrong_kind(entity, EntityKind::Location))
    }

    fn location_component_mut(&mut self, id: EntityId) -> WorldResult<&mut LocationComponent> {
        let entity = self.entity_mut(id)?;
        let err = wrong_kind(entity, EntityKind::Location);
        entity.components.location.as_mut().ok_or(err)
    }

    fn character_component(&self, id: EntityId) -> WorldResult<&CharacterComponent> {
        let entity = self.entity(id)?;
        entity
            .components
            .character
            .as_ref()
            .ok_or_else(|| wrong_kind(entity, EntityKind::Character))
    }

    fn character_component_mut(&mut self, id: EntityId) -> WorldResult<&mut CharacterComponent> {
        let entity = self.entity_mut(id)?;
        let err = wrong_kind(entity, EntityKind::Character);
        entity.components.character.as_mut().ok_or(err)
    }

    // -----------------------------------------------------------------------
    // Property store
    // -----------------------------------------------------------------------

    /// Get a property of an entity, if both exist.
    pub fn get_property(&self, id: EntityId, key: &str) -> Option<&PropertyValue> {
        self.entities.get(&id).and_then(|e| e.get_property(key))
    }

    /// Read a property as a flag. Missing entities and unset keys are false.
    pub fn flag(&self, id: EntityId, key: &str) -> bool {
        self.flag_or(id, key, false)
    }

    /// Read a property as a flag with a default for unset keys.
    pub fn flag_or(&self, id: EntityId, key: &str, default: bool) -> bool {
        self.entities
            .get(&id)
            .map_or(default, |e| e.properties.flag_or(key, default))
    }

    /// Set a property on an entity.
    pub fn set_property(
        &mut self,
        id: EntityId,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> WorldResult<()> {
        self.entity_mut(id)?.set_property(key, value);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Containers
    // -----------------------------------------------------------------------

    /// Items lying at a location, keyed by name.
    pub fn items_at(&self, location: EntityId) -> WorldResult<&BTreeMap<String, EntityId>> {
        self.location_component(location).map(|l| &l.items)
    }

    /// Characters present at a location, keyed by name.
    pub fn characters_at(&self, location: EntityId) -> WorldResult<&BTreeMap<String, EntityId>> {
        self.location_component(location).map(|l| &l.characters)
    }

    /// A character's inventory, keyed by name.
    pub fn inventory(&self, character: EntityId) -> WorldResult<&BTreeMap<String, EntityId>> {
        self.character_component(character).map(|c| &c.inventory)
    }

    /// The location a character currently stands in.
    pub fn location_of(&self, character: EntityId) -> WorldResult<Option<EntityId>> {
        self.character_component(character).map(|c| c.location)
    }

    /// Whether a character or item is currently in this location's set.
    pub fn here(&self, location: EntityId, entity: EntityId) -> bool {
        let (Some(entity), Some(loc)) = (
            self.entities.get(&entity),
            self.entities
                .get(&location)
                .and_then(|l| l.components.location.as_ref()),
        ) else {
            return false;
        };
        let scope = match entity.kind {
            EntityKind::Character => &loc.characters,
            EntityKind::Item => &loc.items,
            EntityKind::Location => return false,
        };
        scope.get(&entity.name) == Some(&entity.id)
    }

    /// Whether the item is in the character's inventory.
    pub fn is_in_inventory(&self, character: EntityId, item: EntityId) -> bool {
        let (Some(item), Ok(holder)) = (self.entities.get(&item), self.character_component(character))
        else {
            return false;
        };
        holder.inventory.get(&item.name) == Some(&item.id)
    }

    /// Put an item into a location's item set.
    pub fn add_item(&mut self, location: EntityId, item: EntityId) -> WorldResult<()> {
        let name = self.expect_kind(item, EntityKind::Item)?.name.clone();
        self.location_component_mut(location)?.items.insert(name, item);
        Ok(())
    }

    /// Take an item out of a location's item set. Returns whether it was there.
    pub fn remove_item(&mut self, location: EntityId, item: EntityId) -> WorldResult<bool> {
        let name = self.expect_kind(item, EntityKind::Item)?.name.clone();
        let items = &mut self.location_component_mut(location)?.items;
        Ok(remove_if_same(items, &name, item))
    }

    /// Put an item into a character's inventory.
    pub fn add_to_inventory(&mut self, character: EntityId, item: EntityId) -> WorldResult<()> {
        let name = self.expect_kind(item, EntityKind::Item)?.name.clone();
        self.character_component_mut(character)?
            .inventory
            .insert(name, item);
        Ok(())
    }

    /// Take an item out of a character's inventory. Returns whether it was there.
    pub fn remove_from_inventory(&mut self, character: EntityId, item: EntityId) -> WorldResult<bool> {
        let name = self.expect_kind(item, EntityKind::Item)?.name.clone();
        let inventory = &mut self.character_component_mut(character)?.inventory;
        Ok(remove_if_same(inventory, &name, item))
    }

    /// Move an item between containers. The item must be in `from`.
    pub fn move_item(&mut self, item: EntityId, from: Container, to: Container) -> WorldResult<()> {
        let removed = match from {
            Container::Location(id) => self.remove_item(id, item)?,
            Container::Inventory(id) => self.remove_from_inventory(id, item)?,
        };
        if !removed {
            let holder = match from {
                Container::Location(id) | Container::Inventory(id) => id,
            };
            return Err(WorldError::NotContained {
                item: self.name_of(item)?.to_string(),
                container: self.name_of(holder)?.to_string(),
            });
        }
        match to {
            Container::Location(id) => self.add_item(id, item)?,
            Container::Inventory(id) => self.add_to_inventory(id, item)?,
        }
        debug!(item = %item, ?from, ?to, "moved item");
        Ok(())
    }

    /// Place a character at a location, leaving wherever it was before.
    pub fn add_character(&mut self, location: EntityId, character: EntityId) -> WorldResult<()> {
        self.location_component(location)?;
        let previous = self.location_of(character)?;
        if let Some(previous) = previous.filter(|p| *p != location) {
            self.remove_character(previous, character)?;
        }
        let name = self.name_of(character)?.to_string();
        self.location_component_mut(location)?
            .characters
            .insert(name, character);
        self.character_component_mut(character)?.location = Some(location);
        Ok(())
    }

    /// Remove a character from a location. Returns whether it was there.
    pub fn remove_character(&mut self, location: EntityId, character: EntityId) -> WorldResult<bool> {
        let name = self
            .expect_kind(character, EntityKind::Character)?
            .name
            .clone();
        let removed = remove_if_same(
            &mut self.location_component_mut(location)?.characters,
            &name,
            character,
        );
        let component = self.character_component_mut(character)?;
        if component.location == Some(location) {
            component.location = None;
        }
        Ok(removed)
    }

    // -----------------------------------------------------------------------
    // Location graph
    // -----------------------------------------------------------------------

    /// Add a one-way exit. Replaces any exit already leaving in `direction`.
    pub fn connect(&mut self, from: EntityId, direction: Direction, to: EntityId) -> WorldResult<()> {
        self.location_component(to)?;
        self.location_component_mut(from)?
            .exits
            .insert(direction, Exit::to(to));
        Ok(())
    }

    /// Add an exit and the matching one back in the opposite direction.
    pub fn connect_both(&mut self, from: EntityId, direction: Direction, to: EntityId) -> WorldResult<()> {
        self.connect(from, direction, to)?;
        self.connect(to, direction.opposite(), from)
    }

    /// The direction of the first exit from `from` that leads to `to`.
    pub fn direction_to(&self, from: EntityId, to: EntityId) -> Option<Direction> {
        self.location_component(from)
            .ok()?
            .exits
            .iter()
            .find(|(_, exit)| exit.destination == to)
            .map(|(dir, _)| *dir)
    }

    /// The exit leaving `location` in `direction`, if any.
    pub fn exit(&self, location: EntityId, direction: Direction) -> Option<&Exit> {
        self.location_component(location).ok()?.exits.get(&direction)
    }

    // -----------------------------------------------------------------------
    // Blocks
    // -----------------------------------------------------------------------

    /// Register a block. It gates nothing until attached to an exit.
    pub fn insert_block(&mut self, block: Box<dyn Block>) -> BlockId {
        let id = BlockId::new();
        self.blocks.insert(id, block);
        id
    }

    /// Attach a registered block to the exit leaving `location` in `direction`.
    pub fn attach_block(&mut self, location: EntityId, direction: Direction, id: BlockId) -> WorldResult<()> {
        if !self.blocks.contains_key(&id) {
            return Err(WorldError::BlockNotFound(id));
        }
        let location_name = self.name_of(location)?.to_string();
        let exit = self
            .location_component_mut(location)?
            .exits
            .get_mut(&direction)
            .ok_or(WorldError::NoExit {
                location: location_name,
                direction,
            })?;
        if !exit.blocks.contains(&id) {
            exit.blocks.push(id);
        }
        Ok(())
    }

    /// Look up a registered block.
    pub fn block(&self, id: BlockId) -> Option<&dyn Block> {
        self.blocks.get(&id).map(|b| b.as_ref())
    }

    /// All blocks attached to an exit, in attachment order.
    pub fn blocks_on(&self, location: EntityId, direction: Direction) -> Vec<&dyn Block> {
        self.exit(location, direction)
            .map(|exit| exit.blocks.iter().filter_map(|id| self.block(*id)).collect())
            .unwrap_or_default()
    }

    /// The first block currently refusing travel along an exit.
    pub fn blocking(&self, location: EntityId, direction: Direction) -> Option<&dyn Block> {
        let found = self
            .blocks_on(location, direction)
            .into_iter()
            .find(|b| b.is_blocked(self));
        debug!(
            location = %location,
            %direction,
            blocked_by = found.map(|b| b.name()),
            "evaluated exit blocks"
        );
        found
    }
}

fn wrong_kind(entity: &Entity, expected: EntityKind) -> WorldError {
    WorldError::WrongKind {
        name: entity.name.clone(),
        expected,
        actual: entity.kind,
    }
}

fn remove_if_same(map: &mut BTreeMap<String, EntityId>, name: &str, id: EntityId) -> bool {
    if map.get(name) == Some(&id) {
        map.remove(name);
        true
    } else {
        false
    }
}
