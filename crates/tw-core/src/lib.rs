//! World model for Taleweaver: entities, properties, containers, and exits.
//!
//! Rules never hold references into the world. They hold [`EntityId`]s and
//! read or write through [`World`], which also owns every [`Block`] gating
//! an exit. Names are unique across a world, so the name registry doubles as
//! the lookup table for persisted records.

/// The block contract gating exits between locations.
pub mod block;
/// Typed component data (location contents, character inventory).
pub mod component;
/// Exit directions.
pub mod direction;
/// Entity types and identifiers.
pub mod entity;
/// Error types used throughout the crate.
pub mod error;
/// The per-entity property store.
pub mod property;
/// The central world model that owns entities and blocks.
pub mod world;

/// Re-export the block contract.
pub use block::{Block, BlockId};
/// Re-export exit directions.
pub use direction::Direction;
/// Re-export core entity types.
pub use entity::{Entity, EntityId, EntityKind};
/// Re-export error types.
pub use error::{WorldError, WorldResult};
/// Re-export property types.
pub use property::{Properties, PropertyValue};
/// Re-export world model types.
pub use world::{Container, World, WorldMeta};
