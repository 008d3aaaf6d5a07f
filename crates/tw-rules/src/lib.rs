//! Rule core for Taleweaver text adventures.
//!
//! Commands become [`Action`]s that check an ordered list of preconditions
//! and, only when all hold, apply their effects to the [`tw_core::World`].
//! Exactly one message reaches the [`Reporter`] per attempt. Travel along an
//! exit is gated separately by the [`tw_core::Block`]s in [`blocks`].

/// The action contract and the concrete rules.
pub mod action;
/// Concrete blocks, including the persistable locked door.
pub mod blocks;
/// Configuration for resolution and parsing.
pub mod config;
/// Error types for the rule core.
pub mod error;
/// Command splitting and entity resolution.
pub mod parser;
/// The reporting channel.
pub mod report;
/// Game session wiring the world, resolver and transcript together.
pub mod session;

#[cfg(test)]
mod testing;

pub use action::{Action, ActionKind, LightSource, Propose, ReadRunes, SitOnThrone, Unlock, WearCrown};
pub use blocks::{DarknessBlock, GuardBlock, LockedDoor, LockedDoorBlock, LockedDoorRecord};
pub use config::RulesConfig;
pub use error::{Refusal, RulesError, RulesResult};
pub use parser::Resolver;
pub use report::{Report, Reporter, Transcript};
pub use session::Game;
