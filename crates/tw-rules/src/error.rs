//! Error types for the rule core.

use thiserror::Error;
use tw_core::WorldError;

/// Result type for rule operations.
pub type RulesResult<T> = Result<T, RulesError>;

/// Structural faults: the world graph or the input is not what the rules
/// need. A rule that merely does not apply is a [`Refusal`], not an error.
#[derive(Debug, Error)]
pub enum RulesError {
    /// The world graph is inconsistent.
    #[error(transparent)]
    World(#[from] WorldError),

    /// The configured player does not exist.
    #[error("player not found: {0}")]
    PlayerNotFound(String),

    /// A travelling character stands nowhere.
    #[error("{0} is not in any location")]
    Unplaced(String),

    /// No action answers to the command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Effects were applied for a target that never resolved, i.e.
    /// without a passing precondition check.
    #[error("{0} was never resolved; check preconditions before applying effects")]
    Unresolved(&'static str),

    /// A persisted record could not be encoded or decoded.
    #[error("record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Why an action's preconditions failed. Displays as the player-facing
/// failure message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Refusal {
    /// A target could not be resolved.
    #[error("{0}")]
    Missing(String),

    /// Actor and target are not in the same place.
    #[error("{0} is not here.")]
    NotHere(String),

    /// The actor does not carry the item.
    #[error("You aren't carrying the {0}.")]
    NotCarried(String),

    /// The target was found but is in the wrong state.
    #[error("{0}")]
    State(String),
}

impl Refusal {
    /// Resolution failure with a custom message.
    pub fn missing(message: impl Into<String>) -> Self {
        Self::Missing(message.into())
    }

    /// State mismatch with a custom message.
    pub fn state(message: impl Into<String>) -> Self {
        Self::State(message.into())
    }
}
