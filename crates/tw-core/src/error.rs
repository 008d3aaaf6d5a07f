use crate::block::BlockId;
use crate::direction::Direction;
use crate::entity::{EntityId, EntityKind};

/// Alias for `Result<T, WorldError>`.
pub type WorldResult<T> = Result<T, WorldError>;

/// Errors that can occur when reading or mutating a world.
///
/// These describe a malformed world graph (a dangling id, a name nobody
/// registered), never a rule that simply did not apply.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The requested entity ID does not exist in the world.
    #[error("entity not found: {0}")]
    EntityNotFound(EntityId),

    /// An entity with the same name already exists.
    #[error("entity already exists: \"{0}\"")]
    DuplicateName(String),

    /// A named reference could not be resolved to an existing entity.
    #[error("invalid reference: entity \"{name}\" of kind {expected_kind:?} not found")]
    InvalidReference {
        /// The unresolved entity name.
        name: String,
        /// The expected entity kind, if known.
        expected_kind: Option<EntityKind>,
    },

    /// The entity exists but is not of the kind the operation needs.
    #[error("\"{name}\" is a {actual}, expected a {expected}")]
    WrongKind {
        /// Name of the offending entity.
        name: String,
        /// The kind the operation required.
        expected: EntityKind,
        /// The kind the entity actually has.
        actual: EntityKind,
    },

    /// No exit leads from one location to the other.
    #[error("no connection from \"{from}\" to \"{to}\"")]
    NoConnection {
        /// Name of the originating location.
        from: String,
        /// Name of the destination location.
        to: String,
    },

    /// The location has no exit in the given direction.
    #[error("\"{location}\" has no exit {direction}")]
    NoExit {
        /// Name of the location.
        location: String,
        /// The missing direction.
        direction: Direction,
    },

    /// The item is not in the container it was expected to leave.
    #[error("\"{item}\" is not in {container}")]
    NotContained {
        /// Name of the item.
        item: String,
        /// Name of the location or character expected to hold it.
        container: String,
    },

    /// The requested block ID is not registered in the world.
    #[error("block not found: {0}")]
    BlockNotFound(BlockId),
}
