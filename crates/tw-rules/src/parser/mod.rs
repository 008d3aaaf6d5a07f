//! Command splitting and entity resolution.

mod command;
mod resolver;

pub use command::{split_connective, split_directed, strip_phrase};
pub use resolver::{Resolver, first_named_containing};
