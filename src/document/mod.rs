//! Config document model.
//!
//! This module turns indentation-structured config text into a tree of
//! [`ConfNode`]s and provides the keyword lookups, scalar accessors and
//! output built on top of it.

pub mod dump;
pub mod index;
pub mod node;
pub mod parser;
pub mod resolve;
pub mod scalar;
pub mod token;

pub use dump::DumpOptions;
pub use index::{Bucket, KeywordIndex};
pub use node::ConfNode;
pub use resolve::Keywords;
