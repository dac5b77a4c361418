//! Expansion queries over config trees.
//!
//! A query is a space-separated keyword path, like the keys accepted by
//! `ConfNode::get`, where keywords may also be wildcards.
//!
//! # Supported Syntax
//!
//! - `keyword` - Exact keyword, matched case-insensitively
//! - `*` - Any run of characters (including `/`)
//! - `?` - Any single character
//! - `[abc]`, `[a-z]`, `[!abc]` - Character classes
//! - `~` - Raw text of the matched lines; only valid as the last keyword
//!
//! # Examples
//!
//! ```text
//! interface * ip address *     - every interface address, with its interface
//! interface po* shutdown       - port-channels that are shut down
//! interface * description ~    - free-form interface descriptions
//! ```

pub mod ast;
pub mod expand;

pub use ast::{ConfPath, GlobSegment, Segment};
pub use expand::{Expand, Expansion};
