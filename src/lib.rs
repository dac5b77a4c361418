//! ConfQuill - navigate and query CLI-style network device configs.
//!
//! Configs of most network vendors are indentation-structured text: a
//! statement owns the lines indented under it. ConfQuill parses such text into
//! a tree of [`ConfNode`]s without knowing any vendor grammar, then lets you
//! query it with keyword paths:
//!
//! ```
//! use confquill::ConfNode;
//!
//! let conf = ConfNode::parse("\
//! interface IF1
//!     ip address 1.1.1.1
//!     ip address 2.2.2.2 secondary
//! interface IF2
//!     ip address 1.1.1.2
//! ");
//!
//! assert_eq!(conf.get("interface").keyword_list(), vec!["IF1", "IF2"]);
//!
//! let interfaces = conf.get("interface");
//! let names: Vec<&str> = interfaces.keywords().collect();
//! assert_eq!(names, vec!["IF1", "IF2"]);
//! assert!(conf.get("interface IF1 ip address 1.1.1.1").is_match());
//!
//! for expansion in conf.expand("interface * ip address *").unwrap() {
//!     println!("{} {}", expansion.captures[0], expansion.captures[1]);
//! }
//! ```

pub mod config;
pub mod confpath;
pub mod document;
pub mod error;
pub mod file;

pub use confpath::{ConfPath, Expand, Expansion};
pub use document::{ConfNode, DumpOptions};
pub use error::{ConfError, Result};
