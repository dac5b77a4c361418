//! Per-node keyword index.
//!
//! Every query step looks at the keywords that can follow a node. A node
//! whose own text still starts with a keyword has exactly one such keyword;
//! a container (no text of its own) offers the leading keyword of each child
//! line. The index groups those followers by lowercase keyword, keeping the
//! order in which keywords and their lines first appear.
//!
//! The index is computed on first use and cached on the node. Building it
//! only reads the node's content and children, which never change, so the
//! cached value is the same no matter which thread computes it.

use super::node::ConfNode;
use super::token::next_token;
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::trace;

/// The lines that follow a node through one keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    /// Keyword as first seen in the config.
    pub keyword: String,
    /// One view per contributing line, in source order.
    pub nodes: Vec<ConfNode>,
}

/// Followers of a node, keyed by lowercase keyword.
pub type KeywordIndex = IndexMap<String, Bucket>;

impl ConfNode {
    /// Returns the keyword index, building it on first call.
    pub(crate) fn index(&self) -> &KeywordIndex {
        self.index.get_or_init(|| Arc::new(self.build_index()))
    }

    fn build_index(&self) -> KeywordIndex {
        let mut index = KeywordIndex::new();

        let own = next_token(self.content.as_deref().unwrap_or_default());
        if !own.is_empty() {
            let remainder = ConfNode::with_children(
                Some(own.rest.to_string()),
                self.original_text.clone(),
                self.line_number,
                Arc::clone(&self.children),
            );
            index.insert(
                own.canonical,
                Bucket {
                    keyword: own.display.to_string(),
                    nodes: vec![remainder],
                },
            );
            return index;
        }

        for child in self.children.iter() {
            let token = next_token(child.content.as_deref().unwrap_or_default());
            if token.is_empty() {
                continue;
            }
            let remainder = ConfNode::with_children(
                Some(token.rest.to_string()),
                child.original_text.clone(),
                child.line_number,
                Arc::clone(&child.children),
            );
            index
                .entry(token.canonical)
                .or_insert_with(|| Bucket {
                    keyword: token.display.to_string(),
                    nodes: Vec::new(),
                })
                .nodes
                .push(remainder);
        }

        trace!(
            line = self.line_number,
            keywords = index.len(),
            "built keyword index"
        );
        index
    }
}

#[cfg(test)]
mod tests {
    use crate::ConfNode;

    #[test]
    fn test_container_groups_children_by_keyword() {
        let conf = ConfNode::parse("snmp server 1\nstp mode mstp\nSNMP server 2\n");
        let index = conf.index();
        assert_eq!(index.len(), 2);

        let snmp = &index["snmp"];
        assert_eq!(snmp.keyword, "snmp");
        assert_eq!(snmp.nodes.len(), 2);
        assert_eq!(snmp.nodes[0].content(), Some("server 1"));
        assert_eq!(snmp.nodes[1].content(), Some("server 2"));
        assert_eq!(snmp.nodes[1].line_number(), 2);
    }

    #[test]
    fn test_own_line_gives_single_entry() {
        let conf = ConfNode::parse("stp mode mstp 1\n");
        let stp = conf.get("stp");
        let index = stp.index();
        assert_eq!(index.len(), 1);
        assert_eq!(index["mode"].nodes[0].content(), Some("mstp 1"));
        assert_eq!(index["mode"].nodes[0].original_text(), "stp mode mstp 1");
    }

    #[test]
    fn test_comments_and_braces_contribute_nothing() {
        let conf = ConfNode::parse("!\n# note\n}\nhostname r1\n");
        let keys: Vec<&String> = conf.index().keys().collect();
        assert_eq!(keys, vec!["hostname"]);
    }

    #[test]
    fn test_index_is_cached() {
        let conf = ConfNode::parse("a b\n");
        let first = conf.index() as *const _;
        let second = conf.index() as *const _;
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_index_is_cached_too() {
        let conf = ConfNode::parse("!\n");
        assert!(conf.index().is_empty());
        assert!(conf.index.get().is_some());
    }
}
