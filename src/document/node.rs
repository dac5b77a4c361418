//! Config node representation.
//!
//! A `ConfNode` is either a line of the source config together with the
//! lines indented under it, or a view produced by a query: the remainder of a
//! line after its leading keywords, or the merge of several sibling lines that
//! start with the same keyword. Views share their children with the tree they
//! came from, so creating one is cheap and never touches the source tree.
//!
//! # Example
//!
//! ```
//! use confquill::ConfNode;
//!
//! let conf = ConfNode::parse("interface Ethernet1\n    mtu 9000\n");
//! let iface = conf.get("interface");
//! assert!(iface.is_match());
//! assert_eq!(iface.trace(), "interface");
//! assert_eq!(iface.content(), Some("Ethernet1"));
//! ```

use super::index::KeywordIndex;
use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;

/// A node of the config tree, or a view into it.
#[derive(Clone, Default)]
pub struct ConfNode {
    /// Residual line text; `None` when the node matches nothing.
    pub(crate) content: Option<String>,
    /// The source line as read, used for verbatim output.
    pub(crate) original_text: String,
    /// Zero-based line position in the source.
    pub(crate) line_number: usize,
    /// Display keywords matched from the root down to this node.
    pub(crate) trace: Vec<String>,
    pub(crate) children: Arc<Vec<ConfNode>>,
    /// Keyword index, built on first query.
    pub(crate) index: OnceCell<Arc<KeywordIndex>>,
}

impl ConfNode {
    /// Creates a node for a line (or line remainder) with the given children.
    pub(crate) fn with_children(
        content: Option<String>,
        original_text: impl Into<String>,
        line_number: usize,
        children: Arc<Vec<ConfNode>>,
    ) -> Self {
        Self {
            content,
            original_text: original_text.into(),
            line_number,
            trace: Vec::new(),
            children,
            index: OnceCell::new(),
        }
    }

    /// A node that matches nothing.
    pub fn no_match() -> Self {
        Self::default()
    }

    /// Whether this node corresponds to anything in the config.
    ///
    /// An empty parse has no matches at all; a container with no text of its
    /// own (such as the root of a non-empty config) still matches.
    pub fn is_match(&self) -> bool {
        self.content.is_some()
    }

    /// The text left on this node's line after the matched keywords.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// The unmodified source line this node came from.
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    /// Zero-based source line, without requiring a single match.
    ///
    /// For merged views this is the line of the first contributor.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Matched keywords from the root, joined by spaces.
    pub fn trace(&self) -> String {
        self.trace.join(" ")
    }

    pub fn trace_keywords(&self) -> &[String] {
        &self.trace
    }

    /// Lines indented directly under this node, in source order.
    pub fn children(&self) -> &[ConfNode] {
        &self.children
    }

    /// Lines of the match, relative to the matched prefix.
    ///
    /// Yields the node's own residual text (if any) followed by every
    /// descendant line, depth first.
    pub fn lines(&self) -> Vec<String> {
        self.iter_lines(0, false)
            .into_iter()
            .map(|(line, _)| line.to_string())
            .collect()
    }

    /// Like [`lines`](Self::lines) but with the original source text.
    pub fn orig_lines(&self) -> Vec<String> {
        self.iter_lines(0, true)
            .into_iter()
            .map(|(line, _)| line.to_string())
            .collect()
    }

    /// Collects `(text, depth)` pairs for this subtree.
    pub(crate) fn iter_lines(&self, depth: isize, original: bool) -> Vec<(&str, isize)> {
        let mut out = Vec::new();
        self.collect_lines(depth, original, &mut out);
        out
    }

    fn collect_lines<'a>(&'a self, depth: isize, original: bool, out: &mut Vec<(&'a str, isize)>) {
        if let Some(content) = self.content.as_deref().filter(|c| !c.is_empty()) {
            let text = if original {
                self.original_text.as_str()
            } else {
                content
            };
            out.push((text, depth));
        }
        for child in self.children.iter() {
            child.collect_lines(depth + 1, original, out);
        }
    }
}

impl fmt::Debug for ConfNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConfNode(")?;
        if let Some(content) = self.content.as_deref().filter(|c| !c.is_empty()) {
            write!(f, "{:?}", content)?;
        }
        write!(f, ")")?;
        if !self.trace.is_empty() || self.content.is_some() {
            write!(f, "[{:?}]", self.trace())?;
        }
        Ok(())
    }
}

impl PartialEq for ConfNode {
    fn eq(&self, other: &Self) -> bool {
        self.content == other.content
            && self.original_text == other.original_text
            && self.line_number == other.line_number
            && self.trace == other.trace
            && self.children == other.children
    }
}

impl Eq for ConfNode {}
