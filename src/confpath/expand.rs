//! Wildcard expansion over the config tree.
//!
//! Expanding a query walks every path through the tree that the query
//! matches, depth first and in document order, and yields one [`Expansion`]
//! per complete match. Literal keywords only steer the walk; each glob keyword
//! contributes the keyword it matched, and a trailing `~` contributes the raw
//! text of the matched line. Expansion only reads the tree, so the same query
//! can be expanded again with identical results.

use super::ast::{ConfPath, Segment};
use crate::document::node::ConfNode;
use crate::error::Result;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// One complete match of an expansion query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Expansion {
    /// Captured values, in query order.
    pub captures: Vec<String>,
    /// The matched node, when requested with `expand_with_conf`.
    #[serde(skip)]
    pub node: Option<ConfNode>,
}

/// Lazy iterator over the expansions of a query.
pub struct Expand {
    inner: Box<dyn Iterator<Item = Expansion>>,
}

impl Iterator for Expand {
    type Item = Expansion;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl ConfPath {
    /// Expands this query starting at `node`.
    pub fn expand(&self, node: &ConfNode) -> Expand {
        self.expand_from(node, false)
    }

    /// Expands this query, attaching the matched node to each expansion.
    pub fn expand_with_conf(&self, node: &ConfNode) -> Expand {
        self.expand_from(node, true)
    }

    fn expand_from(&self, node: &ConfNode, with_conf: bool) -> Expand {
        debug!(
            segments = self.segments.len(),
            captures = self.capture_count(),
            trace = %node.trace(),
            "expanding query"
        );
        Expand {
            inner: walk(node.clone(), Arc::clone(&self.segments), 0, with_conf),
        }
    }
}

impl ConfNode {
    /// Iterates over every match of a query with wildcards.
    ///
    /// Each expansion holds one value per glob keyword (plus one for a
    /// trailing `~`).
    ///
    /// # Example
    ///
    /// ```
    /// use confquill::ConfNode;
    ///
    /// let conf = ConfNode::parse("\
    /// interface Po1
    ///     ip address 10.0.0.1/24
    /// interface Po2
    ///     ip address 10.0.1.1/24
    /// ");
    /// let found: Vec<Vec<String>> = conf
    ///     .expand("interface po* ip address *")
    ///     .unwrap()
    ///     .map(|e| e.captures)
    ///     .collect();
    /// assert_eq!(found, vec![vec!["Po1", "10.0.0.1/24"], vec!["Po2", "10.0.1.1/24"]]);
    /// ```
    pub fn expand(&self, query: &str) -> Result<Expand> {
        Ok(ConfPath::parse(query)?.expand(self))
    }

    /// Like [`expand`](Self::expand), also yielding the node each match ends on.
    pub fn expand_with_conf(&self, query: &str) -> Result<Expand> {
        Ok(ConfPath::parse(query)?.expand_with_conf(self))
    }
}

fn walk(
    node: ConfNode,
    segments: Arc<[Segment]>,
    at: usize,
    with_conf: bool,
) -> Box<dyn Iterator<Item = Expansion>> {
    let Some(segment) = segments.get(at).cloned() else {
        let node = with_conf.then_some(node);
        return Box::new(std::iter::once(Expansion {
            captures: Vec::new(),
            node,
        }));
    };

    match segment {
        Segment::TailCapture => Box::new(capture_tail(&node, with_conf).into_iter()),
        Segment::Literal(keyword) => match node.index().get(&keyword) {
            Some(bucket) => walk(node.resolve_bucket(bucket), segments, at + 1, with_conf),
            None => Box::new(std::iter::empty()),
        },
        Segment::Glob(glob) => {
            let matches = (0..node.len()).filter_map(move |i| {
                let (keyword, bucket) = node.index().get_index(i)?;
                glob.matches(keyword)
                    .then(|| (bucket.keyword.clone(), node.resolve_bucket(bucket)))
            });
            Box::new(matches.flat_map(move |(keyword, child)| {
                walk(child, Arc::clone(&segments), at + 1, with_conf).map(move |mut expansion| {
                    expansion.captures.insert(0, keyword.clone());
                    expansion
                })
            }))
        }
    }
}

/// Captures the raw text under a node for a trailing `~`.
///
/// A node with text of its own yields that text; a container yields the text
/// of each child line.
pub(crate) fn capture_tail(node: &ConfNode, with_conf: bool) -> Vec<Expansion> {
    match node.content().filter(|c| !c.is_empty()) {
        Some(line) => vec![tail_expansion(node, node, line, with_conf)],
        None => node
            .children()
            .iter()
            .filter_map(|child| {
                let line = child.content().filter(|c| !c.trim().is_empty())?;
                Some(tail_expansion(node, child, line, with_conf))
            })
            .collect(),
    }
}

fn tail_expansion(parent: &ConfNode, source: &ConfNode, line: &str, with_conf: bool) -> Expansion {
    let node = with_conf.then(|| {
        let content = if source.children.is_empty() {
            None
        } else {
            Some(String::new())
        };
        let mut view = ConfNode::with_children(
            content,
            source.original_text.clone(),
            source.line_number,
            Arc::clone(&source.children),
        );
        view.trace = parent.trace.clone();
        view.trace
            .extend(line.split_whitespace().map(str::to_string));
        view
    });
    Expansion {
        captures: vec![line.trim().to_string()],
        node,
    }
}
