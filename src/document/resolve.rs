//! Keyword lookups over the config tree.
//!
//! `get` walks a space-separated key one keyword at a time. Each step looks
//! the keyword up (case-insensitively) among the node's followers; when several
//! lines share that keyword they are merged into one container view, so
//! `get("interface")` answers for every `interface ...` line at once.
//!
//! Consider this config:
//!
//! ```text
//! interface Ethernet1/0/1
//!     ip address 10.0.0.1/24
//!     ip address 10.0.0.100/24 secondary
//!     spanning-tree enable
//! ```
//!
//! `get("interface Ethernet1/0/1 ip address")` matches the two address lines
//! and is the same node as
//! `get("interface").get("Ethernet1/0/1").get("ip").get("address")`.

use super::index::Bucket;
use super::node::ConfNode;
use super::token::next_token;
use std::sync::Arc;

impl ConfNode {
    /// Looks up a keyword path, returning a falsy node when nothing matches.
    ///
    /// An empty key returns the node itself.
    ///
    /// # Example
    ///
    /// ```
    /// use confquill::ConfNode;
    ///
    /// let conf = ConfNode::parse("snmp server 1\nsnmp server 2\n");
    /// assert!(conf.get("SNMP server 2").is_match());
    /// assert!(!conf.get("snmp server 3").is_match());
    /// assert_eq!(conf.get("snmp server"), conf.get("snmp").get("server"));
    /// ```
    pub fn get(&self, key: &str) -> ConfNode {
        let mut current = self.clone();
        let mut key = key;
        loop {
            let token = next_token(key);
            if token.canonical.is_empty() {
                return current;
            }
            current = match current.index().get(&token.canonical) {
                Some(bucket) => current.resolve_bucket(bucket),
                None => return ConfNode::no_match(),
            };
            if token.rest.is_empty() {
                return current;
            }
            key = token.rest;
        }
    }

    /// Turns an index bucket into the node reached through its keyword.
    pub(crate) fn resolve_bucket(&self, bucket: &Bucket) -> ConfNode {
        let mut found = match bucket.nodes.as_slice() {
            [] => return ConfNode::no_match(),
            [single] => single.clone(),
            [first, ..] => ConfNode::with_children(
                Some(String::new()),
                first.original_text.clone(),
                first.line_number,
                Arc::new(bucket.nodes.clone()),
            ),
        };
        found.trace = self.trace.clone();
        found.trace.push(bucket.keyword.clone());
        found
    }

    /// Whether `get(key)` matches anything.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_match()
    }

    /// Number of distinct keywords following this node.
    pub fn len(&self) -> usize {
        self.index().len()
    }

    pub fn is_empty(&self) -> bool {
        self.index().is_empty()
    }

    /// Distinct keywords following this node, in first-seen order.
    pub fn keywords(&self) -> Keywords<'_> {
        Keywords {
            inner: self.index().values(),
        }
    }

    /// Owned copy of [`keywords`](Self::keywords), usable on a temporary node.
    ///
    /// ```
    /// use confquill::ConfNode;
    ///
    /// let conf = ConfNode::parse("vlan 10\nvlan 20\n");
    /// assert_eq!(conf.get("vlan").keyword_list(), vec!["10", "20"]);
    /// ```
    pub fn keyword_list(&self) -> Vec<String> {
        self.keywords().map(str::to_string).collect()
    }

    /// `(keyword, node)` pairs, like a map's items.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ConfNode)> + '_ {
        self.index()
            .values()
            .map(move |bucket| (bucket.keyword.as_str(), self.resolve_bucket(bucket)))
    }

    /// The node reached through each following keyword.
    pub fn values(&self) -> impl Iterator<Item = ConfNode> + '_ {
        self.index()
            .values()
            .map(move |bucket| self.resolve_bucket(bucket))
    }

    /// The single keyword after `key`, or `None` if there is not exactly one.
    pub fn word_at(&self, key: &str) -> Option<String> {
        self.get(key).word().ok()
    }

    /// Like [`word_at`](Self::word_at) with a fallback value.
    pub fn word_at_or(&self, key: &str, default: &str) -> String {
        self.word_at(key).unwrap_or_else(|| default.to_string())
    }

    /// Like [`word_at`](Self::word_at), converting the word with `caster`.
    ///
    /// A missing or ambiguous word gives `Ok(None)`; conversion errors are
    /// returned as-is.
    ///
    /// # Example
    ///
    /// ```
    /// use confquill::ConfNode;
    ///
    /// let conf = ConfNode::parse("mtu 9000\n");
    /// let mtu = conf.word_at_with("mtu", |w| w.parse::<u32>()).unwrap();
    /// assert_eq!(mtu, Some(9000));
    /// let missing = conf.word_at_with("speed", |w| w.parse::<u32>()).unwrap();
    /// assert_eq!(missing, None);
    /// ```
    pub fn word_at_with<T, E, F>(&self, key: &str, caster: F) -> Result<Option<T>, E>
    where
        F: FnOnce(&str) -> Result<T, E>,
    {
        self.word_at(key).map(|word| caster(&word)).transpose()
    }
}

/// Iterator over the keywords following a node.
#[derive(Debug, Clone)]
pub struct Keywords<'a> {
    inner: indexmap::map::Values<'a, String, Bucket>,
}

impl<'a> Iterator for Keywords<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|bucket| bucket.keyword.as_str())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Keywords<'_> {}

impl<'a> IntoIterator for &'a ConfNode {
    type Item = &'a str;
    type IntoIter = Keywords<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.keywords()
    }
}
