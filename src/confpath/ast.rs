//! Parsed form of an expansion query.
//!
//! A query such as `interface po* ip address *` is split into keywords with
//! the config tokenizer, and each keyword is classified once: a glob pattern
//! (contains `*`, `?` or `[`), the `~` tail capture, or a literal keyword.

use crate::document::token::tokens;
use crate::error::{ConfError, Result};
use glob::{MatchOptions, Pattern};
use std::sync::Arc;

const GLOB_CHARS: [char; 3] = ['*', '?', '['];
const TAIL_CAPTURE: &str = "~";

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// A shell-style wildcard matched against keywords.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobSegment {
    raw: String,
    pattern: Option<Pattern>,
}

impl GlobSegment {
    pub fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            pattern: compile_glob(raw),
        }
    }

    /// The pattern as written in the query.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Case-insensitive match against a keyword.
    pub fn matches(&self, keyword: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|pattern| pattern.matches_with(keyword, MATCH_OPTIONS))
    }
}

/// Compiles a shell wildcard into a glob pattern.
///
/// `*` already spans `/`, so repeated stars collapse to one. A `[` that opens
/// no complete class matches itself, as in shell globbing; other classes in
/// the same pattern keep working.
fn compile_glob(raw: &str) -> Option<Pattern> {
    let mut collapsed = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch == '*' && collapsed.ends_with('*') {
            continue;
        }
        collapsed.push(ch);
    }
    Pattern::new(&collapsed)
        .or_else(|_| Pattern::new(&escape_unclosed_classes(&collapsed)))
        .or_else(|_| Pattern::new(&Pattern::escape(raw)))
        .ok()
}

/// Rewrites each `[` without a closing `]` as the literal class `[[]`.
fn escape_unclosed_classes(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() + 2);
    let mut i = 0;
    while i < chars.len() {
        if chars[i] != '[' {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        match class_end(&chars, i) {
            Some(end) => {
                out.extend(&chars[i..=end]);
                i = end + 1;
            }
            None => {
                out.push_str("[[]");
                i += 1;
            }
        }
    }
    out
}

/// Position of the `]` closing the class opened at `start`.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut i = start + 1;
    if chars.get(i) == Some(&'!') {
        i += 1;
    }
    // a leading `]` is a member of the class
    if chars.get(i) == Some(&']') {
        i += 1;
    }
    chars
        .get(i..)?
        .iter()
        .position(|&c| c == ']')
        .map(|offset| i + offset)
}

/// One keyword position of a query.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// An exact keyword, stored lowercase. Not captured.
    Literal(String),
    /// A wildcard; every matching keyword is captured.
    Glob(GlobSegment),
    /// `~`: capture the raw remaining text of each matched line.
    TailCapture,
}

impl Segment {
    /// Classifies a single query keyword.
    pub fn classify(keyword: &str) -> Self {
        if keyword == TAIL_CAPTURE {
            Segment::TailCapture
        } else if keyword.contains(GLOB_CHARS) {
            Segment::Glob(GlobSegment::new(keyword))
        } else {
            Segment::Literal(keyword.to_lowercase())
        }
    }

    /// Whether this segment adds a value to each expansion.
    pub fn is_capture(&self) -> bool {
        !matches!(self, Segment::Literal(_))
    }
}

/// A parsed expansion query.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfPath {
    pub(crate) segments: Arc<[Segment]>,
}

impl ConfPath {
    /// Parses a query string.
    ///
    /// Fails with [`ConfError::InvalidQueryUsage`] when `~` is not the last
    /// keyword.
    ///
    /// # Example
    ///
    /// ```
    /// use confquill::confpath::{ConfPath, Segment};
    ///
    /// let path = ConfPath::parse("interface * description ~").unwrap();
    /// assert_eq!(path.segments().len(), 4);
    /// assert_eq!(path.segments()[3], Segment::TailCapture);
    /// assert!(ConfPath::parse("interface ~ description").is_err());
    /// ```
    pub fn parse(query: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut words = tokens(query).peekable();
        while let Some(token) = words.next() {
            let segment = Segment::classify(token.display);
            if segment == Segment::TailCapture && words.peek().is_some() {
                return Err(ConfError::InvalidQueryUsage {
                    query: query.to_string(),
                });
            }
            segments.push(segment);
        }
        Ok(Self {
            segments: segments.into(),
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of values each expansion carries, not counting the node.
    pub fn capture_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_capture()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(Segment::classify("~"), Segment::TailCapture);
        assert_eq!(
            Segment::classify("Ethernet1/0/1"),
            Segment::Literal("ethernet1/0/1".to_string())
        );
        assert!(matches!(Segment::classify("po*"), Segment::Glob(_)));
        assert!(matches!(Segment::classify("ge-0/0/?"), Segment::Glob(_)));
        assert!(matches!(Segment::classify("[ab]x"), Segment::Glob(_)));
    }

    #[test]
    fn test_glob_is_case_insensitive() {
        let glob = GlobSegment::new("PO*");
        assert!(glob.matches("port-channel1"));
        assert!(glob.matches("Port-Channel1"));
        assert!(!glob.matches("ethernet1"));
    }

    #[test]
    fn test_glob_star_spans_slashes() {
        let glob = GlobSegment::new("ethernet*");
        assert!(glob.matches("ethernet1/0/1"));
        assert!(GlobSegment::new("a**b").matches("a/x/b"));
    }

    #[test]
    fn test_glob_classes() {
        let glob = GlobSegment::new("vlan[12]?");
        assert!(glob.matches("vlan10"));
        assert!(glob.matches("vlan29"));
        assert!(!glob.matches("vlan30"));
        assert!(GlobSegment::new("[!a]*").matches("bx"));
        assert!(!GlobSegment::new("[!a]*").matches("ax"));
    }

    #[test]
    fn test_unclosed_bracket_is_literal() {
        let glob = GlobSegment::new("a[b*");
        assert!(glob.matches("a[bcd"));
        assert!(!glob.matches("ab"));
    }

    #[test]
    fn test_unclosed_bracket_keeps_earlier_class() {
        let glob = GlobSegment::new("[a]x[");
        assert!(glob.matches("ax["));
        assert!(glob.matches("AX["));
        assert!(!glob.matches("bx["));
        assert_eq!(escape_unclosed_classes("[a]x[b"), "[a]x[[]b");
        assert_eq!(escape_unclosed_classes("[]]x["), "[]]x[[]");
    }

    #[test]
    fn test_parse_drops_terminators_and_comments() {
        let path = ConfPath::parse("rate *; # trailing").unwrap();
        assert_eq!(path.segments().len(), 2);
        assert_eq!(path.capture_count(), 1);
    }

    #[test]
    fn test_tail_capture_must_be_last() {
        let err = ConfPath::parse("a ~ b").unwrap_err();
        assert!(matches!(err, ConfError::InvalidQueryUsage { .. }));
        assert!(ConfPath::parse("a ~").is_ok());
        assert!(ConfPath::parse("").unwrap().segments().is_empty());
    }
}
