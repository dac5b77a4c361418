//! Builds a config tree from indented text.
//!
//! Nesting follows indentation only: a line indented deeper than the line
//! above it becomes that line's child, otherwise it closes every open block
//! indented at least as deep. Depth is compared by the *number* of leading
//! whitespace characters, so a tab and a space count the same. Nothing is
//! ever rejected; badly indented input simply produces a different tree.
//!
//! # Example
//!
//! ```
//! use confquill::ConfNode;
//!
//! let conf = ConfNode::parse("router bgp 65000\n  neighbor 10.0.0.1 remote-as 65001\n");
//! assert_eq!(conf.children().len(), 1);
//! assert_eq!(conf.children()[0].children().len(), 1);
//! ```

use super::node::ConfNode;
use std::sync::Arc;
use tracing::debug;

/// A line whose children are still being collected.
struct OpenBlock {
    text: String,
    line_number: usize,
    indent: usize,
    children: Vec<ConfNode>,
}

impl OpenBlock {
    fn close(self) -> ConfNode {
        ConfNode::with_children(
            Some(self.text.clone()),
            self.text,
            self.line_number,
            Arc::new(self.children),
        )
    }
}

impl ConfNode {
    /// Parses config text into a tree.
    ///
    /// Lines end at `\n`, `\r\n` or a lone `\r`.
    pub fn parse(text: &str) -> Self {
        Self::from_lines(split_lines(text))
    }

    /// Parses a sequence of config lines into a tree.
    ///
    /// Lines may carry their own trailing newline; trailing whitespace is
    /// dropped and whitespace-only lines are skipped.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut top_level: Vec<ConfNode> = Vec::new();
        let mut stack: Vec<OpenBlock> = Vec::new();
        let mut count = 0usize;

        for (line_number, line) in lines.into_iter().enumerate() {
            let line = line.as_ref().trim_end();
            if line.is_empty() {
                continue;
            }
            let indent = line.chars().take_while(|c| c.is_whitespace()).count();

            while stack.last().is_some_and(|open| open.indent >= indent) {
                if let Some(open) = stack.pop() {
                    attach(&mut stack, &mut top_level, open.close());
                }
            }

            stack.push(OpenBlock {
                text: line.to_string(),
                line_number,
                indent,
                children: Vec::new(),
            });
            count += 1;
        }

        while let Some(open) = stack.pop() {
            attach(&mut stack, &mut top_level, open.close());
        }

        debug!(
            lines = count,
            top_level = top_level.len(),
            "parsed config tree"
        );

        let content = if top_level.is_empty() {
            None
        } else {
            Some(String::new())
        };
        ConfNode::with_children(content, "", 0, Arc::new(top_level))
    }
}

/// Splits text into lines, treating `\r\n` as a single break.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let Some(pos) = rest.find(['\n', '\r']) else {
            return Some(std::mem::take(&mut rest));
        };
        let line = &rest[..pos];
        let width = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[pos + width..];
        Some(line)
    })
}

/// Hands a finished line to the innermost open block, or to the root.
fn attach(stack: &mut [OpenBlock], top_level: &mut Vec<ConfNode>, node: ConfNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => top_level.push(node),
    }
}

#[cfg(test)]
mod tests {
    use crate::ConfNode;

    #[test]
    fn test_empty_input_matches_nothing() {
        let conf = ConfNode::parse("");
        assert!(!conf.is_match());
        assert!(conf.children().is_empty());

        let blank = ConfNode::parse("\n   \n\t\n");
        assert!(!blank.is_match());
    }

    #[test]
    fn test_root_is_truthy_container() {
        let conf = ConfNode::parse("hostname r1\n");
        assert_eq!(conf.content(), Some(""));
        assert!(conf.trace_keywords().is_empty());
    }

    #[test]
    fn test_nesting_and_line_numbers() {
        let conf = ConfNode::parse("a\n  b\n    c\n  d\n\ne\n");
        let top = conf.children();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].content(), Some("a"));
        assert_eq!(top[0].children().len(), 2);
        assert_eq!(top[0].children()[0].children()[0].content(), Some("    c"));
        assert_eq!(top[0].children()[1].line_number(), 3);
        assert_eq!(top[1].content(), Some("e"));
        assert_eq!(top[1].line_number(), 5);
    }

    #[test]
    fn test_dedent_to_intermediate_level() {
        // "c" closes "b" but still nests under "a"
        let conf = ConfNode::parse("a\n    b\n  c\n");
        let a = &conf.children()[0];
        assert_eq!(a.children().len(), 2);
        assert_eq!(a.children()[1].content(), Some("  c"));
    }

    #[test]
    fn test_indentation_compared_by_length() {
        let conf = ConfNode::parse("a\n\tb\n c\n");
        let a = &conf.children()[0];
        assert_eq!(a.children().len(), 2);
    }

    #[test]
    fn test_indented_first_line() {
        let conf = ConfNode::parse("    a\n    b\n        c\n");
        assert_eq!(conf.children().len(), 2);
        assert_eq!(conf.children()[1].children().len(), 1);
    }

    #[test]
    fn test_carriage_return_line_endings() {
        let conf = ConfNode::parse("hostname r1\rinterface IF1\r  mtu 9000\r");
        assert_eq!(conf.keyword_list(), vec!["hostname", "interface"]);
        assert!(conf.get("interface IF1 mtu").is_match());
        assert_eq!(conf.get("interface IF1 mtu").lineno().unwrap(), 2);
    }

    #[test]
    fn test_mixed_line_endings_keep_line_numbers() {
        let conf = ConfNode::parse("a\r\n  b\r\rc\nd");
        let top = conf.children();
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].children()[0].line_number(), 1);
        // the blank line between "\r" and "\r" still counts
        assert_eq!(top[1].content(), Some("c"));
        assert_eq!(top[1].line_number(), 3);
        assert_eq!(top[2].line_number(), 4);
    }

    #[test]
    fn test_trailing_whitespace_dropped() {
        let conf = ConfNode::from_lines(vec!["hostname r1   \r\n"]);
        assert_eq!(conf.children()[0].content(), Some("hostname r1"));
        assert_eq!(conf.children()[0].original_text(), "hostname r1");
    }
}
