//! Writing matched subtrees back out as text.
//!
//! A matched node is written with a `[trace]` header naming the path that
//! reached it, followed by its own line text (on the header line) and its
//! descendant lines, re-indented one unit per level. With no indent unit the
//! lines are written exactly as stored, which reproduces the source layout
//! when combined with original-text mode.

use super::node::ConfNode;
use std::fmt;
use std::io::{self, Write};

/// How `dump` lays out its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpOptions {
    /// Indentation unit per level; `None` writes each line as stored.
    pub indent: Option<String>,
    /// Write the `[trace]` header for nodes reached by a query.
    pub show_header: bool,
    /// Use the unmodified source lines instead of the matched remainder.
    pub use_original_text: bool,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            indent: Some("  ".to_string()),
            show_header: true,
            use_original_text: false,
        }
    }
}

impl DumpOptions {
    /// Options that indent with `unit` per level.
    pub fn with_indent(unit: impl Into<String>) -> Self {
        Self {
            indent: Some(unit.into()),
            ..Self::default()
        }
    }

    /// Options that write lines as stored, without re-indenting.
    pub fn no_indent() -> Self {
        Self {
            indent: None,
            ..Self::default()
        }
    }
}

impl ConfNode {
    /// Renders the subtree into a string.
    ///
    /// A node that matches nothing renders as the empty string.
    ///
    /// # Example
    ///
    /// ```
    /// use confquill::{ConfNode, DumpOptions};
    ///
    /// let conf = ConfNode::parse("stp mode mstp 1\n");
    /// let text = conf.get("stp").render(&DumpOptions::with_indent("    "));
    /// assert_eq!(text, "[stp] mode mstp 1\n");
    /// ```
    pub fn render(&self, options: &DumpOptions) -> String {
        let mut out = String::new();
        if self.content.is_none() {
            return out;
        }

        let header = options.show_header && !self.trace.is_empty();
        if header {
            out.push('[');
            out.push_str(&self.trace());
            out.push(']');
            let own_line = self.content.as_deref().is_some_and(|c| !c.is_empty());
            out.push(if own_line { ' ' } else { '\n' });
        }

        // The node's own line sits on the header, so its children start one level in.
        let base_depth = if header { 0 } else { -1 };
        for (line, depth) in self.iter_lines(base_depth, options.use_original_text) {
            match options.indent.as_deref() {
                Some(unit) => {
                    out.push_str(&unit.repeat(depth.max(0) as usize));
                    out.push_str(line.trim());
                }
                None => out.push_str(line),
            }
            out.push('\n');
        }
        out
    }

    /// Writes the rendered subtree to `out`.
    pub fn dump<W: Write>(&self, out: &mut W, options: &DumpOptions) -> io::Result<()> {
        out.write_all(self.render(options).as_bytes())
    }
}

impl fmt::Display for ConfNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&DumpOptions::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_match_renders_nothing() {
        assert_eq!(ConfNode::no_match().render(&DumpOptions::default()), "");
        assert_eq!(ConfNode::parse("").to_string(), "");
    }

    #[test]
    fn test_root_has_no_header() {
        let conf = ConfNode::parse("a\n    b\n");
        assert_eq!(conf.to_string(), "a\n  b\n");
    }

    #[test]
    fn test_header_can_be_hidden() {
        let conf = ConfNode::parse("stp mode mstp 1\n");
        let options = DumpOptions {
            show_header: false,
            ..DumpOptions::default()
        };
        assert_eq!(conf.get("stp").render(&options), "mode mstp 1\n");
    }

    #[test]
    fn test_dump_writes_to_sink() {
        let conf = ConfNode::parse("hostname r1\n");
        let mut buf: Vec<u8> = Vec::new();
        conf.dump(&mut buf, &DumpOptions::default()).unwrap();
        assert_eq!(buf, b"hostname r1\n");
    }
}
