//! Keyword tokenizer for config lines.
//!
//! A line is consumed one keyword at a time: the first whitespace-delimited
//! word becomes the keyword and everything after the following whitespace run
//! is the remainder. Block delimiters and comment markers end the line, and a
//! trailing `;` statement terminator is dropped from the last keyword.

/// Words that carry no keyword semantics and end tokenization.
const STRUCTURAL_MARKERS: [&str; 4] = ["{", "}", "#", "!"];

/// Characters that start an inline comment after a terminated statement.
const COMMENT_MARKERS: [char; 2] = ['#', '!'];

/// A single keyword split off the front of a line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Token<'a> {
    /// Lowercase form, used for matching.
    pub canonical: String,
    /// Original-case form, used for results and output.
    pub display: &'a str,
    /// Text following the keyword, leading whitespace removed.
    pub rest: &'a str,
}

impl<'a> Token<'a> {
    /// The "no token" value: nothing matched and nothing remains.
    pub fn none() -> Self {
        Self::default()
    }

    /// True when no keyword was extracted.
    ///
    /// A lone `;` yields an empty keyword while `rest` may still hold text.
    pub fn is_empty(&self) -> bool {
        self.display.is_empty()
    }
}

/// Splits the leading keyword off `text`.
///
/// # Example
///
/// ```
/// use confquill::document::token::next_token;
///
/// let token = next_token("  Port 2055; # flow collector");
/// assert_eq!(token.canonical, "port");
/// assert_eq!(token.display, "Port");
/// assert_eq!(token.rest, "2055; # flow collector");
/// ```
pub fn next_token(text: &str) -> Token<'_> {
    let text = text.trim_start();
    if text.is_empty() {
        return Token::none();
    }

    let (word, rest) = match text.find(char::is_whitespace) {
        Some(pos) => (&text[..pos], text[pos..].trim_start()),
        None => (text, ""),
    };

    if STRUCTURAL_MARKERS.contains(&word) {
        return Token::none();
    }

    let display = match word.strip_suffix(';') {
        Some(stripped) if rest.is_empty() || rest.starts_with(COMMENT_MARKERS) => stripped,
        _ => word,
    };

    Token {
        canonical: display.to_lowercase(),
        display,
        rest,
    }
}

/// Iterator over every keyword of a line, in order.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.rest.is_empty() {
            let token = next_token(self.rest);
            self.rest = token.rest;
            if !token.is_empty() {
                return Some(token);
            }
        }
        None
    }
}

/// Tokenizes `text` until it is exhausted or a structural marker is reached.
pub fn tokens(text: &str) -> Tokens<'_> {
    Tokens { rest: text }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_blank_lines() {
        assert!(next_token("").is_empty());
        assert!(next_token("   \t").is_empty());
        assert_eq!(next_token("   ").rest, "");
    }

    #[test]
    fn test_single_word() {
        let token = next_token("Shutdown");
        assert_eq!(token.canonical, "shutdown");
        assert_eq!(token.display, "Shutdown");
        assert_eq!(token.rest, "");
    }

    #[test]
    fn test_rest_keeps_inner_spacing() {
        let token = next_token("description  hello   world");
        assert_eq!(token.display, "description");
        assert_eq!(token.rest, "hello   world");
    }

    #[test]
    fn test_structural_markers() {
        for line in ["{", "}", "# comment", "! section", "  }"] {
            let token = next_token(line);
            assert!(token.is_empty(), "{line:?} should yield no token");
            assert_eq!(token.rest, "");
        }
    }

    #[test]
    fn test_marker_glued_to_word_is_a_keyword() {
        assert_eq!(next_token("#hash").display, "#hash");
    }

    #[test]
    fn test_terminator_stripped() {
        assert_eq!(next_token("port 2055;").display, "port");
        assert_eq!(next_token("2055;").display, "2055");
        assert_eq!(next_token("5; # comment").display, "5");
        assert_eq!(next_token("5; ! comment").display, "5");
    }

    #[test]
    fn test_terminator_kept_mid_line() {
        let token = next_token("a; b");
        assert_eq!(token.display, "a;");
        assert_eq!(token.rest, "b");
    }

    #[test]
    fn test_lone_terminator() {
        let token = next_token("; # done");
        assert!(token.is_empty());
        assert_eq!(token.rest, "# done");
    }

    #[test]
    fn test_tokens_stop_at_comment() {
        let words: Vec<&str> = tokens("rate 1; # Samples 1 out of x packets")
            .map(|t| t.display)
            .collect();
        assert_eq!(words, vec!["rate", "1"]);
    }

    #[test]
    fn test_tokens_brackets() {
        let words: Vec<&str> = tokens("[ one two three ];").map(|t| t.display).collect();
        assert_eq!(words, vec!["[", "one", "two", "three", "]"]);
    }
}
