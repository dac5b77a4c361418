//! Error types for config queries.
//!
//! Lookups through `ConfNode::get` never fail; a miss is just a falsy node.
//! The accessors that need exactly one matching keyword, and the casts built
//! on top of them, report failures through [`ConfError`].

use std::net::AddrParseError;
use std::num::ParseIntError;
use thiserror::Error;

/// Errors raised by scalar accessors and query parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfError {
    /// No keyword follows the node.
    #[error("No entries in node [{trace:?}], line {line}")]
    NoMatch { trace: String, line: usize },

    /// More than one distinct keyword follows the node.
    #[error("Multiple entries ({count}) match the key [{trace:?}], line {line}")]
    AmbiguousMatch {
        count: usize,
        trace: String,
        line: usize,
    },

    /// An opening quote without its closing counterpart.
    #[error("No ending <{quote}> found in [{trace:?}], line {line}: {content:?}")]
    UnterminatedQuote {
        quote: char,
        trace: String,
        line: usize,
        content: String,
    },

    /// The `~` capture marker was followed by more tokens.
    #[error("'~' should be the last token in query {query:?}")]
    InvalidQueryUsage { query: String },

    #[error("Not a number: {value:?}")]
    NotANumber {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Not an IP address: {value:?}")]
    NotAnAddress {
        value: String,
        #[source]
        source: AddrParseError,
    },

    #[error("Not an IP network: {value:?} ({reason})")]
    NotANetwork { value: String, reason: String },
}

/// Result alias used throughout the query API.
pub type Result<T> = std::result::Result<T, ConfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_match_message() {
        let err = ConfError::NoMatch {
            trace: "interface IF1".to_string(),
            line: 3,
        };
        assert_eq!(
            err.to_string(),
            "No entries in node [\"interface IF1\"], line 3"
        );
    }

    #[test]
    fn test_ambiguous_match_message() {
        let err = ConfError::AmbiguousMatch {
            count: 2,
            trace: "interface IF1 ip".to_string(),
            line: 4,
        };
        assert!(err.to_string().starts_with("Multiple entries (2)"));
    }

    #[test]
    fn test_not_a_number_keeps_source() {
        let source = "x1".parse::<i64>().unwrap_err();
        let err = ConfError::NotANumber {
            value: "x1".to_string(),
            source,
        };
        assert!(std::error::Error::source(&err).is_some());
    }
}
