//! Scalar accessors.
//!
//! These read a value out of a matched node. Most of them insist that exactly
//! one keyword follows the node and fail with [`ConfError::NoMatch`] or
//! [`ConfError::AmbiguousMatch`] otherwise; probe with `get`/`is_match`
//! first, or use `word_at`, when a value may legitimately be absent.

use super::node::ConfNode;
use super::token::tokens;
use crate::confpath::expand::capture_tail;
use crate::error::{ConfError, Result};
use ipnet::IpNet;
use std::net::IpAddr;

impl ConfNode {
    /// Returns the only keyword following this node.
    fn sole_keyword(&self) -> Result<&str> {
        let index = self.index();
        match index.len() {
            0 => Err(ConfError::NoMatch {
                trace: self.trace(),
                line: self.line_number,
            }),
            1 => Ok(index
                .get_index(0)
                .map(|(_, bucket)| bucket.keyword.as_str())
                .unwrap_or_default()),
            count => Err(ConfError::AmbiguousMatch {
                count,
                trace: self.trace(),
                line: self.line_number,
            }),
        }
    }

    /// The single keyword that follows this node.
    ///
    /// # Example
    ///
    /// ```
    /// use confquill::ConfNode;
    ///
    /// let conf = ConfNode::parse("stp mode mstp 1\n");
    /// assert_eq!(conf.get("stp").word().unwrap(), "mode");
    /// assert_eq!(conf.get("stp mode").word().unwrap(), "mstp");
    /// ```
    pub fn word(&self) -> Result<String> {
        self.sole_keyword().map(str::to_string)
    }

    /// The rest of the matched line as space-separated keywords.
    ///
    /// Comments and a trailing `;` are left out.
    pub fn tail(&self) -> Result<String> {
        self.sole_keyword()?;
        let words: Vec<&str> = tokens(self.content.as_deref().unwrap_or_default())
            .map(|token| token.display)
            .collect();
        Ok(words.join(" "))
    }

    /// Raw text of each matched line; the same as expanding `~`.
    pub fn tails(&self) -> Vec<String> {
        capture_tail(self, false)
            .into_iter()
            .filter_map(|expansion| expansion.captures.into_iter().next())
            .collect()
    }

    /// A quoted string following this node, without the quotes.
    ///
    /// Falls back to [`word`](Self::word) when the text is not quoted.
    pub fn quoted(&self) -> Result<String> {
        let word = self.sole_keyword()?;
        let content = self.content.as_deref().unwrap_or_default();
        let Some(quote) = content.chars().next().filter(|c| *c == '"' || *c == '\'') else {
            return Ok(word.to_string());
        };
        match content[1..].find(quote) {
            Some(end) => Ok(content[1..1 + end].to_string()),
            None => Err(ConfError::UnterminatedQuote {
                quote,
                trace: self.trace(),
                line: self.line_number,
                content: content.to_string(),
            }),
        }
    }

    /// The following keyword as an integer.
    pub fn int(&self) -> Result<i64> {
        parse_int(self.sole_keyword()?)
    }

    /// Every following keyword as an integer.
    pub fn ints(&self) -> Result<Vec<i64>> {
        self.keywords().map(parse_int).collect()
    }

    /// Source line of the single match.
    pub fn lineno(&self) -> Result<usize> {
        self.sole_keyword()?;
        Ok(self.line_number)
    }

    /// Keywords inside a JunOS-style `[ ... ]` list.
    ///
    /// Anything that is not a bracketed list gives a one-element list with
    /// the following keyword.
    ///
    /// # Example
    ///
    /// ```
    /// use confquill::ConfNode;
    ///
    /// let conf = ConfNode::parse("apply-groups [ one two three ];\nrate 1;\n");
    /// assert_eq!(conf.get("apply-groups").junos_list().unwrap(), vec!["one", "two", "three"]);
    /// assert_eq!(conf.get("rate").junos_list().unwrap(), vec!["1"]);
    /// ```
    pub fn junos_list(&self) -> Result<Vec<String>> {
        let word = self.word()?;
        if self.content.as_deref().is_some_and(|c| c.starts_with('[')) {
            let tail = self.tail()?;
            let items: Vec<&str> = tail.split_whitespace().collect();
            if let ["[", inner @ .., "]"] = items.as_slice() {
                return Ok(inner.iter().map(|s| s.to_string()).collect());
            }
        }
        Ok(vec![word])
    }

    /// The following keyword as an IP address.
    pub fn ip(&self) -> Result<IpAddr> {
        parse_ip(self.sole_keyword()?)
    }

    /// Every following keyword as an IP address.
    pub fn ips(&self) -> Result<Vec<IpAddr>> {
        self.keywords().map(parse_ip).collect()
    }

    /// The following keyword as an IP network.
    ///
    /// A bare address is a host network (`/32` or `/128`); a prefix with host
    /// bits set is rejected.
    pub fn cidr(&self) -> Result<IpNet> {
        parse_network(self.sole_keyword()?)
    }

    /// Every following keyword as an IP network.
    pub fn cidrs(&self) -> Result<Vec<IpNet>> {
        self.keywords().map(parse_network).collect()
    }
}

fn parse_int(value: &str) -> Result<i64> {
    value.parse().map_err(|source| ConfError::NotANumber {
        value: value.to_string(),
        source,
    })
}

fn parse_ip(value: &str) -> Result<IpAddr> {
    value.parse().map_err(|source| ConfError::NotAnAddress {
        value: value.to_string(),
        source,
    })
}

fn parse_network(value: &str) -> Result<IpNet> {
    let net = match value.parse::<IpNet>() {
        Ok(net) => net,
        Err(net_err) => match value.parse::<IpAddr>() {
            Ok(addr) => {
                let host_prefix = if addr.is_ipv4() { 32 } else { 128 };
                IpNet::new(addr, host_prefix).map_err(|err| ConfError::NotANetwork {
                    value: value.to_string(),
                    reason: err.to_string(),
                })?
            }
            Err(_) => {
                return Err(ConfError::NotANetwork {
                    value: value.to_string(),
                    reason: net_err.to_string(),
                })
            }
        },
    };
    if net.trunc() != net {
        return Err(ConfError::NotANetwork {
            value: value.to_string(),
            reason: "host bits set".to_string(),
        });
    }
    Ok(net)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_network_forms() {
        assert_eq!(
            parse_network("10.0.0.0/24").unwrap(),
            "10.0.0.0/24".parse::<IpNet>().unwrap()
        );
        assert_eq!(
            parse_network("10.0.0.1").unwrap(),
            "10.0.0.1/32".parse::<IpNet>().unwrap()
        );
        assert_eq!(
            parse_network("2001:db8::1").unwrap(),
            "2001:db8::1/128".parse::<IpNet>().unwrap()
        );
    }

    #[test]
    fn test_parse_network_rejects_host_bits() {
        let err = parse_network("10.0.0.1/24").unwrap_err();
        assert!(matches!(err, ConfError::NotANetwork { .. }));
        assert!(err.to_string().contains("host bits set"));
    }

    #[test]
    fn test_parse_network_rejects_garbage() {
        assert!(matches!(
            parse_network("vlan10"),
            Err(ConfError::NotANetwork { .. })
        ));
    }

    #[test]
    fn test_parse_int_error() {
        let err = parse_int("12a").unwrap_err();
        assert!(matches!(err, ConfError::NotANumber { ref value, .. } if value == "12a"));
    }

    #[test]
    fn test_quoted_unterminated() {
        let conf = ConfNode::parse("description \"broken\n");
        let err = conf.get("description").quoted().unwrap_err();
        assert!(matches!(err, ConfError::UnterminatedQuote { quote: '"', .. }));
    }

    #[test]
    fn test_quoted_single_quotes() {
        let conf = ConfNode::parse("banner 'hello there' tail\n");
        assert_eq!(conf.get("banner").quoted().unwrap(), "hello there");
    }

    #[test]
    fn test_quoted_falls_back_to_word() {
        let conf = ConfNode::parse("description plain text\n");
        assert_eq!(conf.get("description").quoted().unwrap(), "plain");
    }

    #[test]
    fn test_junos_list_unbalanced_brackets() {
        let conf = ConfNode::parse("members [ a b\n");
        assert_eq!(conf.get("members").junos_list().unwrap(), vec!["["]);
    }

    #[test]
    fn test_junos_list_empty_brackets() {
        let conf = ConfNode::parse("members [ ];\n");
        assert!(conf.get("members").junos_list().unwrap().is_empty());
    }
}
