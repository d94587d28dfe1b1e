//! Session cookies parsed from a browser `Cookie` header string.

use std::collections::BTreeMap;
use std::fmt;

const CSRF_COOKIE: &str = "JSESSIONID";

/// Authenticated session cookies, parsed from a browser `Cookie` string.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SessionCookies {
    cookies: BTreeMap<String, String>,
}

impl SessionCookies {
    /// Parses `name=value; name2=value2`.
    ///
    /// Items without `=` are ignored; names and values are trimmed. Values
    /// may themselves contain `=`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let cookies = raw
            .split(';')
            .filter_map(|item| item.split_once('='))
            .map(|(name, value)| (name.trim(), value.trim()))
            .filter(|(name, _)| !name.is_empty())
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        Self { cookies }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// The `JSESSIONID` value without its surrounding quotes, or empty.
    #[must_use]
    pub fn csrf_token(&self) -> String {
        self.get(CSRF_COOKIE)
            .map(|v| v.trim_matches('"').to_string())
            .unwrap_or_default()
    }

    /// Value for the `Cookie` request header.
    #[must_use]
    pub fn header_value(&self) -> String {
        self.cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

impl fmt::Debug for SessionCookies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCookies")
            .field("names", &self.cookies.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_trims_pairs() {
        let cookies = SessionCookies::parse(r#" li_at = AQEDAT ; JSESSIONID="ajax:123" ;lang=v=2&lang=en-us"#);
        assert_eq!(cookies.len(), 3);
        assert_eq!(cookies.get("li_at"), Some("AQEDAT"));
        assert_eq!(cookies.get("JSESSIONID"), Some("\"ajax:123\""));
        assert_eq!(cookies.get("lang"), Some("v=2&lang=en-us"));
    }

    #[test]
    fn items_without_equals_are_ignored() {
        let cookies = SessionCookies::parse("flag; =orphan; a=1;;");
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies.get("a"), Some("1"));
    }

    #[test]
    fn csrf_token_strips_quotes() {
        let cookies = SessionCookies::parse(r#"JSESSIONID="ajax:4242""#);
        assert_eq!(cookies.csrf_token(), "ajax:4242");
        assert_eq!(SessionCookies::parse("li_at=x").csrf_token(), "");
    }

    #[test]
    fn header_value_joins_pairs() {
        let cookies = SessionCookies::parse("b=2; a=1");
        assert_eq!(cookies.header_value(), "a=1; b=2");
    }

    #[test]
    fn debug_hides_values() {
        let cookies = SessionCookies::parse("li_at=super-secret");
        let rendered = format!("{cookies:?}");
        assert!(rendered.contains("li_at"));
        assert!(!rendered.contains("super-secret"));
    }

    #[test]
    fn empty_input() {
        assert!(SessionCookies::parse("").is_empty());
        assert!(SessionCookies::parse("  ").is_empty());
    }
}
