//! Label selectors used to pick the workload a sync mapping targets.
//!
//! Selectors are written as comma-separated `key=value` pairs, e.g.
//! `release=myapp,tier=backend`. The empty expression is a valid selector
//! with no constraints.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SyncError;

/// Structured label selector (label key -> label value).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selector(BTreeMap<String, String>);

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a selector expression. See [`parse_selector`].
    pub fn parse(expr: &str) -> Result<Self, SyncError> {
        parse_selector(expr)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromStr for Selector {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_selector(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, value) in &self.0 {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{}={}", key, value)?;
            first = false;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Selector {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Parse a `key=value,key=value` expression into a [`Selector`].
///
/// The empty string yields an empty selector. Every comma-separated token
/// must contain exactly one `=`; otherwise the whole expression is reported
/// back in [`SyncError::InvalidSelector`]. Keys and values are trimmed, and a
/// repeated key keeps its last value.
pub fn parse_selector(expr: &str) -> Result<Selector, SyncError> {
    let mut selector = Selector::new();
    if expr.is_empty() {
        return Ok(selector);
    }

    for token in expr.split(',') {
        let parts: Vec<&str> = token.split('=').collect();
        let [key, value] = parts.as_slice() else {
            return Err(SyncError::InvalidSelector {
                expr: expr.to_string(),
            });
        };
        selector.insert(key.trim(), value.trim());
    }

    Ok(selector)
}

/// Whether two selectors denote the same target set.
///
/// Two empty selectors are equal. An empty selector is never equal to a
/// non-empty one: "no constraint" is not a wildcard here.
pub fn selectors_equal(a: &Selector, b: &Selector) -> bool {
    a.len() == b.len() && a.iter().all(|(key, value)| b.get(key) == Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sel(pairs: &[(&str, &str)]) -> Selector {
        pairs.iter().copied().collect()
    }

    #[test]
    fn parse_empty_is_unconstrained() {
        let selector = parse_selector("").unwrap();
        assert!(selector.is_empty());
    }

    #[test]
    fn parse_pairs() {
        let selector = parse_selector("release=myapp,tier=backend").unwrap();
        assert_eq!(selector.len(), 2);
        assert_eq!(selector.get("release"), Some("myapp"));
        assert_eq!(selector.get("tier"), Some("backend"));
    }

    #[test]
    fn parse_trims_keys_and_values() {
        let selector = parse_selector(" app = web ,  tier=  db").unwrap();
        assert_eq!(selector, sel(&[("app", "web"), ("tier", "db")]));
    }

    #[test]
    fn parse_last_duplicate_wins() {
        let selector = parse_selector("app=a,app=b").unwrap();
        assert_eq!(selector.len(), 1);
        assert_eq!(selector.get("app"), Some("b"));
    }

    #[test]
    fn parse_rejects_missing_value() {
        let err = parse_selector("a").unwrap_err();
        assert!(matches!(err, SyncError::InvalidSelector { ref expr } if expr == "a"));
    }

    #[test]
    fn parse_rejects_extra_equals() {
        assert!(matches!(
            parse_selector("a=b=c"),
            Err(SyncError::InvalidSelector { .. })
        ));
    }

    #[test]
    fn parse_error_reports_whole_expression() {
        let err = parse_selector("app=web,broken").unwrap_err();
        assert!(matches!(err, SyncError::InvalidSelector { ref expr } if expr == "app=web,broken"));
        assert_eq!(err.to_string(), "wrong selector format: app=web,broken");
    }

    #[test]
    fn parse_rejects_trailing_comma() {
        assert!(parse_selector("app=web,").is_err());
    }

    #[test]
    fn display_joins_sorted_pairs() {
        let selector = parse_selector("tier=db,app=web").unwrap();
        assert_eq!(selector.to_string(), "app=web,tier=db");
        assert_eq!(selector.to_string().parse::<Selector>().unwrap(), selector);
    }

    #[test]
    fn equality_is_reflexive_and_symmetric() {
        let a = sel(&[("app", "web"), ("tier", "db")]);
        let b = sel(&[("tier", "db"), ("app", "web")]);
        assert!(selectors_equal(&a, &a));
        assert!(selectors_equal(&a, &b));
        assert!(selectors_equal(&b, &a));
    }

    #[test]
    fn empty_selectors_are_equal() {
        assert!(selectors_equal(&Selector::new(), &Selector::new()));
    }

    #[test]
    fn empty_does_not_match_constrained() {
        let constrained = sel(&[("a", "b")]);
        assert!(!selectors_equal(&Selector::new(), &constrained));
        assert!(!selectors_equal(&constrained, &Selector::new()));
    }

    #[test]
    fn differing_values_are_not_equal() {
        assert!(!selectors_equal(&sel(&[("a", "b")]), &sel(&[("a", "c")])));
        assert!(!selectors_equal(&sel(&[("a", "b")]), &sel(&[("x", "b")])));
    }
}
