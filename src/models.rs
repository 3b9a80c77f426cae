//! Data models shared by the extraction pipeline and the presenters.
//!
//! - [`RawFragment`]: text pulled from one matched node, before cleanup
//! - [`Headline`]: an accepted, normalized fragment
//! - [`HeadlineList`]: the ordered result of one extraction run
//! - [`RobotsVerdict`]: outcome of the robots.txt check

use crate::utils::collapse_whitespace;
use serde::Serialize;

/// Text extracted from a single node, tagged with the selector that found it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFragment {
    /// Name of the selector descriptor that matched the node.
    pub selector: String,
    /// Text content of the node, not yet normalized.
    pub text: String,
}

/// A headline that passed normalization and classification.
///
/// Only the pipeline constructs these, so holding one means its text was
/// within the configured length bounds when it was accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Headline {
    text: String,
    selector: String,
}

impl Headline {
    pub(crate) fn new(text: String, selector: String) -> Self {
        Self { text, selector }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Name of the selector descriptor the headline was accepted under.
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Key used for duplicate detection: lower-cased, whitespace-collapsed.
    pub fn dedup_key(&self) -> String {
        collapse_whitespace(&self.text).to_lowercase()
    }
}

/// Ordered headlines from one run, in document order of acceptance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HeadlineList(Vec<Headline>);

impl HeadlineList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// An empty list means the page was fetched and parsed but nothing on it
    /// looked like a headline.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Headline> {
        self.0.iter()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.0.iter().map(Headline::text).collect()
    }

    pub(crate) fn truncate(&mut self, limit: usize) {
        self.0.truncate(limit);
    }
}

impl From<Vec<Headline>> for HeadlineList {
    fn from(headlines: Vec<Headline>) -> Self {
        Self(headlines)
    }
}

impl<'a> IntoIterator for &'a HeadlineList {
    type Item = &'a Headline;
    type IntoIter = std::slice::Iter<'a, Headline>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Whether robots.txt permits fetching a URL, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RobotsVerdict {
    pub allowed: bool,
    pub reason: String,
}

impl RobotsVerdict {
    pub fn allow(reason: impl Into<String>) -> Self {
        Self {
            allowed: true,
            reason: reason.into(),
        }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_key_ignores_case_and_spacing() {
        let a = Headline::new("Sensex  Climbs 400 Points".to_string(), "a".to_string());
        let b = Headline::new("sensex climbs 400 points".to_string(), "b".to_string());
        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn test_headline_list_truncate() {
        let mut list = HeadlineList::from(vec![
            Headline::new("First headline text".to_string(), "s".to_string()),
            Headline::new("Second headline text".to_string(), "s".to_string()),
        ]);
        list.truncate(1);
        assert_eq!(list.texts(), vec!["First headline text"]);
        assert!(!list.is_empty());
    }

    #[test]
    fn test_headline_list_serializes_as_array() {
        let list = HeadlineList::from(vec![Headline::new(
            "Monsoon session to begin next week".to_string(),
            "headline-link".to_string(),
        )]);
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json[0]["text"], "Monsoon session to begin next week");
        assert_eq!(json[0]["selector"], "headline-link");
    }

    #[test]
    fn test_robots_verdict_constructors() {
        assert!(RobotsVerdict::allow("ok").allowed);
        assert!(!RobotsVerdict::deny("no").allowed);
    }
}
