//! Headline vs. noise classification.
//!
//! Rules are evaluated in a fixed order and the first match rejects:
//!
//! 1. known section/navigation label (near-exact, case-insensitive)
//! 2. promotional suffix ("View All", "Read More")
//! 3. blocked phrase anywhere ("follow us", "sign in")
//! 4. short all-caps banner
//! 5. shorter than the minimum length
//! 6. longer than the maximum length
//! 7. no alphabetic content at all
//!
//! Lengths are counted in characters, not bytes.

use crate::config::ExtractionConfig;
use crate::utils::collapse_whitespace;
use std::collections::HashSet;
use std::fmt;

/// Why a fragment was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    CategoryLabel,
    PromoSuffix,
    BlockedPhrase,
    ShoutingLabel,
    TooShort,
    TooLong,
    NoAlphabetic,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::CategoryLabel => "category label",
            Self::PromoSuffix => "promotional suffix",
            Self::BlockedPhrase => "blocked phrase",
            Self::ShoutingLabel => "all-caps banner",
            Self::TooShort => "too short",
            Self::TooLong => "too long",
            Self::NoAlphabetic => "no alphabetic content",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject(Rejection),
}

impl Verdict {
    pub fn is_accept(self) -> bool {
        matches!(self, Self::Accept)
    }
}

/// Classification rules prepared from [`ExtractionConfig`].
#[derive(Debug, Clone)]
pub struct Classifier {
    labels: HashSet<String>,
    promo_suffixes: Vec<String>,
    blocked_phrases: Vec<String>,
    shouting_max_words: usize,
    shouting_max_chars: usize,
    min_len: usize,
    max_len: usize,
}

impl Classifier {
    pub fn from_config(config: &ExtractionConfig) -> Self {
        let lowered = |items: &[String]| {
            items
                .iter()
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
        };

        Self {
            labels: config
                .category_labels
                .iter()
                .map(|label| label_key(label))
                .filter(|key| !key.is_empty())
                .collect(),
            promo_suffixes: lowered(&config.promo_suffixes),
            blocked_phrases: lowered(&config.blocked_phrases),
            shouting_max_words: config.shouting_label_max_words,
            shouting_max_chars: config.shouting_label_max_chars,
            min_len: config.min_headline_length,
            max_len: config.max_headline_length,
        }
    }

    /// Classify an already normalized fragment.
    pub fn classify(&self, text: &str) -> Verdict {
        let text = text.trim();
        let lower = text.to_lowercase();
        let len = text.chars().count();

        if self.labels.contains(&label_key(text)) {
            return Verdict::Reject(Rejection::CategoryLabel);
        }
        if let Some(rejection) = self.promo_rule(&lower) {
            return Verdict::Reject(rejection);
        }
        if self.is_shouting_label(text, len) {
            return Verdict::Reject(Rejection::ShoutingLabel);
        }
        if len < self.min_len {
            return Verdict::Reject(Rejection::TooShort);
        }
        if len > self.max_len {
            return Verdict::Reject(Rejection::TooLong);
        }
        if !text.chars().any(char::is_alphabetic) {
            return Verdict::Reject(Rejection::NoAlphabetic);
        }
        Verdict::Accept
    }

    /// Promo and blocked-phrase rules against a raw, not yet normalized
    /// fragment. Normalization may split a trailing "READ MORE" off as a
    /// merged-fragment marker, so these rules also run before it.
    pub fn screen_raw(&self, raw: &str) -> Option<Rejection> {
        let lower = collapse_whitespace(raw).to_lowercase();
        self.promo_rule(lower.trim_end_matches(|c: char| !c.is_alphanumeric()))
    }

    fn promo_rule(&self, lower: &str) -> Option<Rejection> {
        if self.promo_suffixes.iter().any(|s| lower.ends_with(s.as_str())) {
            return Some(Rejection::PromoSuffix);
        }
        if self.blocked_phrases.iter().any(|p| lower.contains(p.as_str())) {
            return Some(Rejection::BlockedPhrase);
        }
        None
    }

    /// `true` when `text` is a header, nav link or promo artifact rather
    /// than a headline.
    pub fn is_category_header(&self, text: &str) -> bool {
        !self.classify(text).is_accept()
    }

    fn is_shouting_label(&self, text: &str, len: usize) -> bool {
        if self.shouting_max_words == 0 {
            return false;
        }
        let has_letters = text.chars().any(char::is_alphabetic);
        has_letters
            && !text.chars().any(char::is_lowercase)
            && len < self.shouting_max_chars
            && text.split_whitespace().count() <= self.shouting_max_words
    }
}

/// Comparison key for labels: upper-cased words made of alphanumerics and
/// `&`, separated by single spaces. "More from  Sports »" and
/// "MORE FROM SPORTS" share a key.
fn label_key(text: &str) -> String {
    let kept: String = text
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '&' { c } else { ' ' })
        .collect();
    kept.split_whitespace()
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join(" ")
}
