//! Text cleanup applied to every candidate fragment before classification.
//!
//! The listing pages decorate headline anchors with timestamps, section
//! prefixes ("Sports News:", "TOI |") and trailing labels, and some teaser
//! blocks glue several stories together around a `MORE` marker. The
//! [`Normalizer`] strips all of that using the regex sets from
//! [`ExtractionConfig`].

use crate::config::{ConfigError, ExtractionConfig};
use crate::utils::collapse_whitespace;
use regex::Regex;

/// Compiled normalization rules.
#[derive(Debug, Clone)]
pub struct Normalizer {
    /// Date, prefix and suffix patterns, applied in that order.
    strip: Vec<Regex>,
    merged_marker: Option<Regex>,
    separators: Vec<char>,
}

/// Bounds (exclusive) for a part to survive merged-fragment splitting.
const MERGED_PART_MIN: usize = 10;
const MERGED_PART_MAX: usize = 250;

impl Normalizer {
    /// Compile the pattern sets of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pattern`] naming the first pattern that fails to
    /// compile.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self, ConfigError> {
        let mut strip = compile("date_patterns", &config.date_patterns)?;
        strip.extend(compile("prefix_patterns", &config.prefix_patterns)?);
        strip.extend(compile("suffix_patterns", &config.suffix_patterns)?);

        let merged_marker = match config.merged_fragment_marker.as_deref().map(str::trim) {
            Some(marker) if !marker.is_empty() => {
                let pattern = format!(r"\b{}\b", regex::escape(marker));
                let re = Regex::new(&pattern).map_err(|source| ConfigError::Pattern {
                    field: "merged_fragment_marker",
                    pattern,
                    source,
                })?;
                Some(re)
            }
            _ => None,
        };

        Ok(Self {
            strip,
            merged_marker,
            separators: config.separator_chars.chars().collect(),
        })
    }

    /// Clean a raw fragment.
    ///
    /// Passes are repeated until the text stops changing, which makes the
    /// function idempotent. It never fails: input that matches no rule comes
    /// back whitespace-collapsed and trimmed.
    pub fn normalize(&self, raw: &str) -> String {
        let mut current = collapse_whitespace(raw);
        // After the first pass the text only ever shrinks, so this terminates.
        loop {
            let next = self.pass(&current);
            if next == current {
                return current;
            }
            current = next;
        }
    }

    fn pass(&self, text: &str) -> String {
        let mut text = collapse_whitespace(text);

        for re in &self.strip {
            if re.is_match(&text) {
                text = collapse_whitespace(&re.replace_all(&text, ""));
            }
        }

        if let Some(part) = self.longest_merged_part(&text) {
            text = part;
        }

        let trimmed = text.trim_matches(|c: char| c.is_whitespace() || self.separators.contains(&c));
        collapse_whitespace(trimmed)
    }

    /// When the marker is present, keep the longest reasonably sized part
    /// (first one wins ties). `None` leaves the text unchanged.
    fn longest_merged_part(&self, text: &str) -> Option<String> {
        let marker = self.merged_marker.as_ref()?;
        if !marker.is_match(text) {
            return None;
        }

        marker
            .split(text)
            .map(str::trim)
            .filter(|part| {
                let len = part.chars().count();
                len > MERGED_PART_MIN && len < MERGED_PART_MAX
            })
            .fold(None, |best: Option<&str>, part| match best {
                Some(b) if b.chars().count() >= part.chars().count() => Some(b),
                _ => Some(part),
            })
            .map(str::to_string)
    }
}

fn compile(field: &'static str, patterns: &[String]) -> Result<Vec<Regex>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|source| ConfigError::Pattern {
                field,
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> Normalizer {
        Normalizer::from_config(&ExtractionConfig::default()).unwrap()
    }

    #[test]
    fn test_collapses_and_trims_whitespace() {
        let n = normalizer();
        assert_eq!(
            n.normalize("  Sensex  climbs\n\t 400 points   on bank rally "),
            "Sensex climbs 400 points on bank rally"
        );
    }

    #[test]
    fn test_strips_leading_timestamp() {
        let n = normalizer();
        assert_eq!(
            n.normalize("Nov 12, 2025, 14:30 IST — Monsoon session to begin next week"),
            "Monsoon session to begin next week"
        );
        assert_eq!(
            n.normalize("Updated: 09:15 IST | Metro fares revised across all lines"),
            "Metro fares revised across all lines"
        );
    }

    #[test]
    fn test_date_without_time_keeps_first_word() {
        let n = normalizer();
        assert_eq!(
            n.normalize("Nov 12, 2025 New rules for airline refunds"),
            "New rules for airline refunds"
        );
    }

    #[test]
    fn test_strips_embedded_date() {
        let n = normalizer();
        assert_eq!(
            n.normalize("Kohli hits century in Perth / Dec 16, 2025"),
            "Kohli hits century in Perth"
        );
    }

    #[test]
    fn test_strips_source_and_section_prefixes() {
        let n = normalizer();
        assert_eq!(
            n.normalize("TOI | Parliament clears data protection bill"),
            "Parliament clears data protection bill"
        );
        assert_eq!(
            n.normalize("Sports News: India clinch series against Australia"),
            "India clinch series against Australia"
        );
        assert_eq!(
            n.normalize("Sports / India clinch series against Australia"),
            "India clinch series against Australia"
        );
    }

    #[test]
    fn test_strips_stacked_prefixes() {
        let n = normalizer();
        assert_eq!(
            n.normalize("TOI | Nov 3, 2025 — Sports News: Gill named Test captain"),
            "Gill named Test captain"
        );
    }

    #[test]
    fn test_strips_trailing_news_label() {
        let n = normalizer();
        assert_eq!(
            n.normalize("Budget 2026 expectations for salaried taxpayers NEWS"),
            "Budget 2026 expectations for salaried taxpayers"
        );
    }

    #[test]
    fn test_trims_residual_separators() {
        let n = normalizer();
        assert_eq!(
            n.normalize("| - Heavy rain alert issued for Mumbai suburbs - |"),
            "Heavy rain alert issued for Mumbai suburbs"
        );
    }

    #[test]
    fn test_splits_merged_fragments() {
        let n = normalizer();
        assert_eq!(
            n.normalize("Cricket MORE Rohit Sharma steps down as ODI captain MORE Photos"),
            "Rohit Sharma steps down as ODI captain"
        );
    }

    #[test]
    fn test_merged_marker_is_whole_word_only() {
        let n = normalizer();
        let text = "Baltimore Orioles trade MOREno to Houston";
        assert_eq!(n.normalize(text), text);
    }

    #[test]
    fn test_plain_headline_untouched() {
        let n = normalizer();
        let text = "Venkatesh Iyer takes 70% pay cut; joins RCB from KKR";
        assert_eq!(n.normalize(text), text);
    }

    #[test]
    fn test_total_on_odd_input() {
        let n = normalizer();
        assert_eq!(n.normalize(""), "");
        assert_eq!(n.normalize("   "), "");
        assert_eq!(n.normalize("|||---"), "");
        assert_eq!(n.normalize("\u{00a0}Ünïcödé héadlïne wïth äccents\u{00a0}"), "Ünïcödé héadlïne wïth äccents");
    }

    #[test]
    fn test_idempotent() {
        let n = normalizer();
        let inputs = [
            "",
            "  plain   text  ",
            "TOI | Nov 3, 2025 — Sports News: Gill named Test captain",
            "a/ b/ c/ d/ e/ f/ g/ h/ i/ j/ k/ l/ m/ n/ o/ p/ q/ r/ s/ deep prefixes here",
            "Cricket MORE Rohit Sharma steps down MORE",
            "MORE MORE MORE",
            "Heavy rain / Dec 1, 2025 / Dec 2, 2025 alert NEWS news",
            "--- | : Venkatesh Iyer takes 70% pay cut; joins RCB from KKR : | ---",
            "12345 !!! 678",
        ];
        for input in inputs {
            let once = n.normalize(input);
            assert_eq!(n.normalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_disabled_marker() {
        let config = ExtractionConfig {
            merged_fragment_marker: None,
            ..ExtractionConfig::default()
        };
        let n = Normalizer::from_config(&config).unwrap();
        assert_eq!(
            n.normalize("Cricket MORE Rohit Sharma steps down"),
            "Cricket MORE Rohit Sharma steps down"
        );
    }
}
