//! Runtime configuration for the headline scraper.
//!
//! Everything the extraction heuristics depend on lives here as plain data:
//! length thresholds, label and phrase lists, the regex sets used by the
//! normalizer, and the ordered selector list walked by the cascade. The page
//! markup drifts independently of this code, so operators tune these values
//! through a YAML file instead of patching control flow.
//!
//! Every field has a default, so a config file only needs to name what it
//! overrides:
//!
//! ```yaml
//! request_timeout_secs: 5
//! extraction:
//!   min_headline_length: 20
//!   category_labels: ["SPORTS", "MORE FROM SPORTS"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{info, instrument};

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid {field} pattern {pattern:?}: {source}")]
    Pattern {
        field: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("min_headline_length ({min}) exceeds max_headline_length ({max})")]
    Thresholds { min: usize, max: usize },

    #[error("invalid base_url {0:?}: {1}")]
    BaseUrl(String, url::ParseError),
}

/// Top-level configuration: network settings plus extraction rules.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Site root; category paths are joined onto it.
    pub base_url: String,
    /// Per-request timeout applied to robots.txt and page fetches.
    pub request_timeout_secs: u64,
    /// Number of headlines shown per run.
    pub headline_limit: usize,
    pub user_agent: String,
    pub accept_language: String,
    pub extraction: ExtractionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://timesofindia.indiatimes.com".to_string(),
            request_timeout_secs: 10,
            headline_limit: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            accept_language: "en-US,en;q=0.5".to_string(),
            extraction: ExtractionConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file, or fall back to defaults when no
    /// path is given. The result is validated before it is returned.
    #[instrument(level = "info")]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.display().to_string(),
                    source,
                })?;
                let config = Self::from_yaml(&raw)?;
                info!(path = %path.display(), "Loaded configuration file");
                config
            }
            None => {
                info!("No config file given; using built-in defaults");
                Self::default()
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML document. An empty document yields the defaults.
    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.base_url)
            .map_err(|e| ConfigError::BaseUrl(self.base_url.clone(), e))?;
        self.extraction.validate()
    }
}

/// One entry in the selector cascade.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SelectorDescriptor {
    /// Short identifier used in logs and on each accepted headline.
    pub name: String,
    /// CSS selector evaluated against the parsed page.
    pub css: String,
}

impl SelectorDescriptor {
    pub fn new(name: impl Into<String>, css: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            css: css.into(),
        }
    }
}

/// Rules driving normalization, classification and the selector cascade.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub min_headline_length: usize,
    pub max_headline_length: usize,

    /// Section banners and nav labels, compared case-insensitively.
    pub category_labels: Vec<String>,
    /// Trailing call-to-action text ("View All", "Read More").
    pub promo_suffixes: Vec<String>,
    /// Phrases that mark promo or account links wherever they appear.
    pub blocked_phrases: Vec<String>,
    /// All-caps text with at most this many words is treated as a banner.
    /// Zero disables the rule.
    pub shouting_label_max_words: usize,
    pub shouting_label_max_chars: usize,

    /// Regexes removed from the text: dates and timestamps.
    pub date_patterns: Vec<String>,
    /// Regexes removed from the text: section or source prefixes.
    pub prefix_patterns: Vec<String>,
    /// Regexes removed from the text: trailing artifacts.
    pub suffix_patterns: Vec<String>,
    /// Whole-word marker the page uses between merged teaser fragments.
    pub merged_fragment_marker: Option<String>,
    /// Characters trimmed from both ends once prefixes are gone.
    pub separator_chars: String,

    /// Selector cascade, most specific first.
    pub selectors: Vec<SelectorDescriptor>,
}

const MONTHS: &str = r"(?:jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\.?";

impl Default for ExtractionConfig {
    fn default() -> Self {
        let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        Self {
            min_headline_length: 15,
            max_headline_length: 300,
            category_labels: strings(&[
                "HOME",
                "HOME (ALL NEWS)",
                "METRO CITIES",
                "ENTERTAINMENT",
                "LIFE & STYLE",
                "MOST POPULAR",
                "TOP PHOTOSTORIES",
                "PHOTO GALLERY",
                "FROM OUR NETWORK",
                "TOI TIMESPOINTS",
                "VISIT TOI DAILY & EARN TIMES POINTS",
                "CITIES",
                "INDIA",
                "WORLD",
                "BUSINESS",
                "SPORTS",
                "HEALTH",
                "EDUCATION",
                "TECHNOLOGY",
                "TV",
                "WEB STORIES",
                "VIRAL",
                "TRENDING",
                "TRENDING TOPICS",
                "TRENDING NOW",
                "TOP STORIES",
                "LATEST NEWS",
                "MORE FROM SPORTS",
                "INTERNATIONAL BUSINESS",
                "LATEST BUSINESS VIDEOS",
                "PERSONAL FINANCE",
                "BANKING SERVICES",
                "POPULAR BANKS IFSC CODES",
                "STOCK MARKET TODAY",
                "TOP STOCKS TODAY",
                "POPULAR SPORTS STORIES",
                "POPULAR INDIA STORIES",
                "POPULAR WORLD STORIES",
            ]),
            promo_suffixes: strings(&["View All", "Read More", "Click Here", "See More", "Load More"]),
            blocked_phrases: strings(&[
                "earn times points",
                "daily &",
                "follow us",
                "see more",
                "subscribe",
                "sign in",
                "log in",
                "download app",
            ]),
            shouting_label_max_words: 4,
            shouting_label_max_chars: 50,
            date_patterns: vec![
                // "Nov 12, 2025, 14:30 IST —" at the start
                format!(
                    r"(?i)^{MONTHS}\s+\d{{1,2}},?\s*\d{{4}}(?:,?\s*\d{{1,2}}:\d{{2}}(?:\s*[ap]m)?(?:\s+[a-z]{{2,4}}\b)?)?\s*[-–—|:/]*\s*"
                ),
                // "/ Dec 16, 2025" anywhere
                format!(r"(?i)/\s*{MONTHS}\s+\d{{1,2}},\s*\d{{4}}"),
                // "Updated: 14:30 IST" at the start
                r"(?i)^updated\s*:?\s*\d{1,2}:\d{2}(?:\s*[ap]m)?(?:\s+[a-z]{2,4}\b)?\s*[-–—|:]*\s*"
                    .to_string(),
            ],
            prefix_patterns: strings(&[
                r"(?i)^(?:toi|times of india)\s*[|:\-–—]\s*",
                r"(?i)^[a-z&' ]{1,30}\bnews\s*:\s*",
                r"^[A-Za-z& ]{1,30}/\s*",
            ]),
            suffix_patterns: strings(&[r"(?i)\s+news\s*$"]),
            merged_fragment_marker: Some("MORE".to_string()),
            separator_chars: "-|:–—/•·".to_string(),
            selectors: vec![
                SelectorDescriptor::new("headline-link", "a[data-test='headline_link']"),
                SelectorDescriptor::new("each-story", "h2.eachStory a"),
                SelectorDescriptor::new("h2-articleshow", "h2 a[href*='articleshow']"),
                SelectorDescriptor::new("news-link", "a.news_link"),
                SelectorDescriptor::new("articleshow-link", "a[href*='/articleshow/']"),
                SelectorDescriptor::new("top-stories", ".topstories a"),
                SelectorDescriptor::new("itemprop-url", "a[itemprop='url']"),
                SelectorDescriptor::new("list-item", ".list-item h2 a"),
                SelectorDescriptor::new("any-anchor", "a[href]"),
            ],
        }
    }
}

impl ExtractionConfig {
    /// Check thresholds and compile every pattern once so that bad patterns
    /// surface at startup rather than mid-run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_headline_length > self.max_headline_length {
            return Err(ConfigError::Thresholds {
                min: self.min_headline_length,
                max: self.max_headline_length,
            });
        }
        crate::headlines::normalize::Normalizer::from_config(self).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_validate() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.headline_limit, 10);
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.extraction.min_headline_length, 15);
        assert_eq!(config.extraction.max_headline_length, 300);
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let yaml = r#"
request_timeout_secs: 3
extraction:
  min_headline_length: 20
  category_labels: ["Breaking"]
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.request_timeout_secs, 3);
        assert_eq!(config.headline_limit, 10);
        assert_eq!(config.extraction.min_headline_length, 20);
        assert_eq!(config.extraction.max_headline_length, 300);
        assert_eq!(config.extraction.category_labels, vec!["Breaking".to_string()]);
        assert_eq!(
            config.extraction.selectors,
            ExtractionConfig::default().selectors
        );
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = Config::from_yaml("  \n").unwrap();
        assert_eq!(config.base_url, Config::default().base_url);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "headline_limit: 5").unwrap();
        writeln!(file, "base_url: https://example.com").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.headline_limit, 5);
        assert_eq!(config.base_url, "https://example.com");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/toi_headlines.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_bad_pattern_rejected() {
        let yaml = "extraction:\n  date_patterns: ['(unclosed']\n";
        let config = Config::from_yaml(yaml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Pattern { field: "date_patterns", .. }));
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let mut config = Config::default();
        config.extraction.min_headline_length = 400;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Thresholds { min: 400, max: 300 })
        ));
    }

    #[test]
    fn test_bad_base_url_rejected() {
        let mut config = Config::default();
        config.base_url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::BaseUrl(..))));
    }

    #[test]
    fn test_yaml_roundtrip_of_defaults() {
        let yaml = Config::default().to_yaml().unwrap();
        let config = Config::from_yaml(&yaml).unwrap();
        assert_eq!(config.extraction.selectors.len(), 9);
        assert!(config.validate().is_ok());
    }
}
