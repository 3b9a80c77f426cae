//! Headline extraction pipeline.
//!
//! Raw HTML goes in, an ordered [`HeadlineList`] comes out:
//!
//! 1. **Parse**: build a DOM with `scraper` ([`parse_document`])
//! 2. **Cascade**: walk the selector list ([`cascade`])
//! 3. **Normalize**: strip dates, prefixes and separators ([`normalize`])
//! 4. **Classify**: drop labels, promos and junk ([`classify`])
//!
//! The pipeline holds no state between calls; a [`HeadlinePipeline`] is built
//! once from configuration and reused.

pub mod cascade;
pub mod classify;
pub mod normalize;

use crate::config::{ConfigError, ExtractionConfig};
use crate::models::HeadlineList;
use cascade::Cascade;
use scraper::Html;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// The input could not be turned into a document tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("document is empty")]
    Empty,
}

/// Parse `html` into a document.
///
/// html5ever recovers from any non-blank input, including bare text and
/// broken markup, so only blank input fails. A document with no content is
/// still a document; the cascade simply finds nothing in it.
pub fn parse_document(html: &str) -> Result<Html, ParseError> {
    if html.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let document = Html::parse_document(html);
    if !document.errors.is_empty() {
        debug!(errors = document.errors.len(), "HTML parser recovered from markup errors");
    }
    Ok(document)
}

/// Normalizer, classifier and selector cascade wired together.
#[derive(Debug, Clone)]
pub struct HeadlinePipeline {
    cascade: Cascade,
}

impl HeadlinePipeline {
    pub fn from_config(config: &ExtractionConfig) -> Result<Self, ConfigError> {
        let cascade = Cascade::from_config(config)?;
        debug!(selectors = cascade.selectors().len(), "Headline pipeline ready");
        Ok(Self { cascade })
    }

    /// Extract at most `limit` headlines from `html`.
    ///
    /// An empty list is a valid outcome: the page parsed but nothing on it
    /// passed the filters, which usually means the markup changed.
    ///
    /// # Errors
    ///
    /// [`ParseError`] when `html` cannot be parsed into a document.
    #[instrument(level = "info", skip_all, fields(bytes = html.len(), limit = limit))]
    pub fn parse_headlines(&self, html: &str, limit: usize) -> Result<HeadlineList, ParseError> {
        let document = parse_document(html)?;
        let mut headlines = HeadlineList::from(self.cascade.extract(&document, limit));
        headlines.truncate(limit);

        for headline in &headlines {
            debug!(selector = headline.selector(), text = headline.text(), "Accepted headline");
        }

        info!(count = headlines.len(), "Extracted headlines");
        Ok(headlines)
    }
}
