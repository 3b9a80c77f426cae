//! Selector cascade: ordered CSS queries with early termination.
//!
//! Listing pages come in several layout variants, so no single selector is
//! reliable. The cascade tries descriptors from most specific to most
//! generic and stops as soon as enough headlines have been accepted.
//! Everything is lazy: a descriptor is only queried once every earlier one
//! has been drained and the consumer still wants more.

use super::classify::{Classifier, Verdict};
use super::normalize::Normalizer;
use crate::config::{ConfigError, ExtractionConfig, SelectorDescriptor};
use crate::models::{Headline, RawFragment};
use crate::utils::truncate_for_log;
use itertools::Itertools;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

/// A selector descriptor with its CSS compiled up front.
///
/// CSS that fails to compile is kept with `selector: None` and matches
/// nothing, so one bad entry in the config cannot break the cascade.
#[derive(Debug, Clone)]
pub struct CompiledSelector {
    descriptor: SelectorDescriptor,
    selector: Option<Selector>,
}

impl CompiledSelector {
    pub fn compile(descriptor: SelectorDescriptor) -> Self {
        let selector = match Selector::parse(&descriptor.css) {
            Ok(selector) => Some(selector),
            Err(e) => {
                warn!(
                    name = %descriptor.name,
                    css = %descriptor.css,
                    error = %e,
                    "Invalid CSS selector; it will match nothing"
                );
                None
            }
        };
        Self {
            descriptor,
            selector,
        }
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn css(&self) -> &str {
        &self.descriptor.css
    }

    pub fn selector(&self) -> Option<&Selector> {
        self.selector.as_ref()
    }
}

/// A document the cascade can query.
pub trait FragmentSource {
    /// Text of every node matching `selector`, in document order.
    fn fragments<'a>(&'a self, selector: &'a CompiledSelector)
    -> Box<dyn Iterator<Item = String> + 'a>;
}

impl FragmentSource for Html {
    fn fragments<'a>(
        &'a self,
        selector: &'a CompiledSelector,
    ) -> Box<dyn Iterator<Item = String> + 'a> {
        match selector.selector() {
            Some(css) => Box::new(self.select(css).map(|element| element_text(&element))),
            None => Box::new(std::iter::empty()),
        }
    }
}

/// Text nodes of `element`, each trimmed, joined by single spaces.
pub fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .join(" ")
}

/// The ordered selector list together with the rules each fragment must pass.
#[derive(Debug, Clone)]
pub struct Cascade {
    selectors: Vec<CompiledSelector>,
    normalizer: Normalizer,
    classifier: Classifier,
}

impl Cascade {
    pub fn from_config(config: &ExtractionConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            selectors: config
                .selectors
                .iter()
                .cloned()
                .map(CompiledSelector::compile)
                .collect(),
            normalizer: Normalizer::from_config(config)?,
            classifier: Classifier::from_config(config),
        })
    }

    pub fn selectors(&self) -> &[CompiledSelector] {
        &self.selectors
    }

    /// Lazily yield accepted, de-duplicated headlines in cascade order.
    pub fn accepted<'a, D>(&'a self, document: &'a D) -> impl Iterator<Item = Headline> + 'a
    where
        D: FragmentSource + ?Sized,
    {
        self.selectors
            .iter()
            .flat_map(move |selector| {
                debug!(selector = selector.name(), css = selector.css(), "Querying selector");
                document.fragments(selector).map(move |text| RawFragment {
                    selector: selector.name().to_string(),
                    text,
                })
            })
            .filter_map(move |fragment| self.admit(fragment))
            .unique_by(Headline::dedup_key)
    }

    /// Collect up to `limit` accepted headlines. Descriptors after the one
    /// that fills the quota are never queried.
    pub fn extract<D>(&self, document: &D, limit: usize) -> Vec<Headline>
    where
        D: FragmentSource + ?Sized,
    {
        self.accepted(document).take(limit).collect()
    }

    fn admit(&self, fragment: RawFragment) -> Option<Headline> {
        if let Some(reason) = self.classifier.screen_raw(&fragment.text) {
            debug!(
                selector = %fragment.selector,
                %reason,
                fragment = %truncate_for_log(&fragment.text, 80),
                "Rejected raw fragment"
            );
            return None;
        }

        let text = self.normalizer.normalize(&fragment.text);
        match self.classifier.classify(&text) {
            Verdict::Accept => Some(Headline::new(text, fragment.selector)),
            Verdict::Reject(reason) => {
                debug!(
                    selector = %fragment.selector,
                    %reason,
                    fragment = %truncate_for_log(&text, 80),
                    "Rejected fragment"
                );
                None
            }
        }
    }
}
