//! Network collaborators of the extraction pipeline.
//!
//! - [`toi`]: fetches a section listing page
//! - [`robots`]: decides whether robots.txt lets us fetch it
//!
//! Both share one [`reqwest::Client`] built by [`build_client`], which carries
//! the request timeout and browser-identifying headers from [`Config`].
//! Failures here never reach the pipeline: the fetcher returns `None` and
//! the caller skips extraction.

pub mod robots;
pub mod toi;

use crate::config::Config;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, REFERER};
use std::error::Error;
use std::time::Duration;
use tracing::{debug, instrument};

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Build the HTTP client used for every request in a run.
#[instrument(level = "debug", skip_all)]
pub fn build_client(config: &Config) -> Result<reqwest::Client, Box<dyn Error>> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_str(&config.accept_language)?,
    );
    headers.insert(REFERER, HeaderValue::from_str(&config.base_url)?);

    let timeout = Duration::from_secs(config.request_timeout_secs);
    let client = reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .timeout(timeout)
        .build()?;

    debug!(?timeout, user_agent = %config.user_agent, "Built HTTP client");
    Ok(client)
}
