//! Times of India section page fetcher.
//!
//! Downloads one listing page in full. Any transport problem (timeout,
//! connection failure, non-success status, unreadable body) is logged and
//! reported as `None`; there are no retries and no partial bodies.

use reqwest::Client;
use tracing::{error, info, instrument};
use url::Url;

/// Fetch `url` and return its body as text, or `None` on any failure.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn fetch_page(client: &Client, url: &Url) -> Option<String> {
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            log_transport_error(&e);
            return None;
        }
    };

    let response = match response.error_for_status() {
        Ok(response) => response,
        Err(e) => {
            error!(status = ?e.status(), "Server returned an error status");
            return None;
        }
    };

    match response.text().await {
        Ok(body) => {
            info!(bytes = body.len(), "Fetched page");
            Some(body)
        }
        Err(e) => {
            log_transport_error(&e);
            None
        }
    }
}

fn log_transport_error(e: &reqwest::Error) {
    if e.is_timeout() {
        error!(error = %e, "Request timed out");
    } else if e.is_connect() {
        error!(error = %e, "Network connection failed");
    } else {
        error!(error = %e, "Request failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::scrapers::build_client;

    #[tokio::test]
    async fn test_unreachable_host_returns_none() {
        let config = Config {
            request_timeout_secs: 2,
            ..Config::default()
        };
        let client = build_client(&config).unwrap();
        // Port 9 on localhost (discard) is closed on test machines.
        let url = Url::parse("http://127.0.0.1:9/sports/").unwrap();
        assert!(fetch_page(&client, &url).await.is_none());
    }
}
