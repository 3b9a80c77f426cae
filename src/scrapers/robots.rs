//! robots.txt permission check.
//!
//! Only the wildcard (`User-agent: *`) groups are honored. Within them,
//! `Allow` and `Disallow` rules are matched against the URL path with `*`
//! wildcards and a trailing `$` anchor; the longest matching rule decides and
//! `Allow` wins a tie. When robots.txt cannot be fetched the check passes
//! with a note saying so.

use crate::models::RobotsVerdict;
use regex::Regex;
use reqwest::Client;
use tracing::{info, instrument, warn};
use url::Url;

#[derive(Debug)]
struct Rule {
    allow: bool,
    pattern: String,
    matcher: Regex,
}

impl Rule {
    fn new(allow: bool, pattern: &str) -> Option<Self> {
        let (body, anchored) = match pattern.strip_suffix('$') {
            Some(body) => (body, true),
            None => (pattern, false),
        };
        let mut expr = String::from("^");
        expr.push_str(&body.split('*').map(regex::escape).collect::<Vec<_>>().join(".*"));
        if anchored {
            expr.push('$');
        }
        let matcher = Regex::new(&expr).ok()?;
        Some(Self {
            allow,
            pattern: pattern.to_string(),
            matcher,
        })
    }

    fn directive(&self) -> &'static str {
        if self.allow { "Allow" } else { "Disallow" }
    }
}

/// Rules from every group addressed to `*`, in file order.
fn wildcard_rules(robots_txt: &str) -> Vec<Rule> {
    let mut rules = Vec::new();
    let mut applies = false;
    let mut reading_agents = false;

    for line in robots_txt.lines() {
        let line = line.find('#').map_or(line, |i| &line[..i]).trim();
        let Some((field, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();

        match field.trim().to_ascii_lowercase().as_str() {
            "user-agent" => {
                if !reading_agents {
                    applies = false;
                    reading_agents = true;
                }
                if value == "*" {
                    applies = true;
                }
            }
            directive @ ("allow" | "disallow") => {
                reading_agents = false;
                // An empty Disallow allows everything, so it adds no rule.
                if applies && !value.is_empty() {
                    rules.extend(Rule::new(directive == "allow", value));
                }
            }
            // Crawl-delay, Sitemap and the like still close the agent list.
            _ => reading_agents = false,
        }
    }
    rules
}

/// Decide whether `path` may be fetched under `robots_txt`.
pub fn evaluate(robots_txt: &str, path: &str) -> RobotsVerdict {
    let rules = wildcard_rules(robots_txt);
    let decisive = rules
        .iter()
        .filter(|rule| rule.matcher.is_match(path))
        .max_by_key(|rule| (rule.pattern.len(), rule.allow));

    match decisive {
        Some(rule) if !rule.allow => RobotsVerdict::deny(format!(
            "Path '{path}' is disallowed by robots.txt ({}: {})",
            rule.directive(),
            rule.pattern
        )),
        Some(rule) => RobotsVerdict::allow(format!(
            "Path '{path}' is allowed by robots.txt ({}: {})",
            rule.directive(),
            rule.pattern
        )),
        None => RobotsVerdict::allow("Path is allowed by robots.txt"),
    }
}

/// Fetch the site's robots.txt and evaluate it for `url`.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn check_robots_txt(client: &Client, url: &Url) -> RobotsVerdict {
    let robots_url = match url.join("/robots.txt") {
        Ok(robots_url) => robots_url,
        Err(e) => return unverified(e),
    };

    let body = match client.get(robots_url).send().await {
        Ok(response) => match response.error_for_status() {
            Ok(response) => response.text().await,
            Err(e) => return unverified(e),
        },
        Err(e) => return unverified(e),
    };

    match body {
        Ok(body) => {
            let verdict = evaluate(&body, url.path());
            info!(allowed = verdict.allowed, reason = %verdict.reason, "robots.txt evaluated");
            verdict
        }
        Err(e) => unverified(e),
    }
}

fn unverified(e: impl std::fmt::Display) -> RobotsVerdict {
    warn!(error = %e, "Could not verify robots.txt");
    RobotsVerdict::allow(format!(
        "Could not verify robots.txt: {e} (proceeding cautiously)"
    ))
}
