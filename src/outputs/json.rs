//! JSON rendering of a headline list.
//!
//! ```json
//! {
//!   "category": "sports",
//!   "category_name": "Sports",
//!   "url": "https://timesofindia.indiatimes.com/sports/",
//!   "fetched_at": "2025-11-12T09:00:00+05:30",
//!   "count": 2,
//!   "headlines": [{ "text": "...", "selector": "headline-link" }]
//! }
//! ```

use crate::categories::CategorySpec;
use crate::models::HeadlineList;
use chrono::{DateTime, Local};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HeadlineReport<'a> {
    pub category: &'a str,
    pub category_name: &'a str,
    pub url: &'a str,
    pub fetched_at: String,
    pub count: usize,
    pub headlines: &'a HeadlineList,
}

impl<'a> HeadlineReport<'a> {
    pub fn new(
        category: &'a CategorySpec,
        url: &'a str,
        fetched_at: DateTime<Local>,
        headlines: &'a HeadlineList,
    ) -> Self {
        Self {
            category: category.key,
            category_name: category.name,
            url,
            fetched_at: fetched_at.to_rfc3339(),
            count: headlines.len(),
            headlines,
        }
    }
}

/// Pretty-printed JSON for the report.
pub fn render(report: &HeadlineReport<'_>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::resolve;
    use crate::models::Headline;

    #[test]
    fn test_report_shape() {
        let headlines: HeadlineList = vec![Headline::new(
            "Sensex climbs 400 points as bank stocks rally".to_string(),
            "headline-link".to_string(),
        )]
        .into();
        let business = resolve("business").unwrap();
        let url = "https://timesofindia.indiatimes.com/business/";
        let report = HeadlineReport::new(business, url, Local::now(), &headlines);

        let value: serde_json::Value = serde_json::from_str(&render(&report).unwrap()).unwrap();
        assert_eq!(value["category"], "business");
        assert_eq!(value["category_name"], "Business");
        assert_eq!(value["url"], url);
        assert_eq!(value["count"], 1);
        assert_eq!(
            value["headlines"][0]["text"],
            "Sensex climbs 400 points as bank stocks rally"
        );
        assert!(value["fetched_at"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn test_empty_report() {
        let headlines = HeadlineList::default();
        let report = HeadlineReport::new(resolve("home").unwrap(), "u", Local::now(), &headlines);
        let value: serde_json::Value = serde_json::from_str(&render(&report).unwrap()).unwrap();
        assert_eq!(value["count"], 0);
        assert_eq!(value["headlines"], serde_json::json!([]));
    }
}
