//! Headline extraction for Times of India section pages.
//!
//! The core is [`headlines::HeadlinePipeline`], which turns raw listing HTML
//! into an ordered, de-duplicated [`models::HeadlineList`]. The remaining
//! modules are the glue the `toi_headlines` binary wires around it:
//! configuration, the category menu, HTTP fetching with a robots.txt check,
//! and output formatting.

pub mod categories;
pub mod cli;
pub mod config;
pub mod headlines;
pub mod models;
pub mod outputs;
pub mod scrapers;
pub mod utils;
