//! Presenters for an extracted [`HeadlineList`](crate::models::HeadlineList).
//!
//! - [`console`]: numbered plain-text listing for the terminal
//! - [`json`]: machine-readable report on stdout
//!
//! Presenters only format; they never filter or reorder headlines.

pub mod console;
pub mod json;
