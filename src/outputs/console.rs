//! Terminal rendering of a headline list.

use crate::categories::CategorySpec;
use crate::models::HeadlineList;
use std::fmt::Write;

pub const NO_HEADLINES: &str = "No headlines found. The website structure may have changed.";

/// Render `headlines` with 1-based ordinals under a banner naming the
/// section.
pub fn render(headlines: &HeadlineList, category: &CategorySpec) -> String {
    if headlines.is_empty() {
        return format!("\n{NO_HEADLINES}\n");
    }

    let rule = "=".repeat(80);
    let mut out = String::new();
    let _ = writeln!(out, "\n{rule}");
    let _ = writeln!(
        out,
        "Times of India - {} (Top {} Headlines)",
        category.name,
        headlines.len()
    );
    let _ = writeln!(out, "{rule}\n");
    for (i, headline) in headlines.iter().enumerate() {
        let _ = writeln!(out, "{:2}. {}", i + 1, headline.text());
    }
    let _ = writeln!(out, "\n{rule}");
    out
}
