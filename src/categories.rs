//! The fixed set of news sections and the interactive menu over them.
//!
//! | # | Key | Section | Path |
//! |---|-----|---------|------|
//! | 1 | `home` | Home (All News) | `/home/headlines` |
//! | 2 | `sports` | Sports | `/sports/` |
//! | 3 | `business` | Business | `/business/` |
//! | 4 | `tech` | Technology | `/technology` |
//! | 5 | `entertainment` | Entertainment | `/etimes` |
//! | 6 | `india` | India | `/india/` |
//! | 7 | `world` | World | `/world/` |
//! | 8 | `health` | Health | `/life-style/health-fitness` |
//! | 9 | `life` | Life & Style | `/life-style` |
//! | 10 | `education` | Education | `/education/` |

use once_cell::sync::Lazy;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::debug;
use url::Url;

/// One news section: menu key, display name and path on the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySpec {
    pub key: &'static str,
    pub name: &'static str,
    pub path: &'static str,
}

impl CategorySpec {
    /// Absolute URL of the section listing under `base`.
    pub fn url(&self, base: &str) -> Result<Url, url::ParseError> {
        Url::parse(base)?.join(self.path)
    }
}

pub static CATEGORIES: Lazy<Vec<CategorySpec>> = Lazy::new(|| {
    let spec = |key, name, path| CategorySpec { key, name, path };
    vec![
        spec("home", "Home (All News)", "/home/headlines"),
        spec("sports", "Sports", "/sports/"),
        spec("business", "Business", "/business/"),
        spec("tech", "Technology", "/technology"),
        spec("entertainment", "Entertainment", "/etimes"),
        spec("india", "India", "/india/"),
        spec("world", "World", "/world/"),
        spec("health", "Health", "/life-style/health-fitness"),
        spec("life", "Life & Style", "/life-style"),
        spec("education", "Education", "/education/"),
    ]
});

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("invalid number {0}; enter a number between 1 and {max}", max = CATEGORIES.len())]
    OutOfRange(usize),

    #[error("invalid category {0:?}; valid categories: {keys}", keys = keys().join(", "))]
    UnknownKey(String),

    #[error("no selection made (input closed)")]
    NoInput,

    #[error("menu I/O failed: {0}")]
    Io(#[from] io::Error),
}

pub fn keys() -> Vec<&'static str> {
    CATEGORIES.iter().map(|c| c.key).collect()
}

/// Resolve a 1-based menu number or a category key (case-insensitive).
pub fn resolve(input: &str) -> Result<&'static CategorySpec, MenuError> {
    let input = input.trim().to_lowercase();

    if let Ok(number) = input.parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(|index| CATEGORIES.get(index))
            .ok_or(MenuError::OutOfRange(number));
    }

    CATEGORIES
        .iter()
        .find(|c| c.key == input)
        .ok_or(MenuError::UnknownKey(input))
}

/// Menu listing with 1-based numbers, display names and keys.
pub fn render_menu() -> String {
    let rule = "=".repeat(80);
    let mut out = format!("\n{rule}\nAvailable categories:\n{rule}\n\n");
    for (i, category) in CATEGORIES.iter().enumerate() {
        out.push_str(&format!(
            "{:2}. {:25} ('{}')\n",
            i + 1,
            category.name,
            category.key
        ));
    }
    out.push_str(&format!("\n{rule}\n"));
    out
}

/// Show the menu and keep asking until the input names a category.
pub fn prompt<R, W>(input: &mut R, output: &mut W) -> Result<&'static CategorySpec, MenuError>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{}", render_menu())?;
    loop {
        write!(output, "Enter category name or number (e.g. 'sports' or '2'): ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(MenuError::NoInput);
        }

        match resolve(&line) {
            Ok(category) => {
                debug!(key = category.key, "Category selected");
                return Ok(category);
            }
            Err(e) => writeln!(output, "{e}")?,
        }
    }
}
