//! # TOI Headlines
//!
//! Pulls the top headlines for one Times of India section and prints them,
//! with navigation links, section banners and promo fragments filtered out.
//!
//! ## Usage
//!
//! ```sh
//! toi_headlines                      # interactive menu
//! toi_headlines -c sports -n 5       # straight to a section
//! toi_headlines -c 1 --format json   # machine-readable output
//! ```
//!
//! ## Architecture
//!
//! One run is a single sequential cycle:
//! 1. **Select**: resolve the category from `--category` or the menu
//! 2. **Permit**: check robots.txt for the section URL
//! 3. **Fetch**: download the listing page (bounded by the request timeout)
//! 4. **Extract**: run the headline pipeline over the HTML
//! 5. **Present**: print the numbered list or a JSON report
//!
//! A robots.txt refusal or failed fetch ends the run before extraction. An
//! empty extraction is reported separately, since it points at a markup
//! change rather than a network problem.

use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::process::ExitCode;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use toi_headlines::categories;
use toi_headlines::cli::{Cli, OutputFormat};
use toi_headlines::config::Config;
use toi_headlines::headlines::HeadlinePipeline;
use toi_headlines::outputs::json::HeadlineReport;
use toi_headlines::outputs::{console, json};
use toi_headlines::scrapers::{self, robots, toi};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    match run().await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "Run aborted");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode, Box<dyn Error>> {
    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // ---- Configuration ----
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(limit) = args.limit {
        config.headline_limit = limit;
    }
    if let Some(timeout) = args.timeout_secs {
        config.request_timeout_secs = timeout;
    }

    if args.dump_config {
        print!("{}", config.to_yaml()?);
        return Ok(ExitCode::SUCCESS);
    }

    let pipeline = HeadlinePipeline::from_config(&config.extraction)?;
    let client = scrapers::build_client(&config)?;

    // ---- Category ----
    let category = match args.category.as_deref() {
        Some(input) => categories::resolve(input)?,
        None => {
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            categories::prompt(&mut stdin.lock(), &mut stdout)?
        }
    };
    let url = category.url(&config.base_url)?;
    info!(category = category.key, name = category.name, %url, "Selected category");

    // ---- robots.txt ----
    let verdict = robots::check_robots_txt(&client, &url).await;
    if !verdict.allowed {
        warn!(reason = %verdict.reason, "Scraping disallowed by robots.txt; aborting");
        eprintln!("Scraping disallowed by robots.txt: {}", verdict.reason);
        return Ok(ExitCode::FAILURE);
    }

    // ---- Fetch ----
    let Some(html) = toi::fetch_page(&client, &url).await else {
        eprintln!("Failed to fetch {url}");
        return Ok(ExitCode::FAILURE);
    };
    let fetched_at = Local::now();

    // ---- Extract ----
    let headlines = pipeline.parse_headlines(&html, config.headline_limit)?;
    if headlines.is_empty() {
        warn!(%url, "No headlines found; the page layout may have changed");
    }

    // ---- Present ----
    match args.format {
        OutputFormat::Text => print!("{}", console::render(&headlines, category)),
        OutputFormat::Json => {
            let report = HeadlineReport::new(category, url.as_str(), fetched_at, &headlines);
            println!("{}", json::render(&report)?);
        }
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, count = headlines.len(), "Execution complete");

    Ok(if headlines.is_empty() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
