// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Fetch the page and inspect it (version, title, login form, headings)
// 3. Check every link on it, one at a time
// 4. Print the report and exit with a proper code
//    (0 = all links fine, 1 = inaccessible links found, 2 = error)
// =============================================================================

mod checker;
mod cli;
mod page;
mod report;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tracing::info;
use tracing_subscriber::EnvFilter;

use checker::{BaseAddress, HttpProbe, Validator};
use cli::Cli;
use page::Page;
use report::Report;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = report printed, no inaccessible links
//   Ok(1) = report printed, some links are inaccessible
//   Err   = could not produce a report
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let base = BaseAddress::parse(&cli.url)?;
    let client = checker::build_client(Duration::from_secs(cli.timeout))?;

    let progress = if cli.json {
        ProgressBar::hidden()
    } else {
        link_progress_bar()
    };
    let validator = Validator::new(HttpProbe::new(client.clone()))
        .with_deadline(cli.deadline.map(Duration::from_secs))
        .with_progress(progress);

    let report = inspect(&client, &base, &validator).await?;

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.to_text());
    }

    if report.links.invalid > 0 {
        Ok(1)
    } else {
        Ok(0)
    }
}

// Fetches the page, inspects it and checks its links
async fn inspect(
    client: &Client,
    base: &BaseAddress,
    validator: &Validator<HttpProbe>,
) -> Result<Report> {
    let html = page::fetch_page(client, base).await?;
    let page = Page::parse(&html, base);

    info!(
        candidates = page.candidates.len(),
        anchors = page.links.anchor,
        malformed = page.links.invalid,
        "checking links for validity"
    );

    let mut links = page.links;
    if let Err(e) = validator.validate(base, &page.candidates, &mut links).await {
        return Err(anyhow::Error::new(e).context(format!(
            "link checking aborted (partial counts: anchor={}, internal={}, external={}, inaccessible={})",
            links.anchor, links.internal, links.external, links.invalid
        )));
    }

    Ok(Report::new(base.as_str(), &page, links))
}

// Logs go to stderr so they never mix with the report on stdout.
// RUST_LOG wins over --verbose when set.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn link_progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos}/{len}") {
        bar.set_style(style.progress_chars("=> "));
    }
    bar.set_message("Checking links for validity");
    bar
}
