// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There is only one thing to do, so there are no subcommands: give us a
// URL and we report on that page.
// =============================================================================

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "page-inspector",
    version,
    about = "Inspect a web page: HTML version, title, login form, headings and link health",
    long_about = "page-inspector fetches a single page and reports its HTML version, title, \
                  whether it has a login form, how many headings of each level it has, and \
                  how its links break down into anchor, internal, external and inaccessible. \
                  Links are checked one at a time, one second apart."
)]
pub struct Cli {
    /// URL of the page to inspect (e.g., https://example.com)
    pub url: String,

    /// Output the report in JSON format instead of tables
    #[arg(long)]
    pub json: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10, value_name = "SECS")]
    pub timeout: u64,

    /// Stop checking links after this many seconds and report what we have
    #[arg(long, value_name = "SECS")]
    pub deadline: Option<u64>,

    /// Show debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}
