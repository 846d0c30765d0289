// src/page/mod.rs
// =============================================================================
// This module fetches the page and pulls everything we report out of it.
//
// Submodules:
// - fetch: downloads the page (must answer 200 OK)
// - inspect: doctype, title, login form, heading counts
//
// Page::parse does all the tree work in one go, so the parsed HTML is gone
// by the time the (slow, async) link validation starts.
// =============================================================================

mod fetch;
mod inspect;

use scraper::Html;
use url::Url;

use crate::checker::{extract_links, BaseAddress, LinkTally};

pub use fetch::fetch_page;
pub use inspect::{HeadingCounts, HtmlVersion};

/// Everything learned from the page's HTML alone.
#[derive(Debug)]
pub struct Page {
    pub version: HtmlVersion,
    pub title: Option<String>,
    pub login_page: bool,
    pub headings: HeadingCounts,
    /// Anchor and malformed-link counts; the validator fills in the rest
    pub links: LinkTally,
    /// Links still to be classified and probed, in document order
    pub candidates: Vec<Url>,
}

impl Page {
    pub fn parse(html: &str, base: &BaseAddress) -> Self {
        let document = Html::parse_document(html);

        let mut links = LinkTally::default();
        let candidates = extract_links(&document, base, &mut links);

        Self {
            version: inspect::html_version(&document),
            title: inspect::title(&document),
            login_page: inspect::has_login_form(&document),
            headings: inspect::count_headings(&document),
            links,
            candidates,
        }
    }
}
