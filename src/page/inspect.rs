// src/page/inspect.rs
// =============================================================================
// Simple structural questions about a parsed page:
// - which HTML version does the doctype declare?
// - what is the title?
// - is there a login form on it?
// - how many headings of each level are there?
//
// These are all plain tree queries with `scraper`.
// =============================================================================

use scraper::{Html, Selector};
use serde::Serialize;

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("hard-coded selector is valid")
}

/// HTML version declared by the document's doctype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HtmlVersion {
    #[serde(rename = "HTML5")]
    Html5,
    #[serde(rename = "XHTML 1.1")]
    Xhtml11,
    #[serde(rename = "XHTML 1.0")]
    Xhtml10,
    #[serde(rename = "HTML 4.01")]
    Html401,
    #[serde(rename = "HTML 3.2")]
    Html32,
    #[serde(rename = "HTML 2.0")]
    Html20,
    Unknown,
}

impl std::fmt::Display for HtmlVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            HtmlVersion::Html5 => "HTML5",
            HtmlVersion::Xhtml11 => "XHTML 1.1",
            HtmlVersion::Xhtml10 => "XHTML 1.0",
            HtmlVersion::Html401 => "HTML 4.01",
            HtmlVersion::Html32 => "HTML 3.2",
            HtmlVersion::Html20 => "HTML 2.0",
            HtmlVersion::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

// Works out the HTML version from the doctype
//
// Examples:
//   <!DOCTYPE html>                                          -> HTML5
//   <!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01//EN" "...">  -> HTML 4.01
//   (no doctype)                                             -> Unknown
pub fn html_version(document: &Html) -> HtmlVersion {
    let doctype = document
        .tree
        .root()
        .children()
        .find_map(|node| node.value().as_doctype());

    let Some(doctype) = doctype else {
        return HtmlVersion::Unknown;
    };

    if !doctype.name().eq_ignore_ascii_case("html") {
        return HtmlVersion::Unknown;
    }

    let public_id = doctype.public_id().to_ascii_uppercase();
    if public_id.is_empty() {
        HtmlVersion::Html5
    } else if public_id.contains("XHTML 1.1") {
        HtmlVersion::Xhtml11
    } else if public_id.contains("XHTML 1.0") {
        HtmlVersion::Xhtml10
    } else if public_id.contains("HTML 4.01") || public_id.contains("HTML 4.0") {
        HtmlVersion::Html401
    } else if public_id.contains("HTML 3.2") {
        HtmlVersion::Html32
    } else if public_id.contains("HTML 2.0") {
        HtmlVersion::Html20
    } else {
        HtmlVersion::Unknown
    }
}

/// Text of the first `<title>`, trimmed. `None` when there is no title.
pub fn title(document: &Html) -> Option<String> {
    document
        .select(&selector("title"))
        .next()
        .map(|title| title.text().collect::<String>().trim().to_string())
}

// A login page is one with a form holding a password field
pub fn has_login_form(document: &Html) -> bool {
    let input = selector("input");
    document.select(&selector("form")).any(|form| {
        form.select(&input).any(|field| {
            field
                .value()
                .attr("type")
                .is_some_and(|kind| kind.trim().eq_ignore_ascii_case("password"))
        })
    })
}

/// Number of headings per level.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeadingCounts {
    pub h1: usize,
    pub h2: usize,
    pub h3: usize,
    pub h4: usize,
    pub h5: usize,
    pub h6: usize,
}

impl HeadingCounts {
    /// Rows for the "Heading details" table, h1 first.
    pub fn rows(&self) -> [(&'static str, usize); 6] {
        [
            ("h1", self.h1),
            ("h2", self.h2),
            ("h3", self.h3),
            ("h4", self.h4),
            ("h5", self.h5),
            ("h6", self.h6),
        ]
    }
}

pub fn count_headings(document: &Html) -> HeadingCounts {
    let mut counts = HeadingCounts::default();

    for heading in document.select(&selector("h1, h2, h3, h4, h5, h6")) {
        match heading.value().name() {
            "h1" => counts.h1 += 1,
            "h2" => counts.h2 += 1,
            "h3" => counts.h3 += 1,
            "h4" => counts.h4 += 1,
            "h5" => counts.h5 += 1,
            "h6" => counts.h6 += 1,
            _ => {}
        }
    }

    counts
}
