// src/report.rs
// =============================================================================
// This module turns the findings into output: text tables or JSON.
//
// Tables are drawn with `comfy-table`; JSON goes through serde_json so the
// report can be piped into other tools.
// =============================================================================

use anyhow::Result;
use comfy_table::{presets::ASCII_FULL, Table};
use serde::Serialize;

use crate::checker::LinkTally;
use crate::page::{HeadingCounts, HtmlVersion, Page};

/// The final report for one page.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub url: String,
    pub version: HtmlVersion,
    pub title: Option<String>,
    pub login_page: bool,
    pub headings: HeadingCounts,
    pub links: LinkTally,
}

impl Report {
    pub fn new(url: &str, page: &Page, links: LinkTally) -> Self {
        Self {
            url: url.to_string(),
            version: page.version,
            title: page.title.clone(),
            login_page: page.login_page,
            headings: page.headings,
            links,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    // Renders the human-readable report
    //
    // HTML Version: HTML5
    // Title: Example Domain
    // Login page: false
    // Heading details:
    // +-------+----------+
    // | Level | Quantity |
    // ...
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("HTML Version: {}\n", self.version));
        out.push_str(&format!("Title: {}\n", self.title.as_deref().unwrap_or("")));
        out.push_str(&format!("Login page: {}\n", self.login_page));

        out.push_str("Heading details:\n");
        out.push_str(&quantity_table("Level", &self.headings.rows()).to_string());
        out.push('\n');

        out.push_str("Link details:\n");
        out.push_str(&quantity_table("Link Type", &self.links.rows()).to_string());
        out.push('\n');

        out
    }
}

fn quantity_table(label: &str, rows: &[(&str, usize)]) -> Table {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL).set_header(vec![label, "Quantity"]);

    for (name, count) in rows {
        table.add_row(vec![name.to_string(), count.to_string()]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Report {
        Report {
            url: "https://example.com/".to_string(),
            version: HtmlVersion::Html5,
            title: Some("Example Domain".to_string()),
            login_page: false,
            headings: HeadingCounts {
                h1: 1,
                h2: 3,
                ..HeadingCounts::default()
            },
            links: LinkTally {
                anchor: 2,
                internal: 5,
                external: 4,
                invalid: 1,
            },
        }
    }

    #[test]
    fn test_text_report() {
        let text = sample().to_text();

        assert!(text.starts_with("HTML Version: HTML5\nTitle: Example Domain\nLogin page: false\n"));
        assert!(text.contains("Heading details:"));
        assert!(text.contains("| h2    | 3        |"));
        assert!(text.contains("Link details:"));
        assert!(text.contains("| Inaccessible | 1        |"));
    }

    #[test]
    fn test_json_report() {
        let json: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();

        assert_eq!(json["version"], "HTML5");
        assert_eq!(json["title"], "Example Domain");
        assert_eq!(json["headings"]["h2"], 3);
        assert_eq!(json["links"]["external"], 4);
        assert_eq!(json["links"]["invalid"], 1);
    }
}
