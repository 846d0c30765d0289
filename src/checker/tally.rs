// src/checker/tally.rs
// The four link counters that make up the "Link details" part of the report.

use serde::Serialize;

/// Running count of links by category.
///
/// Counters only ever go up. The extractor fills in `anchor` and the
/// malformed part of `invalid`; the validator adds the rest.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinkTally {
    /// Links pointing back at the page itself
    pub anchor: usize,
    /// Links whose host matches the page's host
    pub internal: usize,
    /// Links on any other host
    pub external: usize,
    /// Malformed targets plus links whose probe failed
    pub invalid: usize,
}

impl LinkTally {
    /// Rows for the "Link details" table, in display order.
    pub fn rows(&self) -> [(&'static str, usize); 4] {
        [
            ("Anchor", self.anchor),
            ("Internal", self.internal),
            ("External", self.external),
            ("Inaccessible", self.invalid),
        ]
    }
}
