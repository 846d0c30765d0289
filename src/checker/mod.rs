// src/checker/mod.rs
// =============================================================================
// This module contains all link checking logic.
//
// Submodules:
// - base: the page's own address
// - tally: the four link counters
// - html: extracts links from the parsed page (anchors, malformed, candidates)
// - http: builds the HTTP client and probes a single link
// - validate: classifies and probes candidates with pacing
// =============================================================================

mod base;
mod html;
mod http;
mod tally;
mod validate;

pub use base::BaseAddress;
pub use html::extract_links;
pub use http::{build_client, HttpProbe};
pub use tally::LinkTally;
pub use validate::Validator;
