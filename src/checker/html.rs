// src/checker/html.rs
// =============================================================================
// This module extracts links from the parsed HTML page.
//
// Every <a> element ends up in exactly one bucket:
// - malformed target  -> counted as invalid right here
// - points at the page itself (after dropping the #fragment) -> anchor
// - anything else -> a candidate the validator will classify and probe
//
// We use the `scraper` crate to walk the document and the `url` crate to
// resolve relative links the way a browser would.
// =============================================================================

use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use super::base::BaseAddress;
use super::tally::LinkTally;

// Extracts all hyperlinks from a parsed document
//
// Parameters:
//   document: the parsed page
//   base: the page's own address (for resolution and anchor detection)
//   tally: counters to update for anchors and malformed links
//
// Returns: the candidate links in document order. Duplicates are kept on
// purpose: each occurrence gets its own probe.
//
// Example:
//   <a href="#top"> <a href="/docs"> <a href="/docs">
//   base = "https://example.com/"
//   -> tally.anchor = 1
//   -> ["https://example.com/docs", "https://example.com/docs"]
pub fn extract_links(document: &Html, base: &BaseAddress, tally: &mut LinkTally) -> Vec<Url> {
    let mut candidates = Vec::new();

    // Every <a>, not just a[href]: an <a> without href resolves to the
    // page itself and counts as an anchor
    let selector = Selector::parse("a").expect("hard-coded selector is valid");

    for element in document.select(&selector) {
        let href = element.value().attr("href").unwrap_or("");

        let Some(resolved) = resolve_link(base, href) else {
            debug!(href, "malformed link target");
            tally.invalid += 1;
            continue;
        };

        if resolved.as_str() == base.as_str() {
            tally.anchor += 1;
        } else {
            candidates.push(resolved);
        }
    }

    candidates
}

// Resolves an href against the base and strips its fragment
//
// Returns None when the href is not a well-formed URI reference or cannot
// be resolved (e.g. an invalid port).
//
// Examples (base = "https://example.com/page"):
//   ""                  -> Some("https://example.com/page")
//   "#intro"            -> Some("https://example.com/page")
//   "/docs#install"     -> Some("https://example.com/docs")
//   "https://other.com" -> Some("https://other.com/")
//   "ht!tp://%%%"       -> None
fn resolve_link(base: &BaseAddress, href: &str) -> Option<Url> {
    let href = href.trim_matches(|c: char| c.is_ascii_whitespace());

    if !is_well_formed_reference(href) {
        return None;
    }

    // join() handles both cases: absolute hrefs replace the base entirely,
    // relative ones inherit scheme, host and path from it
    let mut resolved = base.as_url().join(href).ok()?;
    resolved.set_fragment(None);
    Some(resolved)
}

// Checks the parts of RFC 3986 reference syntax that the url crate is
// lenient about. The url crate happily accepts "ht!tp://%%%" as a relative
// path, but it is not a valid reference.
fn is_well_formed_reference(href: &str) -> bool {
    if href.bytes().any(|b| b < 0x20 || b == 0x7f) {
        return false;
    }

    // Without a scheme, a colon in the first path segment would be read as
    // one, so it is not allowed ("a:b/c" is not a relative path)
    if scheme_end(href).is_none() {
        let first_segment = href.split(['/', '?', '#']).next().unwrap_or("");
        if first_segment.contains(':') {
            return false;
        }
    }

    // Percent-escapes are checked everywhere except the query
    let (before_fragment, fragment) = match href.split_once('#') {
        Some((before, fragment)) => (before, fragment),
        None => (href, ""),
    };
    let path_part = before_fragment.split('?').next().unwrap_or("");

    has_valid_escapes(path_part) && has_valid_escapes(fragment)
}

// Returns the index of the ':' ending the scheme, if the href has one
//
// scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
fn scheme_end(href: &str) -> Option<usize> {
    for (i, b) in href.bytes().enumerate() {
        match b {
            b'a'..=b'z' | b'A'..=b'Z' => {}
            b'0'..=b'9' | b'+' | b'-' | b'.' if i > 0 => {}
            b':' if i > 0 => return Some(i),
            _ => return None,
        }
    }
    None
}

// Every '%' must start a "%XX" escape with two hex digits
fn has_valid_escapes(part: &str) -> bool {
    let bytes = part.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why compare strings for anchors?
//    - Url normalizes as it parses ("https://example.com" becomes
//      "https://example.com/"), so string equality after resolution is a
//      reliable same-page test
//    - "/page?x=1" is NOT an anchor for "/page": the query changes the
//      resource
//
// 2. Why is javascript:void(0) a candidate?
//    - It parses fine, it just isn't http(s)
//    - The validator will call it external (no host) and the probe will
//      fail, so it also shows up as inaccessible
// -----------------------------------------------------------------------------
