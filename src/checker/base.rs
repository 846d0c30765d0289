// src/checker/base.rs
// =============================================================================
// The address of the page being inspected.
//
// Every link on the page is resolved against this address, and its host is
// the yardstick for "internal" versus "external". It never changes during
// a run, so we wrap it in a small newtype that only hands out shared views.
// =============================================================================

use anyhow::{anyhow, Result};
use url::Url;

/// Absolute http(s) address of the fetched page, without a fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseAddress {
    url: Url,
}

impl BaseAddress {
    // Parses the address typed on the command line
    //
    // Only http and https are accepted since we have to fetch the page.
    // A fragment is dropped: it is never sent to the server, so it is not
    // part of the page's identity.
    pub fn parse(input: &str) -> Result<Self> {
        let url = Url::parse(input).map_err(|e| anyhow!("Invalid URL '{}': {}", input, e))?;
        Self::from_url(url)
    }

    pub fn from_url(mut url: Url) -> Result<Self> {
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(anyhow!(
                "Unsupported scheme '{}' in {} (expected http or https)",
                url.scheme(),
                url
            ));
        }
        if url.host_str().is_none() {
            return Err(anyhow!("URL has no host: {}", url));
        }

        url.set_fragment(None);
        Ok(Self { url })
    }

    pub fn as_url(&self) -> &Url {
        &self.url
    }

    /// Normalized string form, used for the same-page comparison.
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }
}

impl std::fmt::Display for BaseAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.url.as_str())
    }
}
