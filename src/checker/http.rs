// src/checker/http.rs
// =============================================================================
// This module checks whether a single link is reachable.
//
// Key functionality:
// - Builds the one HTTP client shared by the page fetch and every probe
// - Makes HTTP HEAD requests (lightweight, no body download)
// - Turns each attempt into a ProbeOutcome the validator can count
//
// Only an exact 200 counts as reachable. Everything the network can throw
// at us (timeouts, DNS, refused connections, TLS, odd schemes) becomes
// Unreachable. The one thing that is our own fault, failing to release the
// response, gets its own variant so the validator can stop the run.
// =============================================================================

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, StatusCode};
use url::Url;

// Redirects are followed, up to this many hops
const MAX_REDIRECTS: usize = 10;

// What happened when we probed one link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Got exactly 200 OK
    Ok,
    /// Got a response, but not 200 (404, 500, even 204)
    NonSuccessStatus(StatusCode),
    /// The request never produced a response
    Unreachable(String),
    /// The response could not be released
    ResourceError(String),
}

/// Anything that can tell us whether a URL is reachable.
///
/// The validator is generic over this so tests can script outcomes
/// without a network.
pub trait Probe {
    fn probe(&self, url: &Url) -> impl Future<Output = ProbeOutcome>;
}

// Creates the HTTP client used for the whole run
//
// We reuse this client for all requests (connection pooling). The timeout
// applies to each request individually.
pub fn build_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Probes links with a HEAD request over a shared client.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl Probe for HttpProbe {
    async fn probe(&self, url: &Url) -> ProbeOutcome {
        let response = match self.client.head(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => return ProbeOutcome::Unreachable(describe_error(&e)),
        };

        let status = response.status();

        // A HEAD response has no body, but it still has to be drained so
        // the connection goes back to the pool
        if let Err(e) = response.bytes().await {
            return ProbeOutcome::ResourceError(e.to_string());
        }

        if status == StatusCode::OK {
            ProbeOutcome::Ok
        } else {
            ProbeOutcome::NonSuccessStatus(status)
        }
    }
}

// Gives a short human-readable reason for a failed request
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure
// - SSL certificate issues
// - Too many redirects
// - A scheme we can't speak (mailto:, javascript:, ...)
fn describe_error(error: &reqwest::Error) -> String {
    let error_string = error.to_string();

    if error.is_timeout() {
        "Request timed out".to_string()
    } else if error.is_redirect() {
        "Too many redirects".to_string()
    } else if error.is_builder() {
        format!("Cannot request this URL: {}", error_string)
    } else if error.is_connect() {
        if error_string.contains("dns") {
            "Could not resolve hostname".to_string()
        } else {
            "Connection failed".to_string()
        }
    } else if error_string.contains("certificate") || error_string.contains("ssl") {
        "SSL certificate error".to_string()
    } else {
        error_string
    }
}
