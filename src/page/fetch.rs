// src/page/fetch.rs
// Downloads the page we are going to inspect.

use anyhow::{anyhow, Context, Result};
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::checker::BaseAddress;

// Fetches a web page and returns its HTML content
//
// Anything other than exactly 200 OK is an error: there is no point in
// reporting on an error page.
pub async fn fetch_page(client: &Client, base: &BaseAddress) -> Result<String> {
    let response = client
        .get(base.as_url().clone())
        .send()
        .await
        .with_context(|| format!("Failed to fetch {}", base))?;

    let status = response.status();
    debug!(%status, url = %base, "page fetched");

    if status != StatusCode::OK {
        return Err(anyhow!("status code error: {}", status));
    }

    let html = response
        .text()
        .await
        .with_context(|| format!("Failed to read the body of {}", base))?;
    Ok(html)
}
