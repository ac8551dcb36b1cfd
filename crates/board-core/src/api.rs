//! Listings API client.

use anyhow::{Context, Result};
use tracing::debug;

use crate::listing::Listing;

/// Fetch the full listing collection.
///
/// The endpoint returns a plain JSON array of listings.  Callers observe
/// the result as a resolved `(listings, is_loading, error)` triple; retry
/// and backoff policy live with the caller, not here.
pub async fn fetch_listings(base_url: &str) -> Result<Vec<Listing>> {
    let url = format!("{}/api/listings", base_url.trim_end_matches('/'));

    let client = reqwest::Client::new();
    let response = client
        .get(&url)
        .header("Accept", "application/json")
        .send()
        .await
        .context("Failed to fetch listings")?;

    if !response.status().is_success() {
        anyhow::bail!("Listings API returned status: {}", response.status());
    }

    let listings: Vec<Listing> = response
        .json()
        .await
        .context("Failed to parse listings response")?;

    debug!("fetched {} listings from {}", listings.len(), url);
    Ok(listings)
}
