//! Raw-HTML listing-id extraction.
//!
//! Alternative seed source for the bulk executor: read the public shop
//! page directly and harvest listing ids from the markup. Used when the
//! API-side discovery strategies come up empty (the search surface hides
//! listings from some callers) or when the operator explicitly asks for
//! scrape mode. Ids harvested here skip membership verification — the
//! operator supplied the page, so the page is the authority.

use std::time::Duration;

use regex::Regex;
use reqwest::header::ACCEPT;
use reqwest::Client;

use crate::error::ReverbError;

/// Fetches the HTML body of a public shop page.
///
/// Plain unauthenticated GET; the shop page is public storefront HTML,
/// not an API resource.
///
/// # Errors
///
/// - [`ReverbError::Http`] — network or TLS failure, or client build
///   failure.
/// - [`ReverbError::UnexpectedStatus`] — any non-2xx response.
pub async fn fetch_shop_page(
    url: &str,
    timeout_secs: u64,
    user_agent: &str,
) -> Result<String, ReverbError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?;

    let response = client
        .get(url)
        .header(ACCEPT, "text/html,application/xhtml+xml")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ReverbError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_owned(),
        });
    }

    Ok(response.text().await?)
}

/// Harvests numeric listing ids from shop-page HTML.
///
/// Listing cards carry a `data-listing-id` attribute; when none are
/// present (markup variant without data attributes), item links of the
/// form `/item/<digits>-title` are scanned instead. First-seen order,
/// deduplicated.
#[must_use]
pub fn extract_listing_ids(html: &str) -> Vec<String> {
    let attr_re = Regex::new(r#"data-listing-id=["']?(\d+)"#).expect("valid regex");
    let mut ids = collect_ids(&attr_re, html);

    if ids.is_empty() {
        let link_re = Regex::new(r"/item/(\d+)").expect("valid regex");
        ids = collect_ids(&link_re, html);
    }

    ids
}

fn collect_ids(re: &Regex, html: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut ids = Vec::new();
    for captures in re.captures_iter(html) {
        if let Some(id) = captures.get(1) {
            if seen.insert(id.as_str()) {
                ids.push(id.as_str().to_owned());
            }
        }
    }
    ids
}
