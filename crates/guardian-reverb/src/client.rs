//! HTTP client for the marketplace listings API.
//!
//! Wraps `reqwest` with the hypermedia content negotiation and bearer
//! authentication the API expects, and exposes the two calls the pipeline
//! needs: a page fetch against the listings search surface and the
//! per-listing moderation flag action. Status-code policy is split by
//! caller: discovery treats any non-2xx search response as a typed error
//! (and soft-handles it), while `flag_listing` hands the raw status back
//! because the bulk executor owns outcome classification.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Url};

use guardian_core::CandidateListing;

use crate::error::ReverbError;
use crate::normalize::normalize_listing;
use crate::types::ListingsPage;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.reverb.com/api";

const HAL_JSON: &str = "application/hal+json";
const ACCEPT_VERSION: &str = "3.0";

/// Flag payload constants for the moderation action.
const FLAG_REASON: &str = "scam";
const FLAG_DESCRIPTION: &str = "Reporting fraudulent listings identified via shop scan.";

/// A pure description of one search request: endpoint path relative to the
/// API root plus query parameters. Produced by discovery strategies,
/// consumed here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    pub path: String,
    pub query: Vec<(String, String)>,
}

/// One fetched page of search results.
#[derive(Debug)]
pub struct SearchPage {
    /// Normalized candidates; records without a usable id are dropped.
    pub candidates: Vec<CandidateListing>,
    /// Raw record count as returned by the API, before normalization.
    /// Pagination termination compares this against the requested page
    /// size, so it must not shrink when malformed records are skipped.
    pub returned: usize,
}

/// Client for the marketplace listings API.
///
/// Use [`ReverbClient::new`] for production or
/// [`ReverbClient::with_base_url`] to point at a mock server in tests.
pub struct ReverbClient {
    client: Client,
    base_url: Url,
}

impl ReverbClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// See [`ReverbClient::with_base_url`].
    pub fn new(token: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ReverbError> {
        Self::with_base_url(token, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// The bearer credential is installed as a default header (marked
    /// sensitive) together with the hypermedia `Accept`/`Content-Type`
    /// pair and the pinned `Accept-Version`.
    ///
    /// # Errors
    ///
    /// - [`ReverbError::InvalidCredential`] — token is not a valid header
    ///   value.
    /// - [`ReverbError::InvalidBaseUrl`] — `base_url` does not parse.
    /// - [`ReverbError::Http`] — the underlying `reqwest::Client` cannot
    ///   be constructed.
    pub fn with_base_url(
        token: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ReverbError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
            ReverbError::InvalidCredential {
                reason: e.to_string(),
            }
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(HAL_JSON));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(HAL_JSON));
        headers.insert(
            HeaderName::from_static("accept-version"),
            HeaderValue::from_static(ACCEPT_VERSION),
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so
        // Url::join appends endpoint paths instead of replacing the last
        // path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ReverbError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Fetches one page of search results described by `request`.
    ///
    /// # Errors
    ///
    /// - [`ReverbError::UnexpectedStatus`] — any non-2xx response.
    /// - [`ReverbError::Http`] — network or TLS failure.
    /// - [`ReverbError::Deserialize`] — body is not the expected envelope.
    /// - [`ReverbError::InvalidBaseUrl`] — `request.path` cannot be joined
    ///   onto the base URL.
    pub async fn search_listings(&self, request: &RequestSpec) -> Result<SearchPage, ReverbError> {
        let url = self.endpoint_url(&request.path, &request.query)?;

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ReverbError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let page =
            serde_json::from_str::<ListingsPage>(&body).map_err(|e| ReverbError::Deserialize {
                context: format!("search page from {url}"),
                source: e,
            })?;

        let returned = page.listings.len();
        let candidates: Vec<CandidateListing> = page
            .listings
            .into_iter()
            .filter_map(normalize_listing)
            .collect();

        if candidates.len() < returned {
            tracing::debug!(
                url = %url,
                dropped = returned - candidates.len(),
                "dropped listing records without a usable id"
            );
        }

        Ok(SearchPage {
            candidates,
            returned,
        })
    }

    /// Submits the moderation flag for one listing and returns the raw
    /// HTTP status code.
    ///
    /// Non-2xx statuses are NOT errors here: 404 and 403 are meaningful
    /// per-item outcomes the executor records without aborting the batch.
    ///
    /// # Errors
    ///
    /// - [`ReverbError::Http`] — network or TLS failure.
    /// - [`ReverbError::InvalidBaseUrl`] — the listing id cannot form a
    ///   valid endpoint URL.
    pub async fn flag_listing(&self, listing_id: &str) -> Result<u16, ReverbError> {
        let url = self.endpoint_url(&format!("listings/{listing_id}/flags"), &[])?;
        let payload = serde_json::json!({
            "reason": FLAG_REASON,
            "description": FLAG_DESCRIPTION,
        });

        // Set Content-Type before .json(): the builder would otherwise
        // install application/json, and default headers only fill vacant
        // entries at send time.
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static(HAL_JSON))
            .json(&payload)
            .send()
            .await?;
        Ok(response.status().as_u16())
    }

    /// Joins an endpoint path onto the base URL and appends query pairs
    /// via `Url::query_pairs_mut`, ensuring all values are safely encoded.
    fn endpoint_url(&self, path: &str, query: &[(String, String)]) -> Result<Url, ReverbError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| ReverbError::InvalidBaseUrl {
                url: format!("{}{path}", self.base_url),
                reason: e.to_string(),
            })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> ReverbClient {
        ReverbClient::with_base_url("test-token", 5, "guardian-test/0.1", base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn endpoint_url_joins_path_onto_base() {
        let client = test_client("https://api.reverb.com/api");
        let url = client.endpoint_url("listings/42/flags", &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.reverb.com/api/listings/42/flags");
    }

    #[test]
    fn endpoint_url_tolerates_trailing_slash_on_base() {
        let client = test_client("https://api.reverb.com/api/");
        let url = client.endpoint_url("listings", &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.reverb.com/api/listings");
    }

    #[test]
    fn endpoint_url_encodes_query_values() {
        let client = test_client("https://api.reverb.com/api");
        let url = client
            .endpoint_url(
                "listings",
                &[("query".to_owned(), "gilmars shop & co".to_owned())],
            )
            .unwrap();
        assert!(
            url.as_str().contains("gilmars+shop+%26+co")
                || url.as_str().contains("gilmars%20shop%20%26%20co"),
            "query param should be percent-encoded: {url}"
        );
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let result = ReverbClient::with_base_url("t", 5, "ua", "not a url");
        assert!(matches!(result, Err(ReverbError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn rejects_credential_with_control_characters() {
        let result = ReverbClient::with_base_url("bad\ntoken", 5, "ua", DEFAULT_BASE_URL);
        assert!(matches!(result, Err(ReverbError::InvalidCredential { .. })));
    }
}
