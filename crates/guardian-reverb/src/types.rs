//! Wire types for the marketplace's hypermedia listings responses.
//!
//! ## Observed shape
//!
//! The search surface returns an `application/hal+json` envelope whose
//! useful payload is the `listings` array. Everything else (`total`,
//! `_links`, per-listing `_links`, price blocks) varies by endpoint and
//! caller locale, so every field here is `#[serde(default)]`: one absent
//! or malformed field must never invalidate an otherwise-valid record.
//!
//! ### `id`
//! A numeric listing id, but serialized inconsistently — some endpoints
//! emit a JSON number, others a string. Modeled as `serde_json::Value`
//! and normalized in `normalize.rs`.
//!
//! ### Shop identity
//! Usually a nested `shop` object carrying `slug` and `name`; keyword
//! search results sometimes carry only a flat `shop_name` string. Both
//! spellings are kept and merged during normalization.

use serde::Deserialize;

/// Top-level envelope from the listings search surface.
#[derive(Debug, Deserialize)]
pub struct ListingsPage {
    #[serde(default)]
    pub total: Option<u64>,

    #[serde(default)]
    pub listings: Vec<ListingRecord>,
}

/// A single raw listing record, fields as observed on the wire.
#[derive(Debug, Deserialize)]
pub struct ListingRecord {
    /// Listing id; JSON number or string depending on endpoint.
    #[serde(default)]
    pub id: Option<serde_json::Value>,

    #[serde(default)]
    pub title: Option<String>,

    /// Nested shop identity block.
    #[serde(default)]
    pub shop: Option<ShopRecord>,

    /// Flat shop name, present on some keyword-search results instead of
    /// the nested block.
    #[serde(default)]
    pub shop_name: Option<String>,
}

/// Nested shop identity inside a listing record.
#[derive(Debug, Deserialize)]
pub struct ShopRecord {
    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default)]
    pub name: Option<String>,
}
