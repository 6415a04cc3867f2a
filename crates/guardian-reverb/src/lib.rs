pub mod client;
pub mod error;
pub mod html;
pub mod normalize;
pub mod types;

pub use client::{RequestSpec, ReverbClient, SearchPage, DEFAULT_BASE_URL};
pub use error::ReverbError;
pub use html::extract_listing_ids;
pub use normalize::normalize_listing;
pub use types::{ListingRecord, ListingsPage, ShopRecord};
