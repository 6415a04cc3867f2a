//! Query strategy catalog.
//!
//! The search surface has no single reliable "all listings for this shop"
//! call, so discovery tries alternative query shapes in a fixed priority
//! order, most shop-scoped first, most permissive last. The catalog is
//! data: adding a strategy means appending a descriptor here, nothing
//! else branches on it.

use guardian_core::ShopTarget;
use guardian_reverb::RequestSpec;

/// Which acceptance rule the membership verifier applies to candidates
/// produced by a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    /// Shop slug must equal the target slug (case-insensitive).
    Exact,
    /// Target slug must be a substring of the candidate's shop slug or
    /// shop name (case-insensitive).
    Fuzzy,
}

/// The query shape a strategy issues against the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueryShape {
    /// `shops/{slug}/listings` — path keyed directly by shop identifier.
    ShopListings,
    /// `listings?shop_name={slug}` — shop-name filter on the global pool.
    ShopNameFilter,
    /// `listings?query={slug}` — free-text keyword search.
    Keyword,
    /// `listings?query={slug}&ship_to=ANYWHERE` — keyword search with the
    /// shipping-region override, surfacing listings hidden from the
    /// caller's locale.
    CrossRegion,
}

/// One discovery strategy descriptor: a pure description, not an
/// execution. Stateless and reusable across runs.
#[derive(Debug)]
pub struct Strategy {
    pub name: &'static str,
    shape: QueryShape,
    pub tier: MatchTier,
    /// Requested page size; pagination stops on the first page that
    /// returns fewer raw records than this.
    pub page_size_hint: u32,
}

/// The fixed, priority-ordered catalog.
pub const CATALOG: &[Strategy] = &[
    Strategy {
        name: "shop-listings",
        shape: QueryShape::ShopListings,
        tier: MatchTier::Exact,
        page_size_hint: 50,
    },
    Strategy {
        name: "shop-name-filter",
        shape: QueryShape::ShopNameFilter,
        tier: MatchTier::Exact,
        page_size_hint: 50,
    },
    Strategy {
        name: "keyword",
        shape: QueryShape::Keyword,
        tier: MatchTier::Fuzzy,
        page_size_hint: 24,
    },
    Strategy {
        name: "cross-region",
        shape: QueryShape::CrossRegion,
        tier: MatchTier::Fuzzy,
        page_size_hint: 24,
    },
];

impl Strategy {
    /// Builds the request for one page (1-based) of this strategy.
    #[must_use]
    pub fn build_request(&self, target: &ShopTarget, page: u32) -> RequestSpec {
        let mut query = vec![
            ("page".to_owned(), page.to_string()),
            ("per_page".to_owned(), self.page_size_hint.to_string()),
        ];

        let path = match self.shape {
            QueryShape::ShopListings => format!("shops/{}/listings", target.slug),
            QueryShape::ShopNameFilter => {
                query.push(("shop_name".to_owned(), target.slug.clone()));
                "listings".to_owned()
            }
            QueryShape::Keyword => {
                query.push(("query".to_owned(), target.slug.clone()));
                "listings".to_owned()
            }
            QueryShape::CrossRegion => {
                query.push(("query".to_owned(), target.slug.clone()));
                query.push(("ship_to".to_owned(), "ANYWHERE".to_owned()));
                "listings".to_owned()
            }
        };

        RequestSpec { path, query }
    }
}
