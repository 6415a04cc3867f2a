//! Membership verification.
//!
//! Search endpoints return false positives when the shop identifier
//! substring-matches unrelated shops or titles, so every candidate is
//! checked against the requested target before it is acted on. Pure and
//! stateless; never issues network calls.

use guardian_core::{CandidateListing, ShopTarget};

use crate::strategy::MatchTier;

/// Decides whether a candidate genuinely belongs to the target shop.
///
/// Precise endpoints already scope by shop, so the exact tier merely
/// guards against API inconsistency. Broad/keyword endpoints can return
/// unrelated shops whose name happens to contain the slug text, so the
/// fuzzy tier anchors acceptance on the target while staying reachable
/// when exact slugs drift. The fuzzy substring rule can still admit false
/// positives for common-word slugs; that imprecision is intentional.
#[must_use]
pub fn accepts(tier: MatchTier, candidate: &CandidateListing, target: &ShopTarget) -> bool {
    match tier {
        MatchTier::Exact => candidate
            .shop_slug
            .as_deref()
            .is_some_and(|slug| slug.eq_ignore_ascii_case(&target.slug)),
        MatchTier::Fuzzy => {
            let needle = target.slug.to_lowercase();
            contains_ci(candidate.shop_slug.as_deref(), &needle)
                || contains_ci(candidate.shop_name.as_deref(), &needle)
        }
    }
}

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(needle))
}
