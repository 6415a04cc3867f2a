//! Discovery engine.
//!
//! Tries the strategy catalog in priority order and returns the first
//! strategy's verified yield. Transport failures, non-2xx statuses, and
//! malformed bodies are soft: the page contributes nothing, the strategy
//! ends, and the engine moves on. Discovery as a whole never errors —
//! "nothing found" is a reported condition, not an exception.

use std::time::Duration;

use guardian_core::{ShopTarget, VerifiedListing};
use guardian_reverb::ReverbClient;

use crate::dedupe::dedupe;
use crate::strategy::{Strategy, CATALOG};
use crate::verify::accepts;

/// Engine tuning knobs; see `AppConfig` for the env-var surface.
#[derive(Debug, Clone)]
pub struct DiscoverySettings {
    /// Runaway guard: hard cap on pages fetched per strategy.
    pub max_pages_per_strategy: u32,
    /// Pacing sleep between page requests within a strategy.
    pub page_delay: Duration,
    /// Consecutive strategies accepting zero listings before discovery
    /// is abandoned.
    pub max_barren_strategies: u32,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            max_pages_per_strategy: 50,
            page_delay: Duration::from_millis(500),
            // Try the whole catalog by default.
            max_barren_strategies: u32::try_from(CATALOG.len()).unwrap_or(u32::MAX),
        }
    }
}

/// Finds the target shop's listings via prioritized fallback strategies.
///
/// First-success-wins: once a strategy yields at least one verified
/// listing, later strategies are skipped — a deliberate trade of
/// cross-strategy completeness for call economy. Output order carries no
/// meaning; the executor imposes its own deterministic ordering.
///
/// Returns an empty set when every strategy comes up empty (or
/// `max_barren_strategies` consecutive ones do) — the caller reports
/// that as discovery failure.
pub async fn discover(
    client: &ReverbClient,
    target: &ShopTarget,
    settings: &DiscoverySettings,
) -> Vec<VerifiedListing> {
    let mut barren = 0u32;

    for strategy in CATALOG {
        if barren >= settings.max_barren_strategies {
            tracing::warn!(
                slug = %target.slug,
                barren,
                "abandoning discovery after consecutive barren strategies"
            );
            return Vec::new();
        }

        let accepted = run_strategy(client, strategy, target, settings).await;
        if accepted.is_empty() {
            tracing::debug!(strategy = strategy.name, slug = %target.slug, "strategy yielded nothing");
            barren += 1;
            continue;
        }

        let unique = dedupe(accepted);
        tracing::info!(
            strategy = strategy.name,
            slug = %target.slug,
            count = unique.len(),
            "strategy yielded verified listings; skipping remaining strategies"
        );
        return unique;
    }

    tracing::warn!(slug = %target.slug, "no strategy yielded verified listings");
    Vec::new()
}

/// Paginates one strategy until a short page, a failed page, or the page
/// cap, verifying candidates as they arrive.
async fn run_strategy(
    client: &ReverbClient,
    strategy: &Strategy,
    target: &ShopTarget,
    settings: &DiscoverySettings,
) -> Vec<VerifiedListing> {
    let mut accepted: Vec<VerifiedListing> = Vec::new();

    for page in 1..=settings.max_pages_per_strategy {
        if page > 1 && !settings.page_delay.is_zero() {
            tokio::time::sleep(settings.page_delay).await;
        }

        let request = strategy.build_request(target, page);
        let fetched = match client.search_listings(&request).await {
            Ok(fetched) => fetched,
            Err(err) => {
                // Soft failure: keep whatever earlier pages verified and
                // let the engine decide whether another strategy is needed.
                tracing::warn!(
                    strategy = strategy.name,
                    page,
                    error = %err,
                    "search page failed; ending strategy"
                );
                break;
            }
        };

        let returned = fetched.returned;
        for candidate in fetched.candidates {
            if accepts(strategy.tier, &candidate, target) {
                accepted.push(VerifiedListing::from(candidate));
            } else {
                tracing::debug!(
                    strategy = strategy.name,
                    listing_id = %candidate.id,
                    shop_slug = candidate.shop_slug.as_deref().unwrap_or(""),
                    "rejected candidate from another shop"
                );
            }
        }

        // A short page means the pool is exhausted.
        if returned < strategy.page_size_hint as usize {
            break;
        }

        if page == settings.max_pages_per_strategy {
            tracing::warn!(
                strategy = strategy.name,
                max_pages = settings.max_pages_per_strategy,
                "page cap reached; ending strategy"
            );
        }
    }

    accepted
}
