//! Bulk moderation action executor.
//!
//! Iterates the verified set and either previews (dry-run) or submits
//! (live) the moderation flag per listing, pacing with a fixed sleep and
//! recording one outcome per listing. Per-item failures are data, not
//! errors: a 403 on listing two never stops listing three.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use guardian_core::{ActionResult, ReportOutcome, RunMode, VerifiedListing};
use guardian_reverb::ReverbClient;

/// Processes every listing and returns the ordered run summary.
///
/// Listings are processed sorted by id (numeric-aware) so summaries are
/// deterministic regardless of discovery order. The fixed `delay` sleeps
/// between items, never after the last. The `abort` flag is checked
/// between items: a cooperative interrupt yields the partial summary
/// collected so far instead of losing it.
///
/// Nothing here guards against two concurrent runs over the same shop;
/// a caller driving both can duplicate actions.
pub async fn execute(
    client: &ReverbClient,
    listings: &[VerifiedListing],
    mode: RunMode,
    delay: Duration,
    abort: &AtomicBool,
) -> Vec<ReportOutcome> {
    let mut ordered: Vec<&VerifiedListing> = listings.iter().collect();
    ordered.sort_by(|a, b| id_sort_key(&a.id).cmp(&id_sort_key(&b.id)));

    let mut outcomes = Vec::with_capacity(ordered.len());

    for (index, listing) in ordered.into_iter().enumerate() {
        if index > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if abort.load(Ordering::Relaxed) {
            tracing::warn!(
                processed = outcomes.len(),
                total = listings.len(),
                "run aborted; returning partial summary"
            );
            break;
        }

        let (result, status_code) = match mode {
            RunMode::DryRun => {
                tracing::info!(listing_id = %listing.id, "dry-run: would flag listing");
                (ActionResult::Previewed, None)
            }
            RunMode::Live => match client.flag_listing(&listing.id).await {
                Ok(status) => classify_status(status),
                Err(err) => {
                    tracing::warn!(listing_id = %listing.id, error = %err, "flag call failed");
                    (ActionResult::Failed, None)
                }
            },
        };

        outcomes.push(ReportOutcome {
            listing_id: listing.id.clone(),
            title: listing.title.clone(),
            mode,
            result,
            status_code,
        });
    }

    outcomes
}

/// Maps a flag-call HTTP status to a per-item outcome.
///
/// 404 means the listing is likely already removed or hidden from this
/// caller; 403 means the caller lacks permission. Both are recorded and
/// the run continues.
fn classify_status(status: u16) -> (ActionResult, Option<u16>) {
    let result = match status {
        200 | 201 | 204 => ActionResult::Succeeded,
        404 => ActionResult::NotFound,
        403 => ActionResult::Forbidden,
        _ => ActionResult::Failed,
    };
    (result, Some(status))
}

/// Sort key ordering numeric ids numerically and anything else
/// lexicographically after them.
fn id_sort_key(id: &str) -> (u8, u64, &str) {
    id.parse::<u64>().map_or((1, 0, id), |n| (0, n, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_status_maps_success_codes() {
        assert_eq!(classify_status(200).0, ActionResult::Succeeded);
        assert_eq!(classify_status(201).0, ActionResult::Succeeded);
        assert_eq!(classify_status(204).0, ActionResult::Succeeded);
    }

    #[test]
    fn classify_status_maps_known_failures() {
        assert_eq!(classify_status(404).0, ActionResult::NotFound);
        assert_eq!(classify_status(403).0, ActionResult::Forbidden);
    }

    #[test]
    fn classify_status_treats_other_statuses_as_failed() {
        assert_eq!(classify_status(500), (ActionResult::Failed, Some(500)));
        // 202 is not in the observed success set.
        assert_eq!(classify_status(202), (ActionResult::Failed, Some(202)));
    }

    #[test]
    fn id_sort_key_orders_numerically_before_lexically() {
        let mut ids = vec!["10", "2", "abc", "1"];
        ids.sort_by(|a, b| id_sort_key(a).cmp(&id_sort_key(b)));
        assert_eq!(ids, vec!["1", "2", "10", "abc"]);
    }
}
