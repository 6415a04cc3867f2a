//! Domain types shared across the discovery pipeline and the executor.

use serde::Serialize;

/// A raw, unverified result item returned by a discovery strategy.
///
/// Shop identity fields are optional because the search surface omits or
/// nests them inconsistently; the membership verifier decides what is
/// acceptable per strategy tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateListing {
    pub id: String,
    pub title: String,
    pub shop_slug: Option<String>,
    pub shop_name: Option<String>,
}

/// A listing the bulk action executor operates on: either a candidate that
/// passed membership verification, or an operator-seeded id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifiedListing {
    pub id: String,
    pub title: String,
}

impl VerifiedListing {
    /// Wraps a manually supplied listing id.
    ///
    /// Seeded ids bypass discovery and verification entirely — the operator
    /// vouches for them. No title is available for seeds.
    #[must_use]
    pub fn seeded(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
        }
    }
}

impl From<CandidateListing> for VerifiedListing {
    fn from(candidate: CandidateListing) -> Self {
        Self {
            id: candidate.id,
            title: candidate.title,
        }
    }
}

/// Whether a run previews or performs the moderation action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    DryRun,
    Live,
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunMode::DryRun => write!(f, "dry-run"),
            RunMode::Live => write!(f, "live"),
        }
    }
}

/// Classified outcome of processing one listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionResult {
    /// Dry-run: no call was made.
    Previewed,
    /// The flag action was accepted.
    Succeeded,
    /// 404 — listing likely already removed, or hidden from this caller.
    NotFound,
    /// 403 — caller lacks permission for this listing.
    Forbidden,
    /// Any other status, or a transport failure.
    Failed,
}

impl std::fmt::Display for ActionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionResult::Previewed => write!(f, "previewed"),
            ActionResult::Succeeded => write!(f, "succeeded"),
            ActionResult::NotFound => write!(f, "not-found"),
            ActionResult::Forbidden => write!(f, "forbidden"),
            ActionResult::Failed => write!(f, "failed"),
        }
    }
}

/// One record per processed listing; the run summary is the ordered
/// sequence of these. Created by the executor, never mutated afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportOutcome {
    pub listing_id: String,
    pub title: String,
    pub mode: RunMode,
    pub result: ActionResult,
    pub status_code: Option<u16>,
}

/// Aggregate counts over a run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub previewed: usize,
    pub succeeded: usize,
    pub not_found: usize,
    pub forbidden: usize,
    pub failed: usize,
}

impl Tally {
    /// Counts outcomes by result class.
    #[must_use]
    pub fn of(outcomes: &[ReportOutcome]) -> Self {
        let mut tally = Self::default();
        for outcome in outcomes {
            match outcome.result {
                ActionResult::Previewed => tally.previewed += 1,
                ActionResult::Succeeded => tally.succeeded += 1,
                ActionResult::NotFound => tally.not_found += 1,
                ActionResult::Forbidden => tally.forbidden += 1,
                ActionResult::Failed => tally.failed += 1,
            }
        }
        tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(result: ActionResult) -> ReportOutcome {
        ReportOutcome {
            listing_id: "1".to_owned(),
            title: String::new(),
            mode: RunMode::Live,
            result,
            status_code: None,
        }
    }

    #[test]
    fn tally_counts_each_result_class() {
        let outcomes = vec![
            outcome(ActionResult::Succeeded),
            outcome(ActionResult::Succeeded),
            outcome(ActionResult::Forbidden),
            outcome(ActionResult::NotFound),
            outcome(ActionResult::Failed),
        ];
        let tally = Tally::of(&outcomes);
        assert_eq!(tally.succeeded, 2);
        assert_eq!(tally.forbidden, 1);
        assert_eq!(tally.not_found, 1);
        assert_eq!(tally.failed, 1);
        assert_eq!(tally.previewed, 0);
    }

    #[test]
    fn tally_of_empty_summary_is_zero() {
        assert_eq!(Tally::of(&[]), Tally::default());
    }

    #[test]
    fn seeded_listing_has_empty_title() {
        let listing = VerifiedListing::seeded("12345");
        assert_eq!(listing.id, "12345");
        assert!(listing.title.is_empty());
    }

    #[test]
    fn report_outcome_serializes_result_as_snake_case() {
        let json = serde_json::to_value(outcome(ActionResult::NotFound)).unwrap();
        assert_eq!(json["result"], "not_found");
        assert_eq!(json["mode"], "live");
    }

    #[test]
    fn verified_listing_keeps_candidate_identity() {
        let candidate = CandidateListing {
            id: "111".to_owned(),
            title: "Stratocaster".to_owned(),
            shop_slug: Some("acme".to_owned()),
            shop_name: None,
        };
        let verified = VerifiedListing::from(candidate);
        assert_eq!(verified.id, "111");
        assert_eq!(verified.title, "Stratocaster");
    }
}
