//! Listing deduplication across strategies and pages.

use std::collections::HashSet;

use guardian_core::VerifiedListing;

/// Merges verified listings into a set unique by listing id.
///
/// First-seen instance wins; later duplicates are dropped without field
/// merging (title/shop fields are assumed consistent across duplicates).
/// Insertion order is preserved. Empty input yields empty output.
#[must_use]
pub fn dedupe(listings: Vec<VerifiedListing>) -> Vec<VerifiedListing> {
    let mut seen: HashSet<String> = HashSet::with_capacity(listings.len());
    let mut unique = Vec::with_capacity(listings.len());
    for listing in listings {
        if seen.insert(listing.id.clone()) {
            unique.push(listing);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(id: &str, title: &str) -> VerifiedListing {
        VerifiedListing {
            id: id.to_owned(),
            title: title.to_owned(),
        }
    }

    #[test]
    fn same_id_from_two_sources_yields_one_entry() {
        let out = dedupe(vec![listing("111", "first"), listing("111", "second")]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "first", "first-seen instance wins");
    }

    #[test]
    fn distinct_ids_are_all_kept_in_order() {
        let out = dedupe(vec![listing("3", "c"), listing("1", "a"), listing("2", "b")]);
        let ids: Vec<&str> = out.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(dedupe(Vec::new()).is_empty());
    }
}
