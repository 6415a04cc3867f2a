//! Wire-to-domain normalization for listing records.

use guardian_core::CandidateListing;

use crate::types::ListingRecord;

/// Converts a raw wire record into a [`CandidateListing`].
///
/// Returns `None` only when the record has no usable id — a listing we
/// cannot act on is not worth carrying. Every other absent field falls
/// back to an empty/absent value so downstream verification can decide.
#[must_use]
pub fn normalize_listing(record: ListingRecord) -> Option<CandidateListing> {
    let id = listing_id_string(record.id.as_ref())?;

    let (shop_slug, nested_name) = match record.shop {
        Some(shop) => (
            shop.slug.filter(|s| !s.trim().is_empty()),
            shop.name.filter(|s| !s.trim().is_empty()),
        ),
        None => (None, None),
    };

    Some(CandidateListing {
        id,
        title: record.title.unwrap_or_default(),
        shop_slug,
        shop_name: nested_name.or_else(|| record.shop_name.filter(|s| !s.trim().is_empty())),
    })
}

/// Normalizes the inconsistently-typed wire id into a string.
///
/// Accepts JSON integers and non-empty strings; anything else (floats,
/// objects, blanks) yields `None`.
fn listing_id_string(id: Option<&serde_json::Value>) -> Option<String> {
    match id? {
        serde_json::Value::Number(n) => n.as_u64().map(|v| v.to_string()),
        serde_json::Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ShopRecord;

    fn record(id: serde_json::Value) -> ListingRecord {
        ListingRecord {
            id: Some(id),
            title: Some("Jazzmaster".to_owned()),
            shop: Some(ShopRecord {
                slug: Some("acme-music".to_owned()),
                name: Some("Acme Music Co".to_owned()),
            }),
            shop_name: None,
        }
    }

    #[test]
    fn normalizes_numeric_id() {
        let candidate = normalize_listing(record(serde_json::json!(12_345))).unwrap();
        assert_eq!(candidate.id, "12345");
        assert_eq!(candidate.shop_slug.as_deref(), Some("acme-music"));
        assert_eq!(candidate.shop_name.as_deref(), Some("Acme Music Co"));
    }

    #[test]
    fn normalizes_string_id() {
        let candidate = normalize_listing(record(serde_json::json!("987"))).unwrap();
        assert_eq!(candidate.id, "987");
    }

    #[test]
    fn drops_record_without_id() {
        let mut raw = record(serde_json::json!(1));
        raw.id = None;
        assert!(normalize_listing(raw).is_none());
    }

    #[test]
    fn drops_record_with_blank_string_id() {
        assert!(normalize_listing(record(serde_json::json!("  "))).is_none());
    }

    #[test]
    fn drops_record_with_non_scalar_id() {
        assert!(normalize_listing(record(serde_json::json!({"v": 1}))).is_none());
    }

    #[test]
    fn missing_title_defaults_to_empty() {
        let mut raw = record(serde_json::json!(5));
        raw.title = None;
        let candidate = normalize_listing(raw).unwrap();
        assert!(candidate.title.is_empty());
    }

    #[test]
    fn flat_shop_name_is_used_when_nested_block_is_absent() {
        let raw = ListingRecord {
            id: Some(serde_json::json!(7)),
            title: None,
            shop: None,
            shop_name: Some("Palace Music".to_owned()),
        };
        let candidate = normalize_listing(raw).unwrap();
        assert_eq!(candidate.shop_slug, None);
        assert_eq!(candidate.shop_name.as_deref(), Some("Palace Music"));
    }

    #[test]
    fn nested_name_wins_over_flat_shop_name() {
        let mut raw = record(serde_json::json!(8));
        raw.shop_name = Some("Stale Name".to_owned());
        let candidate = normalize_listing(raw).unwrap();
        assert_eq!(candidate.shop_name.as_deref(), Some("Acme Music Co"));
    }

    #[test]
    fn blank_shop_fields_become_absent() {
        let raw = ListingRecord {
            id: Some(serde_json::json!(9)),
            title: None,
            shop: Some(ShopRecord {
                slug: Some("  ".to_owned()),
                name: None,
            }),
            shop_name: Some(String::new()),
        };
        let candidate = normalize_listing(raw).unwrap();
        assert_eq!(candidate.shop_slug, None);
        assert_eq!(candidate.shop_name, None);
    }
}
