//! Shop identifier normalization.
//!
//! Operators paste shop identity in several spellings: a full shop URL
//! (`https://reverb.com/shop/gilmars-shop-5`), the same with trailing
//! slashes, query strings, or fragments, or just the bare slug. All of
//! them normalize to the lowercase slug the rest of the pipeline keys on.

use crate::error::TargetError;

/// Identity of the storefront under investigation.
///
/// Immutable for the duration of one run; construct via [`ShopTarget::parse`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ShopTarget {
    pub slug: String,
}

impl ShopTarget {
    /// Normalizes operator input (full shop URL or bare slug) into a target.
    ///
    /// URLs must carry a `/shop/<slug>` path segment; bare tokens are taken
    /// as the slug directly. The slug is lowercased and restricted to
    /// `[a-z0-9._-]`.
    ///
    /// # Errors
    ///
    /// - [`TargetError::Empty`] — blank input.
    /// - [`TargetError::MissingShopSegment`] — a URL-shaped input with no
    ///   `/shop/<slug>` segment.
    /// - [`TargetError::InvalidSlug`] — slug contains disallowed characters.
    pub fn parse(input: &str) -> Result<Self, TargetError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(TargetError::Empty);
        }

        let raw = if trimmed.contains('/') {
            extract_slug_segment(trimmed)?
        } else {
            trimmed
        };

        let slug = raw.to_lowercase();
        if slug.is_empty() {
            return Err(TargetError::Empty);
        }
        if !slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        {
            return Err(TargetError::InvalidSlug { slug });
        }

        Ok(Self { slug })
    }
}

impl std::fmt::Display for ShopTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug)
    }
}

/// Pulls the path segment following `shop` out of a URL-shaped input.
///
/// Avoids a URL-parsing dependency for this one operation: strip fragment
/// and query, drop the scheme, then scan path segments.
fn extract_slug_segment(input: &str) -> Result<&str, TargetError> {
    let without_fragment = input.split('#').next().unwrap_or(input);
    let without_query = without_fragment.split('?').next().unwrap_or(without_fragment);
    let path = without_query
        .rsplit("://")
        .next()
        .unwrap_or(without_query);

    let mut segments = path.split('/').filter(|s| !s.is_empty());
    while let Some(segment) = segments.next() {
        if segment.eq_ignore_ascii_case("shop") {
            return segments.next().ok_or_else(|| TargetError::MissingShopSegment {
                input: input.to_owned(),
            });
        }
    }

    Err(TargetError::MissingShopSegment {
        input: input.to_owned(),
    })
}
