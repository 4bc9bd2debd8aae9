//! Anchor id derivation from heading text.

/// Minimum length for a derived slug to be usable as an anchor id.
const MIN_SLUG_LEN: usize = 2;

/// Convert heading text to a URL-friendly anchor id.
///
/// Lower-cases, strips everything but alphanumerics and whitespace,
/// collapses whitespace runs to single hyphens, and trims leading/trailing
/// hyphens. Deterministic: the same text always yields the same id.
///
/// ```
/// use waymark_toc::slugify;
///
/// assert_eq!(slugify("Getting Started!"), "getting-started");
/// assert_eq!(slugify("  Meta   Tags  "), "meta-tags");
/// assert_eq!(slugify("🚀"), "");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_hyphen = true;
        }
        // All other characters are stripped without acting as separators
    }

    slug
}

/// Derive the anchor id for a heading, with positional fallback.
///
/// Returns `heading-{ordinal}` when the slug is empty or shorter than two
/// characters; `ordinal` is the heading's 0-based position among all
/// scanned headings.
#[must_use]
pub fn anchor_id(text: &str, ordinal: usize) -> String {
    let slug = slugify(text);
    if slug.len() < MIN_SLUG_LEN {
        format!("heading-{ordinal}")
    } else {
        slug
    }
}

/// Disambiguate an anchor id against the set of ids already used.
///
/// First occurrence keeps the base id; later collisions get `-1`, `-2`…
/// suffixes. The returned id is recorded in `used`.
#[must_use]
pub fn unique_anchor_id(base: &str, used: &mut std::collections::HashSet<String>) -> String {
    let mut id = base.to_owned();
    let mut counter = 1;
    while used.contains(&id) {
        id = format!("{base}-{counter}");
        counter += 1;
    }
    used.insert(id.clone());
    id
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Section Title"), "section-title");
    }

    #[test]
    fn test_slugify_strips_punctuation() {
        assert_eq!(slugify("Getting Started!"), "getting-started");
        assert_eq!(slugify("What's New?"), "whats-new");
    }

    #[test]
    fn test_slugify_collapses_whitespace() {
        assert_eq!(slugify("a    b\t c"), "a-b-c");
    }

    #[test]
    fn test_slugify_trims_hyphens() {
        assert_eq!(slugify("  - leading and trailing - "), "leading-and-trailing");
    }

    #[test]
    fn test_slugify_emoji_only_is_empty() {
        assert_eq!(slugify("🚀"), "");
    }

    #[test]
    fn test_anchor_id_fallback_for_short_slug() {
        assert_eq!(anchor_id("🚀", 3), "heading-3");
        assert_eq!(anchor_id("A", 0), "heading-0");
    }

    #[test]
    fn test_anchor_id_uses_slug_when_usable() {
        assert_eq!(anchor_id("Getting Started!", 7), "getting-started");
    }

    #[test]
    fn test_unique_anchor_id_suffixes_duplicates() {
        let mut used = HashSet::new();
        assert_eq!(unique_anchor_id("faq", &mut used), "faq");
        assert_eq!(unique_anchor_id("faq", &mut used), "faq-1");
        assert_eq!(unique_anchor_id("faq", &mut used), "faq-2");
    }
}
