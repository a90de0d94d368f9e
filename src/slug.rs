//! URL-safe slug derivation
//!
//! Slugs are the primary lookup key for persisted articles. The
//! transformation is deterministic, pure, and total: any input string
//! yields a valid (possibly empty) slug, and applying it twice yields
//! the same result as applying it once. Uniqueness is not this
//! module's concern; the persistence adapter resolves collisions with
//! last-write-wins upsert semantics.

/// Maximum slug length in characters; longer slugs are cut back to a
/// word boundary.
const MAX_SLUG_LEN: usize = 60;

/// Derive a URL-safe slug from a title
///
/// Lowercases the input, strips every character that is not
/// alphanumeric, whitespace, hyphen, or underscore, collapses runs of
/// separators into a single hyphen, and trims leading/trailing
/// hyphens.
///
/// # Examples
///
/// ```
/// use seoforge::slug::slugify;
///
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("  ---Already-Slug---  "), "already-slug");
/// assert_eq!(slugify("!!!"), "");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_separator = false;

    for c in title.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_separator = true;
        }
        // Everything else (punctuation, symbols, non-ASCII) is stripped.
    }

    truncate_at_word_boundary(&slug, MAX_SLUG_LEN)
}

/// Derive a slug for a freshly created record, never empty
///
/// Matches the observable behavior of local creation: symbol-only
/// titles still need an addressable key.
pub fn slugify_or_untitled(title: &str) -> String {
    let slug = slugify(title);
    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug
    }
}

/// Cut a slug back to `max_len`, dropping whole hyphen-separated words
fn truncate_at_word_boundary(slug: &str, max_len: usize) -> String {
    if slug.len() <= max_len {
        return slug.to_string();
    }

    let mut result = String::new();
    for word in slug.split('-') {
        let projected = if result.is_empty() {
            word.len()
        } else {
            result.len() + 1 + word.len()
        };
        if projected > max_len {
            break;
        }
        if !result.is_empty() {
            result.push('-');
        }
        result.push_str(word);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_title() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
    }

    #[test]
    fn test_already_slug_with_padding() {
        assert_eq!(slugify("  ---Already-Slug---  "), "already-slug");
    }

    #[test]
    fn test_underscores_collapse() {
        assert_eq!(slugify("snake_case_title"), "snake-case-title");
        assert_eq!(slugify("mixed _- separators"), "mixed-separators");
    }

    #[test]
    fn test_symbol_only_yields_empty() {
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("   "), "");
    }

    #[test]
    fn test_numbers_preserved() {
        assert_eq!(slugify("Top 10 Tips for 2024"), "top-10-tips-for-2024");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "Hello, World!",
            "  ---Already-Slug---  ",
            "The Ultimate Guide to Coffee Brewing",
            "snake_case_title",
            "!!!",
            "Ünïcödé Señor",
        ];
        for input in inputs {
            let once = slugify(input);
            assert_eq!(slugify(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_long_title_truncates_at_word_boundary() {
        let title = "a very long title that keeps going and going well past the slug length limit";
        let slug = slugify(title);
        assert!(slug.len() <= 60);
        assert!(!slug.ends_with('-'));
        // No word is cut in half: every fragment must appear in the full slug.
        assert!(title.to_lowercase().replace(' ', "-").starts_with(&slug));
    }

    #[test]
    fn test_untitled_fallback() {
        assert_eq!(slugify_or_untitled("!!!"), "untitled");
        assert_eq!(slugify_or_untitled("Coffee"), "coffee");
    }
}
