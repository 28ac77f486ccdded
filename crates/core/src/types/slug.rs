//! URL slug generation for product names.

/// Generate a URL slug from a product name.
///
/// Lower-cases the input, strips every character outside `[a-z0-9\s-]`,
/// collapses whitespace runs to a single hyphen, collapses repeated
/// hyphens, and trims leading/trailing hyphens. The result is stable for
/// already-slugged input.
///
/// # Example
///
/// ```rust
/// # use tradewind_core::generate_slug;
/// assert_eq!(generate_slug("Men's T-Shirt!! 100% Cotton"), "mens-t-shirt-100-cotton");
/// ```
#[must_use]
pub fn generate_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.to_lowercase().chars() {
        if c.is_whitespace() || c == '-' {
            if !slug.is_empty() {
                pending_hyphen = true;
            }
            continue;
        }
        if !c.is_ascii_alphanumeric() {
            continue;
        }
        if pending_hyphen {
            slug.push('-');
            pending_hyphen = false;
        }
        slug.push(c);
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_punctuation_and_collapses() {
        assert_eq!(
            generate_slug("Men's T-Shirt!! 100% Cotton"),
            "mens-t-shirt-100-cotton"
        );
    }

    #[test]
    fn test_trims_and_collapses_hyphen_runs() {
        assert_eq!(generate_slug("  --Multi   Space--  "), "multi-space");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(generate_slug(""), "");
    }

    #[test]
    fn test_already_slugged_is_stable() {
        assert_eq!(generate_slug("oak-dining-table"), "oak-dining-table");
    }

    #[test]
    fn test_non_ascii_is_dropped() {
        assert_eq!(generate_slug("Café Chair №7"), "caf-chair-7");
    }
}
