use lazy_static::lazy_static;
use regex::Regex;

const STORE_ID_LEN: usize = 24;

lazy_static! {
    static ref NON_SLUG_CHARS: Regex = Regex::new(r"[^a-z0-9\s-]").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
    static ref HYPHEN_RUN: Regex = Regex::new(r"-+").unwrap();
}

/// Turns a post title into the slug used in post links.
///
/// "High-Yield Savings!" becomes "high-yield-savings". The result only has
/// `[a-z0-9-]`, never starts or ends with a hyphen and is stable when applied
/// again. It can be empty when the title has nothing usable in it, callers
/// treat that as "no slug".
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let trimmed = lowered.trim();
    let cleaned = NON_SLUG_CHARS.replace_all(trimmed, "");
    let hyphenated = WHITESPACE_RUN.replace_all(&cleaned, "-");
    let collapsed = HYPHEN_RUN.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}

/// Slug for a category page, e.g. "Personal Finance" -> "personal-finance".
/// Categories keep any other character as is.
pub fn category_slug(name: &str) -> String {
    WHITESPACE_RUN.replace_all(&name.to_lowercase(), "-").to_string()
}

/// Whether a path segment has the shape of a content store id
/// (24 hex chars, any case). It does not say the id exists.
pub fn looks_like_store_id(segment: &str) -> bool {
    segment.len() == STORE_ID_LEN && segment.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRICKY_TITLES: &[&str] = &[
        "",
        "   ",
        "!!!",
        "High-Yield Savings!",
        "  --Leading and trailing--  ",
        "Multiple   spaces\tand\nnewlines",
        "snake_case_title",
        "Crème brûlée & Café",
        "100% Guaranteed: 5 Ways to Save $1,000",
        "a - b -- c",
        "ÀÉÎ İstanbul",
        "-",
        "- - -",
    ];

    #[test]
    fn test_slugify_titles() {
        assert_eq!(slugify("High-Yield Savings!"), "high-yield-savings");
        assert_eq!(slugify("The Complete Guide to Index Fund Investing in 2024"),
                   "the-complete-guide-to-index-fund-investing-in-2024");
        assert_eq!(slugify("  --Leading and trailing--  "), "leading-and-trailing");
        assert_eq!(slugify("a - b -- c"), "a-b-c");
        assert_eq!(slugify("Multiple   spaces\tand\nnewlines"), "multiple-spaces-and-newlines");
        assert_eq!(slugify("100% Guaranteed: 5 Ways to Save $1,000"), "100-guaranteed-5-ways-to-save-1000");
    }

    #[test]
    fn test_slugify_drops_non_ascii_and_underscore() {
        assert_eq!(slugify("Crème brûlée"), "crme-brle");
        assert_eq!(slugify("snake_case_title"), "snakecasetitle");
    }

    #[test]
    fn test_slugify_empty_results() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("   "), "");
        assert_eq!(slugify("!!! ???"), "");
        assert_eq!(slugify("- - -"), "");
    }

    #[test]
    fn test_slugify_idempotent() {
        for title in TRICKY_TITLES {
            let once = slugify(title);
            assert_eq!(slugify(&once), once, "title {:?}", title);
        }
    }

    #[test]
    fn test_slugify_output_shape() {
        for title in TRICKY_TITLES {
            let slug = slugify(title);
            assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
                    "bad char in {:?}", slug);
            assert!(!slug.starts_with('-') && !slug.ends_with('-'), "hyphen edge in {:?}", slug);
            assert!(!slug.contains("--"), "double hyphen in {:?}", slug);
        }
    }

    #[test]
    fn test_category_slug() {
        assert_eq!(category_slug("Personal Finance"), "personal-finance");
        assert_eq!(category_slug("Credit  Cards"), "credit-cards");
        assert_eq!(category_slug("Investing"), "investing");
    }

    #[test]
    fn test_looks_like_store_id() {
        assert!(looks_like_store_id("507f1f77bcf86cd799439011"));
        assert!(looks_like_store_id("507F1F77BCF86CD799439011"));
        assert!(!looks_like_store_id("my-post-title"));
        assert!(!looks_like_store_id("507f1f77bcf86cd79943901"));
        assert!(!looks_like_store_id("507f1f77bcf86cd7994390111"));
        assert!(!looks_like_store_id("507f1f77bcf86cd79943901g"));
        assert!(!looks_like_store_id(""));
    }
}
