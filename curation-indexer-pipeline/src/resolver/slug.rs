//! Collection slug extraction from corpus item URLs.

use once_cell::sync::Lazy;
use regex::Regex;

// Optional scheme and host, optional locale segment, then /collections/<slug>.
// Scheme and host are matched case-insensitively.
static COLLECTION_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i:https?://[^/]+)?(?:/[a-zA-Z]{2}(?:-[a-zA-Z]{2})?)?/collections/([\w-]+)")
        .expect("valid regex")
});

/// Extract the collection slug from a collection URL.
pub fn collection_slug(url: &str) -> Option<&str> {
    COLLECTION_URL
        .captures(url.trim())
        .and_then(|captures| captures.get(1))
        .map(|slug| slug.as_str())
}
