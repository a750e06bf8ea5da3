//! Text normalization: canonical form of a post for fingerprinting.

use once_cell::sync::Lazy;
use regex::Regex;

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}").unwrap()
});

static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\+?\d[\d\s\-]{7,}\d").unwrap());

static NON_TEXT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9\s]").unwrap());

static SPACE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Lower-case, drop URLs, e-mails and phone numbers, blank out punctuation, collapse whitespace.
///
/// Phone-like runs are stripped again after punctuation is blanked: `555.123.4567` only looks
/// like a number once the dots are gone, and a single pass would not be idempotent.
pub fn normalize(text: &str) -> String {
    let t = text.to_lowercase();

    let t = URL_PATTERN.replace_all(&t, "");
    let t = EMAIL_PATTERN.replace_all(&t, "");
    let t = PHONE_PATTERN.replace_all(&t, "");
    let t = NON_TEXT_PATTERN.replace_all(&t, " ");
    let t = PHONE_PATTERN.replace_all(&t, "");
    let t = SPACE_PATTERN.replace_all(&t, " ");

    t.trim().to_string()
}
