//! Content fingerprint used for cross-channel deduplication.

use sha2::{Digest, Sha256};

use crate::normalize::normalize;

/// Only this many leading characters of the normalized text are hashed. Reposts that differ
/// only in trailing boilerplate collide on purpose.
pub const FINGERPRINT_PREFIX_CHARS: usize = 400;

/// SHA-256 over the first [`FINGERPRINT_PREFIX_CHARS`] chars of [`normalize`]d text,
/// as 64 lowercase hex chars.
pub fn fingerprint(text: &str) -> String {
    let normalized = normalize(text);
    let prefix: String = normalized.chars().take(FINGERPRINT_PREFIX_CHARS).collect();

    let mut hasher = Sha256::new();
    hasher.update(prefix.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_format() {
        let hash = fingerprint("Backend engineer role");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_known_digest_of_empty_text() {
        assert_eq!(
            fingerprint("!!!"),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_deterministic() {
        let text = "Backend engineer role, apply now, 2025 batch";
        assert_eq!(fingerprint(text), fingerprint(text));
    }

    #[test]
    fn test_case_whitespace_and_url_insensitive() {
        assert_eq!(fingerprint("Visit http://x.com NOW"), fingerprint("visit now"));
        assert_eq!(
            fingerprint("Backend   Engineer\nRole"),
            fingerprint("backend engineer role")
        );
    }

    #[test]
    fn test_different_content_different_hash() {
        assert_ne!(
            fingerprint("Backend engineer role"),
            fingerprint("Frontend engineer role")
        );
    }

    #[test]
    fn test_differences_past_prefix_collide() {
        let body = "a".repeat(FINGERPRINT_PREFIX_CHARS);
        let first = format!("{} footer one", body);
        let second = format!("{} another footer", body);
        assert_eq!(fingerprint(&first), fingerprint(&second));
    }

    #[test]
    fn test_differences_inside_prefix_do_not_collide() {
        let body = "a".repeat(FINGERPRINT_PREFIX_CHARS - 2);
        assert_ne!(
            fingerprint(&format!("{} x", body)),
            fingerprint(&format!("{} y", body))
        );
    }
}
