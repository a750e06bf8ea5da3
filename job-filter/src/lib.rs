//! # job-filter
//!
//! Deterministic text rules for the job relay:
//!
//! 1. [`normalize`]: canonical form of a post used for comparison
//! 2. [`fingerprint`]: SHA-256 content id over the normalized prefix
//! 3. [`RelevanceClassifier`]: ordered reject rules over immutable [`RelevanceRules`]
//!
//! Everything here is pure; no I/O beyond loading a rules file at startup.

pub mod fingerprint;
pub mod normalize;
pub mod relevance;

pub use fingerprint::{fingerprint, FINGERPRINT_PREFIX_CHARS};
pub use normalize::normalize;
pub use relevance::{
    RejectReason, RejectRule, RelevanceClassifier, RelevanceRules, RulesError, Verdict,
};
