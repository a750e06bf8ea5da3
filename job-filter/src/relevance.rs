//! Relevance classification: ordered keyword reject rules for job posts.
//!
//! The rule tables are plain data: built once at startup (defaults or a JSON file) and
//! shared read-only by the classifier. Matching is substring search on the lower-cased post.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Default rule tables ─────────────────────────────────────────────

static INTERNSHIP_KEYWORDS: &[&str] = &["intern", "internship", "trainee", "apprentice"];

static STUDENT_ONLY_KEYWORDS: &[&str] = &[
    "final year",
    "final-year",
    "student",
    "students only",
    "currently pursuing",
    "pursuing degree",
    "campus hiring",
    "on campus",
    "college student",
];

static EXPERIENCE_REQUIRED_PATTERNS: &[&str] = &[
    "2+ year",
    "3+ year",
    "4+ year",
    "minimum 2 year",
    "minimum 3 year",
    "2 years experience",
    "3 years experience",
    "experienced candidate",
    "experienced only",
];

/// Cohorts other than 2025 that are named explicitly. Years outside this list
/// (e.g. "2026 batch") are not rejected.
static NON_2025_COHORT_PATTERNS: &[&str] = &[
    "2024 batch",
    "2023 batch",
    "2022 batch",
    "2021 batch",
    "2022-2024",
    "2021-2023",
];

#[derive(Error, Debug)]
pub enum RulesError {
    #[error("Failed to read rules file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid rules file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Keyword tables for the four reject rules. All entries are matched lower-case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelevanceRules {
    pub internship: Vec<String>,
    pub student_only: Vec<String>,
    pub experience_required: Vec<String>,
    pub non_2025_cohort: Vec<String>,
}

impl Default for RelevanceRules {
    fn default() -> Self {
        fn owned(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }

        Self {
            internship: owned(INTERNSHIP_KEYWORDS),
            student_only: owned(STUDENT_ONLY_KEYWORDS),
            experience_required: owned(EXPERIENCE_REQUIRED_PATTERNS),
            non_2025_cohort: owned(NON_2025_COHORT_PATTERNS),
        }
    }
}

impl RelevanceRules {
    /// Loads tables from a JSON object with the four list fields. Entries are lower-cased so
    /// that they can match the lower-cased post.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RulesError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| RulesError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let rules: RelevanceRules =
            serde_json::from_str(&raw).map_err(|source| RulesError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        Ok(rules.lowercased())
    }

    fn lowercased(self) -> Self {
        fn lower(list: Vec<String>) -> Vec<String> {
            list.into_iter().map(|s| s.to_lowercase()).collect()
        }

        Self {
            internship: lower(self.internship),
            student_only: lower(self.student_only),
            experience_required: lower(self.experience_required),
            non_2025_cohort: lower(self.non_2025_cohort),
        }
    }
}

/// Which reject rule fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectRule {
    Internship,
    StudentOnly,
    ExperienceRequired,
    NonTargetCohort,
}

impl fmt::Display for RejectRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RejectRule::Internship => "internship",
            RejectRule::StudentOnly => "student_only",
            RejectRule::ExperienceRequired => "experience_required",
            RejectRule::NonTargetCohort => "non_target_cohort",
        };
        f.write_str(name)
    }
}

/// The first rule that matched and the keyword that triggered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectReason {
    pub rule: RejectRule,
    pub keyword: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Relevant,
    Rejected(RejectReason),
}

impl Verdict {
    pub fn is_relevant(&self) -> bool {
        matches!(self, Verdict::Relevant)
    }
}

/// Evaluates the reject rules in order; the first match wins. A post that trips no rule is
/// relevant, including one that mentions no cohort year at all.
#[derive(Debug, Clone, Default)]
pub struct RelevanceClassifier {
    rules: RelevanceRules,
}

impl RelevanceClassifier {
    pub fn new(rules: RelevanceRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RelevanceRules {
        &self.rules
    }

    pub fn classify(&self, text: &str) -> Verdict {
        let text = text.to_lowercase();

        let ordered: [(RejectRule, &[String]); 4] = [
            (RejectRule::Internship, self.rules.internship.as_slice()),
            (RejectRule::StudentOnly, self.rules.student_only.as_slice()),
            (RejectRule::ExperienceRequired, self.rules.experience_required.as_slice()),
            (RejectRule::NonTargetCohort, self.rules.non_2025_cohort.as_slice()),
        ];

        for (rule, keywords) in ordered {
            if let Some(keyword) = first_match(&text, keywords) {
                return Verdict::Rejected(RejectReason {
                    rule,
                    keyword: keyword.to_string(),
                });
            }
        }

        Verdict::Relevant
    }

    pub fn is_relevant(&self, text: &str) -> bool {
        self.classify(text).is_relevant()
    }
}

fn first_match<'a>(text: &str, keywords: &'a [String]) -> Option<&'a str> {
    keywords
        .iter()
        .map(String::as_str)
        .find(|k| text.contains(*k))
}
