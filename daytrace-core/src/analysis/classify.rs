//! Commit classification
//!
//! Assigns each commit message a [`CommitCategory`] from conventional-commit
//! style prefixes and an [`ImpactLevel`] from keywords in its first line.

use serde::{Deserialize, Serialize};

/// Intent of a commit, derived from its message prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitCategory {
    Feature,
    Fix,
    Refactor,
    Docs,
    Style,
    Test,
    Chore,
    Config,
    Other,
}

impl CommitCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitCategory::Feature => "feature",
            CommitCategory::Fix => "fix",
            CommitCategory::Refactor => "refactor",
            CommitCategory::Docs => "docs",
            CommitCategory::Style => "style",
            CommitCategory::Test => "test",
            CommitCategory::Chore => "chore",
            CommitCategory::Config => "config",
            CommitCategory::Other => "other",
        }
    }

    /// Capitalized name for report headings.
    pub fn display_name(&self) -> &'static str {
        match self {
            CommitCategory::Feature => "Feature",
            CommitCategory::Fix => "Fix",
            CommitCategory::Refactor => "Refactor",
            CommitCategory::Docs => "Docs",
            CommitCategory::Style => "Style",
            CommitCategory::Test => "Test",
            CommitCategory::Chore => "Chore",
            CommitCategory::Config => "Config",
            CommitCategory::Other => "Other",
        }
    }
}

impl std::fmt::Display for CommitCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rough significance of a single commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    High,
    Medium,
    Low,
}

impl ImpactLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImpactLevel::High => "high",
            ImpactLevel::Medium => "medium",
            ImpactLevel::Low => "low",
        }
    }
}

impl std::fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A category together with the message prefixes that select it.
pub type CategoryRule = (CommitCategory, &'static [&'static str]);

/// Prefix rules in priority order. The first matching rule wins.
pub const CATEGORY_RULES: &[CategoryRule] = &[
    (
        CommitCategory::Feature,
        &["feat", "feature", "add", "implement"],
    ),
    (CommitCategory::Fix, &["fix", "bug", "hotfix", "patch"]),
    (
        CommitCategory::Refactor,
        &["refactor", "restructure", "optimize"],
    ),
    (CommitCategory::Docs, &["docs", "doc", "documentation"]),
    (CommitCategory::Style, &["style", "format", "lint"]),
    (CommitCategory::Test, &["test", "spec", "testing"]),
    (
        CommitCategory::Chore,
        &["chore", "maintenance", "update", "upgrade"],
    ),
    (CommitCategory::Config, &["config", "setup", "env"]),
];

/// Categorize a commit message using [`CATEGORY_RULES`].
pub fn categorize_commit(message: &str) -> CommitCategory {
    categorize_with(CATEGORY_RULES, message)
}

/// Categorize a commit message against an ordered rule table.
///
/// Keywords match case-insensitively at the start of the message. Returns
/// [`CommitCategory::Other`] when no rule matches.
pub fn categorize_with(rules: &[CategoryRule], message: &str) -> CommitCategory {
    rules
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| starts_with_ignore_case(message, kw)))
        .map(|(category, _)| *category)
        .unwrap_or(CommitCategory::Other)
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    let mut chars = text.chars();
    prefix.chars().all(|p| {
        chars
            .next()
            .map(|c| c.to_lowercase().eq(p.to_lowercase()))
            .unwrap_or(false)
    })
}

/// Maximum first-line length before a commit counts as detailed, measured in
/// UTF-16 code units so an emoji outside the BMP counts as two.
const DETAILED_SUBJECT_UNITS: usize = 50;

/// Maximum number of message lines before a commit counts as detailed.
const DETAILED_LINE_COUNT: usize = 3;

/// Assess the impact of a commit from its message.
///
/// Keyword checks run on the lowercased first line, in order:
/// "major"/"breaking" is high, "minor"/"enhancement" is medium and
/// "patch"/"fix" is low. Without keywords, long or multi-paragraph messages
/// are medium and everything else is low.
pub fn assess_impact(message: &str) -> ImpactLevel {
    let line_count = message.split('\n').count();
    let first_line = message.split('\n').next().unwrap_or("").to_lowercase();

    let contains_any = |words: &[&str]| words.iter().any(|w| first_line.contains(w));

    if contains_any(&["major", "breaking"]) {
        ImpactLevel::High
    } else if contains_any(&["minor", "enhancement"]) {
        ImpactLevel::Medium
    } else if contains_any(&["patch", "fix"]) {
        ImpactLevel::Low
    } else if line_count > DETAILED_LINE_COUNT
        || first_line.encode_utf16().count() > DETAILED_SUBJECT_UNITS
    {
        ImpactLevel::Medium
    } else {
        ImpactLevel::Low
    }
}
