//! Manually entered report details
//!
//! Things GitHub cannot tell us: where the time went, reviews done outside
//! of pull requests, blockers, and the plan for tomorrow. The analyzer never
//! reads these; only the report does.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Tracked hours above this trigger a "take breaks" warning.
pub const LONG_DAY_HOURS: f64 = 12.0;

/// Upper bound accepted for a single time allocation entry.
pub const MAX_HOURS: f64 = 24.0;

/// Implements `as_str`, `Display` and an `ALL` list for a label enum.
macro_rules! labels {
    ($ty:ident { $($variant:ident => $label:expr),+ $(,)? }) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

// ============================================
// Time Allocation
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeCategory {
    Development,
    Meetings,
    CodeReview,
    Planning,
    Testing,
    Documentation,
    Learning,
    Other,
}

labels!(TimeCategory {
    Development => "Development",
    Meetings => "Meetings",
    CodeReview => "Code Review",
    Planning => "Planning",
    Testing => "Testing",
    Documentation => "Documentation",
    Learning => "Learning",
    Other => "Other",
});

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub category: TimeCategory,
    pub hours: f64,
}

/// Parse and validate an hours answer. Blank input counts as zero.
pub fn parse_hours(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }

    let hours: f64 = trimmed.parse().map_err(|_| {
        Error::InvalidInput("please enter a valid number (0 or greater)".to_string())
    })?;

    if !hours.is_finite() || hours < 0.0 {
        return Err(Error::InvalidInput(
            "please enter a valid number (0 or greater)".to_string(),
        ));
    }
    if hours > MAX_HOURS {
        return Err(Error::InvalidInput(
            "please enter a realistic number of hours (24 or less)".to_string(),
        ));
    }
    Ok(hours)
}

// ============================================
// Code Reviews
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewKind {
    ReviewedOthers,
    ReceivedReview,
    PairProgramming,
    Other,
}

labels!(ReviewKind {
    ReviewedOthers => "Reviewed someone else's PR",
    ReceivedReview => "My PR was reviewed",
    PairProgramming => "Pair programming/Live review",
    Other => "Other",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewOutcome {
    Approved,
    RequestedChanges,
    InProgress,
    Merged,
    Other,
}

labels!(ReviewOutcome {
    Approved => "Approved",
    RequestedChanges => "Requested changes",
    InProgress => "In progress",
    Merged => "Merged",
    Other => "Other",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeReview {
    pub kind: ReviewKind,
    pub description: String,
    pub outcome: ReviewOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeReviews {
    pub participated: bool,
    pub reviews: Vec<CodeReview>,
}

// ============================================
// Blockers
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockerKind {
    Technical,
    WaitingForReview,
    ExternalDependency,
    UnclearRequirements,
    Tooling,
    KnowledgeGap,
    Other,
}

labels!(BlockerKind {
    Technical => "Technical issue",
    WaitingForReview => "Waiting for review/approval",
    ExternalDependency => "External dependency",
    UnclearRequirements => "Unclear requirements",
    Tooling => "Environment/tooling issue",
    KnowledgeGap => "Knowledge gap",
    Other => "Other",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockerStatus {
    Resolved,
    InProgress,
    NeedHelp,
    Escalated,
    Waiting,
}

labels!(BlockerStatus {
    Resolved => "Resolved",
    InProgress => "In progress",
    NeedHelp => "Need help",
    Escalated => "Escalated",
    Waiting => "Waiting",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blocker {
    pub kind: BlockerKind,
    pub description: String,
    pub status: BlockerStatus,
    pub next_steps: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blockers {
    pub had_blockers: bool,
    pub blockers: Vec<Blocker>,
}

// ============================================
// Plans
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

labels!(Priority {
    High => "High",
    Medium => "Medium",
    Low => "Low",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedTask {
    pub task: String,
    pub priority: Priority,
    pub estimated_hours: Option<f64>,
}

// ============================================
// Manual Data
// ============================================

/// Everything collected interactively for one report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManualData {
    pub time_allocation: Vec<TimeEntry>,
    pub code_reviews: CodeReviews,
    pub blockers: Blockers,
    pub tomorrow_plans: Vec<PlannedTask>,
}

impl ManualData {
    /// Sum of all time allocation entries.
    pub fn total_hours(&self) -> f64 {
        self.time_allocation.iter().map(|e| e.hours).sum()
    }

    /// True when more than [`LONG_DAY_HOURS`] were tracked.
    pub fn is_long_day(&self) -> bool {
        self.total_hours() > LONG_DAY_HOURS
    }

    /// Time entries with a non-zero number of hours.
    pub fn tracked_time(&self) -> impl Iterator<Item = &TimeEntry> {
        self.time_allocation.iter().filter(|e| e.hours > 0.0)
    }
}
