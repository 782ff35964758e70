//! Productivity scoring
//!
//! A weighted sum of the day's activity counts. Pull requests weigh most as
//! they represent completed, reviewable work.

use serde::Serialize;

pub const COMMIT_WEIGHT: u64 = 2;
pub const PULL_REQUEST_WEIGHT: u64 = 5;
pub const ISSUE_WEIGHT: u64 = 3;

/// Coarse productivity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductivityLevel {
    None,
    Low,
    Medium,
    High,
}

impl ProductivityLevel {
    /// `>= 20` high, `>= 10` medium, `> 0` low, otherwise none.
    pub fn from_score(score: u64) -> Self {
        match score {
            0 => ProductivityLevel::None,
            1..=9 => ProductivityLevel::Low,
            10..=19 => ProductivityLevel::Medium,
            _ => ProductivityLevel::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductivityLevel::None => "none",
            ProductivityLevel::Low => "low",
            ProductivityLevel::Medium => "medium",
            ProductivityLevel::High => "high",
        }
    }
}

impl std::fmt::Display for ProductivityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weighted sub-scores that make up the total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductivityBreakdown {
    pub commits: u64,
    pub pull_requests: u64,
    pub issues: u64,
}

impl ProductivityBreakdown {
    pub fn total(&self) -> u64 {
        self.commits + self.pull_requests + self.issues
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Productivity {
    pub score: u64,
    pub level: ProductivityLevel,
    pub breakdown: ProductivityBreakdown,
}

/// Score a day from its commit, pull request and issue counts.
pub fn calculate_productivity(commits: usize, pull_requests: usize, issues: usize) -> Productivity {
    let breakdown = ProductivityBreakdown {
        commits: commits as u64 * COMMIT_WEIGHT,
        pull_requests: pull_requests as u64 * PULL_REQUEST_WEIGHT,
        issues: issues as u64 * ISSUE_WEIGHT,
    };
    let score = breakdown.total();

    Productivity {
        score,
        level: ProductivityLevel::from_score(score),
        breakdown,
    }
}
