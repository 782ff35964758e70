//! Activity analysis for daytrace
//!
//! Turns one day of [`ActivityData`] into an [`AnalysisResult`]:
//! - Summary totals, repositories and first/last activity
//! - Commit categories, impact and per-repository counts
//! - Productivity score
//! - Time-of-day distribution
//! - Recommendations
//!
//! Everything here is pure. The same input always yields the same result,
//! apart from the timezone used for time-of-day bucketing, which
//! [`analyze_activity`] takes from the system and [`analyze_activity_in`]
//! takes as an argument.

pub mod classify;
pub mod commits;
pub mod productivity;
pub mod recommend;
pub mod summary;
pub mod time;

pub use classify::{assess_impact, categorize_commit, CommitCategory, ImpactLevel};
pub use commits::{analyze_commits, CommitAnalysis, DetailedCommit, Histogram};
pub use productivity::{calculate_productivity, Productivity, ProductivityLevel};
pub use recommend::{generate_recommendations, Recommendation};
pub use summary::{generate_summary, Summary};
pub use time::{analyze_time_distribution, TimeDistribution, TimeSlot};

use chrono::{Local, TimeZone};
use serde::Serialize;

use crate::types::ActivityData;

/// Complete analysis of one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub summary: Summary,
    pub commit_analysis: CommitAnalysis,
    pub productivity: Productivity,
    pub time_distribution: TimeDistribution,
    pub recommendations: Vec<Recommendation>,
}

/// Analyze a day of activity, bucketing times in the local timezone.
pub fn analyze_activity(data: &ActivityData) -> AnalysisResult {
    analyze_activity_in(data, &Local)
}

/// Analyze a day of activity, bucketing times in `tz`.
pub fn analyze_activity_in<Tz: TimeZone>(data: &ActivityData, tz: &Tz) -> AnalysisResult {
    let commit_analysis = analyze_commits(&data.commits);
    let recommendations = recommend::recommendations_with(data, &commit_analysis.by_category);

    let result = AnalysisResult {
        summary: generate_summary(data),
        productivity: calculate_productivity(
            data.commits.len(),
            data.pull_requests.len(),
            data.issues.len(),
        ),
        time_distribution: time::analyze_time_distribution_in(data, tz),
        commit_analysis,
        recommendations,
    };

    tracing::debug!(
        date = %data.date,
        activities = data.total_activity(),
        score = result.productivity.score,
        productivity = %result.productivity.level,
        "Analyzed activity"
    );

    result
}
