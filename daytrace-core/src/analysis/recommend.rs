//! Advice derived from the shape of the day's activity.

use serde::{Serialize, Serializer};

use super::classify::CommitCategory;
use super::commits::{category_histogram, Histogram};
use crate::types::ActivityData;

/// Above this many commits the day counts as commit-heavy.
const MANY_COMMITS: usize = 10;

/// A single piece of advice. Serializes as its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recommendation {
    /// No commits and no pull requests
    StartTracking,
    /// More than ten commits
    GroupCommits,
    /// Commits without any pull request
    OpenPullRequests,
    /// Every commit has the same category
    DiversifyWork,
}

impl Recommendation {
    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::StartTracking => {
                "Consider making some commits or opening pull requests to track your progress."
            }
            Recommendation::GroupCommits => {
                "Great commit activity! Consider grouping related changes into fewer, more meaningful commits."
            }
            Recommendation::OpenPullRequests => {
                "You have commits but no pull requests. Consider creating PRs to get code reviews."
            }
            Recommendation::DiversifyWork => {
                "Consider diversifying your work - mix features, fixes, and refactoring."
            }
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for Recommendation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// Generate recommendations for a day, in check order.
pub fn generate_recommendations(data: &ActivityData) -> Vec<Recommendation> {
    recommendations_with(data, &category_histogram(&data.commits))
}

/// Same as [`generate_recommendations`] with an already computed category
/// histogram of the day's commits.
pub(crate) fn recommendations_with(
    data: &ActivityData,
    by_category: &Histogram<CommitCategory>,
) -> Vec<Recommendation> {
    let commits = data.commits.len();
    let pull_requests = data.pull_requests.len();
    let mut recommendations = Vec::new();

    if commits == 0 && pull_requests == 0 {
        recommendations.push(Recommendation::StartTracking);
    }

    if commits > MANY_COMMITS {
        recommendations.push(Recommendation::GroupCommits);
    }

    if pull_requests == 0 && commits > 0 {
        recommendations.push(Recommendation::OpenPullRequests);
    }

    if by_category.len() == 1 {
        recommendations.push(Recommendation::DiversifyWork);
    }

    recommendations
}
