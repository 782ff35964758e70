//! Commit aggregation: category and repository histograms plus per-commit
//! classification.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::classify::{assess_impact, categorize_commit, CommitCategory, ImpactLevel};
use crate::types::Commit;

/// Counts keyed by first appearance.
///
/// Iteration and serialization follow insertion order, so the output does not
/// depend on hashing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram<K> {
    entries: Vec<(K, usize)>,
}

impl<K> Default for Histogram<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: PartialEq> Histogram<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one to the count for `key`, appending it if unseen.
    pub fn increment(&mut self, key: K) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((key, 1)),
        }
    }

    /// Count for `key`, zero if unseen.
    pub fn get(&self, key: &K) -> usize {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.entries.iter().map(|(k, count)| (k, *count))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }
}

impl<K: PartialEq> FromIterator<K> for Histogram<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut histogram = Histogram::new();
        for key in iter {
            histogram.increment(key);
        }
        histogram
    }
}

impl<K: Serialize> Serialize for Histogram<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, count) in &self.entries {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

/// A commit with its derived classification.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DetailedCommit {
    #[serde(flatten)]
    pub commit: Commit,
    pub category: CommitCategory,
    pub impact: ImpactLevel,
}

/// Aggregated view of the day's commits.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitAnalysis {
    pub by_category: Histogram<CommitCategory>,
    pub by_repository: Histogram<String>,
    pub detailed_commits: Vec<DetailedCommit>,
}

impl CommitAnalysis {
    /// Classification for the commit with the given short hash.
    pub fn find(&self, sha: &str) -> Option<&DetailedCommit> {
        self.detailed_commits.iter().find(|c| c.commit.sha == sha)
    }
}

/// Histogram of commit categories in first-seen order.
pub fn category_histogram(commits: &[Commit]) -> Histogram<CommitCategory> {
    commits
        .iter()
        .map(|c| categorize_commit(&c.message))
        .collect()
}

/// Categorize and assess every commit and build the per-category and
/// per-repository histograms.
pub fn analyze_commits(commits: &[Commit]) -> CommitAnalysis {
    let detailed_commits: Vec<DetailedCommit> = commits
        .iter()
        .map(|commit| DetailedCommit {
            commit: commit.clone(),
            category: categorize_commit(&commit.message),
            impact: assess_impact(&commit.message),
        })
        .collect();

    let by_category = detailed_commits.iter().map(|c| c.category).collect();
    let by_repository = commits.iter().map(|c| c.repo.clone()).collect();

    CommitAnalysis {
        by_category,
        by_repository,
        detailed_commits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn commit(repo: &str, message: &str, sha: &str) -> Commit {
        Commit {
            repo: repo.to_string(),
            message: message.to_string(),
            sha: sha.to_string(),
            url: format!("https://github.com/{repo}/commit/{sha}"),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_histograms_follow_first_seen_order() {
        let commits = vec![
            commit("octo/b", "fix: crash", "1111111"),
            commit("octo/a", "feat: search", "2222222"),
            commit("octo/b", "fix: typo", "3333333"),
            commit("octo/c", "wip", "4444444"),
        ];

        let analysis = analyze_commits(&commits);

        let categories: Vec<_> = analysis.by_category.iter().collect();
        assert_eq!(
            categories,
            vec![
                (&CommitCategory::Fix, 2),
                (&CommitCategory::Feature, 1),
                (&CommitCategory::Other, 1),
            ]
        );

        let repos: Vec<_> = analysis.by_repository.keys().cloned().collect();
        assert_eq!(repos, vec!["octo/b", "octo/a", "octo/c"]);
        assert_eq!(analysis.by_repository.get(&"octo/b".to_string()), 2);
    }

    #[test]
    fn test_category_counts_sum_to_commit_count() {
        let commits = vec![
            commit("octo/a", "docs: api", "1111111"),
            commit("octo/a", "test: api", "2222222"),
            commit("octo/a", "docs: cli", "3333333"),
        ];
        let analysis = analyze_commits(&commits);
        assert_eq!(analysis.by_category.total(), commits.len());
        assert_eq!(analysis.detailed_commits.len(), commits.len());
    }

    #[test]
    fn test_detailed_commits_carry_classification() {
        let commits = vec![commit("octo/a", "BREAKING: drop v1", "abcdef0")];
        let analysis = analyze_commits(&commits);

        let detailed = analysis.find("abcdef0").unwrap();
        assert_eq!(detailed.category, CommitCategory::Other);
        assert_eq!(detailed.impact, ImpactLevel::High);
        assert!(analysis.find("missing").is_none());
    }

    #[test]
    fn test_empty_commits() {
        let analysis = analyze_commits(&[]);
        assert!(analysis.by_category.is_empty());
        assert!(analysis.by_repository.is_empty());
        assert_eq!(analysis, CommitAnalysis::default());
    }

    #[test]
    fn test_serializes_as_ordered_objects() {
        let commits = vec![
            commit("octo/z", "refactor: io", "1111111"),
            commit("octo/a", "feat: io", "2222222"),
        ];
        let json = serde_json::to_string(&analyze_commits(&commits).by_category).unwrap();
        assert_eq!(json, r#"{"refactor":1,"feature":1}"#);

        let value = serde_json::to_value(analyze_commits(&commits)).unwrap();
        assert_eq!(value["byRepository"]["octo/z"], 1);
        assert_eq!(value["detailedCommits"][0]["category"], "refactor");
        assert_eq!(value["detailedCommits"][0]["sha"], "1111111");
        assert_eq!(value["detailedCommits"][0]["impact"], "low");
    }
}
