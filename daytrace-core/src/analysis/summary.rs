//! Day summary: totals, repositories, and the first and last activity.

use serde::Serialize;

use crate::types::{ActivityData, ActivityRecord, ActivityRef};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_commits: usize,
    pub total_pull_requests: usize,
    pub total_issues: usize,
    /// Distinct repositories in first-seen order (commits, then PRs, then issues)
    pub repositories_worked_on: Vec<String>,
    /// Earliest activity, `None` for an empty day
    pub first_activity: Option<ActivityRecord>,
    /// Latest activity, `None` for an empty day
    pub last_activity: Option<ActivityRecord>,
}

pub fn generate_summary(data: &ActivityData) -> Summary {
    let mut repositories_worked_on: Vec<String> = Vec::new();
    for record in data.records() {
        if !repositories_worked_on.iter().any(|r| r == record.repo()) {
            repositories_worked_on.push(record.repo().to_string());
        }
    }

    Summary {
        total_commits: data.commits.len(),
        total_pull_requests: data.pull_requests.len(),
        total_issues: data.issues.len(),
        repositories_worked_on,
        first_activity: first_activity(data).map(|r| r.to_record()),
        last_activity: last_activity(data).map(|r| r.to_record()),
    }
}

/// Earliest activity of the day. On equal timestamps the record met first in
/// commits, PRs, issues order is kept.
pub fn first_activity(data: &ActivityData) -> Option<ActivityRef<'_>> {
    data.records().reduce(|earliest, record| {
        if record.timestamp() < earliest.timestamp() {
            record
        } else {
            earliest
        }
    })
}

/// Latest activity of the day. On equal timestamps the record met first in
/// commits, PRs, issues order is kept.
pub fn last_activity(data: &ActivityData) -> Option<ActivityRef<'_>> {
    data.records().reduce(|latest, record| {
        if record.timestamp() > latest.timestamp() {
            record
        } else {
            latest
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Commit, Issue, ItemState, PullRequest};
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, hour, 0, 0).unwrap()
    }

    fn commit(repo: &str, sha: &str, hour: u32) -> Commit {
        Commit {
            repo: repo.to_string(),
            message: "feat: x".to_string(),
            sha: sha.to_string(),
            url: String::new(),
            timestamp: at(hour),
        }
    }

    fn pull_request(repo: &str, number: u64, hour: u32) -> PullRequest {
        PullRequest {
            repo: repo.to_string(),
            title: "pr".to_string(),
            number,
            state: ItemState::Open,
            url: String::new(),
            timestamp: at(hour),
        }
    }

    fn issue(repo: &str, number: u64, hour: u32) -> Issue {
        Issue {
            repo: repo.to_string(),
            title: "issue".to_string(),
            number,
            state: ItemState::Closed,
            url: String::new(),
            timestamp: at(hour),
        }
    }

    fn data(commits: Vec<Commit>, prs: Vec<PullRequest>, issues: Vec<Issue>) -> ActivityData {
        ActivityData {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            commits,
            pull_requests: prs,
            issues,
        }
    }

    #[test]
    fn test_first_and_last_across_kinds() {
        let day = data(
            vec![commit("octo/a", "aaaaaaa", 14)],
            vec![pull_request("octo/b", 1, 22)],
            vec![issue("octo/c", 2, 9)],
        );

        let summary = generate_summary(&day);
        assert_eq!(
            summary.first_activity,
            Some(ActivityRecord::Issue(day.issues[0].clone()))
        );
        assert_eq!(
            summary.last_activity,
            Some(ActivityRecord::PullRequest(day.pull_requests[0].clone()))
        );
    }

    #[test]
    fn test_ties_keep_first_encountered() {
        let day = data(
            vec![commit("octo/a", "aaaaaaa", 10), commit("octo/a", "bbbbbbb", 10)],
            vec![pull_request("octo/a", 1, 10)],
            vec![],
        );

        let first = first_activity(&day).unwrap();
        let last = last_activity(&day).unwrap();
        assert_eq!(first, ActivityRef::Commit(&day.commits[0]));
        assert_eq!(last, ActivityRef::Commit(&day.commits[0]));
    }

    #[test]
    fn test_empty_day() {
        let summary = generate_summary(&data(vec![], vec![], vec![]));
        assert_eq!(summary.total_commits, 0);
        assert!(summary.repositories_worked_on.is_empty());
        assert!(summary.first_activity.is_none());
        assert!(summary.last_activity.is_none());

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json["firstActivity"].is_null());
    }

    #[test]
    fn test_repositories_are_distinct_in_first_seen_order() {
        let day = data(
            vec![commit("octo/b", "aaaaaaa", 9), commit("octo/a", "bbbbbbb", 10)],
            vec![pull_request("octo/b", 1, 11)],
            vec![issue("octo/c", 2, 12)],
        );

        let summary = generate_summary(&day);
        assert_eq!(
            summary.repositories_worked_on,
            vec!["octo/b", "octo/a", "octo/c"]
        );
        assert_eq!(summary.total_commits, 2);
        assert_eq!(summary.total_pull_requests, 1);
        assert_eq!(summary.total_issues, 1);
    }
}
