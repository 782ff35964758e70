//! GitHub REST API response shapes and their mapping to domain types.
//!
//! Only the fields daytrace reads are modeled; serde ignores the rest.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::types::{Commit, Issue, ItemState, PullRequest};

/// Length of the abbreviated commit hash shown in reports
pub const SHORT_SHA_LEN: usize = 7;

/// Response item from GET /user/repos
#[derive(Debug, Deserialize)]
pub struct RepoResponse {
    /// `owner/name`
    pub full_name: String,
    pub name: String,
    pub owner: OwnerResponse,
}

#[derive(Debug, Deserialize)]
pub struct OwnerResponse {
    pub login: String,
}

/// Response from GET /user
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub login: String,
}

/// Response item from GET /repos/{owner}/{repo}/commits
#[derive(Debug, Deserialize)]
pub struct CommitResponse {
    pub sha: String,
    pub html_url: String,
    pub commit: CommitDetailsResponse,
}

#[derive(Debug, Deserialize)]
pub struct CommitDetailsResponse {
    pub message: String,
    pub author: Option<SignatureResponse>,
    pub committer: Option<SignatureResponse>,
}

#[derive(Debug, Deserialize)]
pub struct SignatureResponse {
    pub date: Option<DateTime<Utc>>,
}

/// Response from GET /search/issues
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
pub struct SearchItem {
    pub title: String,
    pub number: u64,
    pub html_url: String,
    pub state: String,
    pub created_at: DateTime<Utc>,
    /// `https://api.github.com/repos/{owner}/{repo}`
    pub repository_url: String,
    /// Present only for pull requests
    pub pull_request: Option<PullRequestRef>,
}

#[derive(Debug, Deserialize)]
pub struct PullRequestRef {
    pub merged_at: Option<DateTime<Utc>>,
}

/// `owner/name` from a `repository_url`, i.e. its last two path segments.
pub fn repo_from_url(repository_url: &str) -> String {
    let segments: Vec<&str> = repository_url
        .trim_end_matches('/')
        .rsplit('/')
        .take(2)
        .collect();
    segments.into_iter().rev().collect::<Vec<_>>().join("/")
}

fn short_sha(sha: &str) -> String {
    sha.chars().take(SHORT_SHA_LEN).collect()
}

impl CommitResponse {
    /// Convert to a [`Commit`]. Returns `None` when GitHub reports no date.
    pub fn into_commit(self, repo: &str) -> Option<Commit> {
        let timestamp = self
            .commit
            .author
            .as_ref()
            .and_then(|a| a.date)
            .or_else(|| self.commit.committer.as_ref().and_then(|c| c.date))?;

        Some(Commit {
            repo: repo.to_string(),
            message: self.commit.message,
            sha: short_sha(&self.sha),
            url: self.html_url,
            timestamp,
        })
    }
}

impl SearchItem {
    fn item_state(&self) -> ItemState {
        let merged = self
            .pull_request
            .as_ref()
            .is_some_and(|pr| pr.merged_at.is_some());

        if merged {
            ItemState::Merged
        } else if self.state == "open" {
            ItemState::Open
        } else {
            ItemState::Closed
        }
    }

    pub fn into_pull_request(self) -> PullRequest {
        PullRequest {
            state: self.item_state(),
            repo: repo_from_url(&self.repository_url),
            title: self.title,
            number: self.number,
            url: self.html_url,
            timestamp: self.created_at,
        }
    }

    pub fn into_issue(self) -> Issue {
        // Issues never merge, so only open/closed applies
        let state = if self.state == "open" {
            ItemState::Open
        } else {
            ItemState::Closed
        };

        Issue {
            state,
            repo: repo_from_url(&self.repository_url),
            title: self.title,
            number: self.number,
            url: self.html_url,
            timestamp: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_from_url() {
        assert_eq!(
            repo_from_url("https://api.github.com/repos/octo/app"),
            "octo/app"
        );
        assert_eq!(
            repo_from_url("https://api.github.com/repos/octo/app/"),
            "octo/app"
        );
    }

    #[test]
    fn test_commit_mapping() {
        let json = r#"{
            "sha": "0123456789abcdef",
            "html_url": "https://github.com/octo/app/commit/0123456789abcdef",
            "commit": {
                "message": "feat: search\n\nbody",
                "author": {"name": "Octo", "date": "2024-01-15T09:30:00Z"},
                "committer": {"date": "2024-01-15T10:00:00Z"}
            }
        }"#;
        let response: CommitResponse = serde_json::from_str(json).unwrap();
        let commit = response.into_commit("octo/app").unwrap();

        assert_eq!(commit.sha, "0123456");
        assert_eq!(commit.repo, "octo/app");
        assert_eq!(commit.subject(), "feat: search");
        assert_eq!(commit.timestamp.to_rfc3339(), "2024-01-15T09:30:00+00:00");
    }

    #[test]
    fn test_commit_falls_back_to_committer_date() {
        let json = r#"{
            "sha": "abc",
            "html_url": "u",
            "commit": {"message": "m", "author": null, "committer": {"date": "2024-01-15T10:00:00Z"}}
        }"#;
        let response: CommitResponse = serde_json::from_str(json).unwrap();
        let commit = response.into_commit("octo/app").unwrap();
        assert_eq!(commit.sha, "abc");
        assert_eq!(commit.timestamp.to_rfc3339(), "2024-01-15T10:00:00+00:00");

        let json = r#"{"sha": "abc", "html_url": "u", "commit": {"message": "m", "author": null, "committer": null}}"#;
        let response: CommitResponse = serde_json::from_str(json).unwrap();
        assert!(response.into_commit("octo/app").is_none());
    }

    #[test]
    fn test_search_item_states() {
        let json = r#"{
            "total_count": 3,
            "items": [
                {"title": "Open PR", "number": 1, "html_url": "u1", "state": "open",
                 "created_at": "2024-01-15T09:00:00Z",
                 "repository_url": "https://api.github.com/repos/octo/app",
                 "pull_request": {"merged_at": null}},
                {"title": "Merged PR", "number": 2, "html_url": "u2", "state": "closed",
                 "created_at": "2024-01-15T10:00:00Z",
                 "repository_url": "https://api.github.com/repos/octo/app",
                 "pull_request": {"merged_at": "2024-01-15T12:00:00Z"}},
                {"title": "Closed PR", "number": 3, "html_url": "u3", "state": "closed",
                 "created_at": "2024-01-15T11:00:00Z",
                 "repository_url": "https://api.github.com/repos/octo/lib",
                 "pull_request": {"merged_at": null}}
            ]
        }"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        let prs: Vec<_> = response
            .items
            .into_iter()
            .map(SearchItem::into_pull_request)
            .collect();

        assert_eq!(prs[0].state, ItemState::Open);
        assert_eq!(prs[1].state, ItemState::Merged);
        assert_eq!(prs[2].state, ItemState::Closed);
        assert_eq!(prs[2].repo, "octo/lib");
    }

    #[test]
    fn test_issue_mapping() {
        let json = r#"{"title": "Crash", "number": 9, "html_url": "https://github.com/octo/app/issues/9",
            "state": "closed", "created_at": "2024-01-15T08:00:00Z",
            "repository_url": "https://api.github.com/repos/octo/app"}"#;
        let item: SearchItem = serde_json::from_str(json).unwrap();
        let issue = item.into_issue();
        assert_eq!(issue.state, ItemState::Closed);
        assert_eq!(issue.number, 9);
        assert_eq!(issue.repo, "octo/app");
    }
}
