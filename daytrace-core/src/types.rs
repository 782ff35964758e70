//! Core domain types for daytrace
//!
//! These types represent one day of GitHub activity as delivered by the
//! activity source and consumed by the analyzer and the report writer.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Repo** | A GitHub repository identified as `owner/name` |
//! | **Commit** | A commit authored by the user in one of their repos |
//! | **Pull Request** | A PR opened by the user on the day |
//! | **Issue** | An issue opened by the user on the day |
//! | **Activity** | Any of the three above; every activity carries a timestamp |
//! | **Activity window** | The local day `[00:00:00.000, 23:59:59.999]` |

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================
// Records
// ============================================

/// State of a pull request or issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemState {
    Open,
    Closed,
    /// Only reported for pull requests
    Merged,
}

impl ItemState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemState::Open => "open",
            ItemState::Closed => "closed",
            ItemState::Merged => "merged",
        }
    }
}

impl std::fmt::Display for ItemState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ItemState {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "open" => Ok(ItemState::Open),
            "closed" => Ok(ItemState::Closed),
            "merged" => Ok(ItemState::Merged),
            _ => Err(format!("unknown item state: {}", s)),
        }
    }
}

/// A commit authored by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Repository (`owner/name`)
    pub repo: String,
    /// Full commit message, possibly multi-line
    pub message: String,
    /// Short hash
    pub sha: String,
    /// Link to the commit on GitHub
    pub url: String,
    /// Author date
    pub timestamp: DateTime<Utc>,
}

impl Commit {
    /// First line of the commit message.
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

/// A pull request opened by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub repo: String,
    pub title: String,
    pub number: u64,
    pub state: ItemState,
    pub url: String,
    /// Creation time
    pub timestamp: DateTime<Utc>,
}

/// An issue opened by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub repo: String,
    pub title: String,
    pub number: u64,
    pub state: ItemState,
    pub url: String,
    /// Creation time
    pub timestamp: DateTime<Utc>,
}

/// Any single activity, owned.
///
/// Serialized with a `type` tag (`commit`, `pullRequest`, `issue`) next to
/// the record's own fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ActivityRecord {
    Commit(Commit),
    PullRequest(PullRequest),
    Issue(Issue),
}

impl ActivityRecord {
    pub fn repo(&self) -> &str {
        self.borrowed().repo()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.borrowed().timestamp()
    }

    /// Borrow this record as an [`ActivityRef`].
    pub fn borrowed(&self) -> ActivityRef<'_> {
        match self {
            ActivityRecord::Commit(c) => ActivityRef::Commit(c),
            ActivityRecord::PullRequest(pr) => ActivityRef::PullRequest(pr),
            ActivityRecord::Issue(i) => ActivityRef::Issue(i),
        }
    }
}

/// Any single activity, borrowed from an [`ActivityData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityRef<'a> {
    Commit(&'a Commit),
    PullRequest(&'a PullRequest),
    Issue(&'a Issue),
}

impl<'a> ActivityRef<'a> {
    pub fn repo(&self) -> &'a str {
        match *self {
            ActivityRef::Commit(c) => &c.repo,
            ActivityRef::PullRequest(pr) => &pr.repo,
            ActivityRef::Issue(i) => &i.repo,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            ActivityRef::Commit(c) => c.timestamp,
            ActivityRef::PullRequest(pr) => pr.timestamp,
            ActivityRef::Issue(i) => i.timestamp,
        }
    }

    /// Short label for the kind of activity.
    pub fn kind(&self) -> &'static str {
        match self {
            ActivityRef::Commit(_) => "commit",
            ActivityRef::PullRequest(_) => "pull request",
            ActivityRef::Issue(_) => "issue",
        }
    }

    pub fn to_record(&self) -> ActivityRecord {
        match *self {
            ActivityRef::Commit(c) => ActivityRecord::Commit(c.clone()),
            ActivityRef::PullRequest(pr) => ActivityRecord::PullRequest(pr.clone()),
            ActivityRef::Issue(i) => ActivityRecord::Issue(i.clone()),
        }
    }
}

// ============================================
// Activity Data
// ============================================

/// One calendar day of activity for a single user.
///
/// Produced by the activity source and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityData {
    /// The day this activity belongs to
    pub date: NaiveDate,
    #[serde(default)]
    pub commits: Vec<Commit>,
    #[serde(default)]
    pub pull_requests: Vec<PullRequest>,
    #[serde(default)]
    pub issues: Vec<Issue>,
}

impl ActivityData {
    /// An empty day.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            commits: Vec::new(),
            pull_requests: Vec::new(),
            issues: Vec::new(),
        }
    }

    /// Read a day of activity previously saved as JSON.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| {
            Error::InvalidInput(format!("invalid activity file {}: {}", path.display(), e))
        })
    }

    /// Number of commits, pull requests and issues combined.
    pub fn total_activity(&self) -> usize {
        self.commits.len() + self.pull_requests.len() + self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_activity() == 0
    }

    /// All activities in concatenation order: commits, then pull requests,
    /// then issues.
    pub fn records(&self) -> impl Iterator<Item = ActivityRef<'_>> + '_ {
        self.commits
            .iter()
            .map(ActivityRef::Commit)
            .chain(self.pull_requests.iter().map(ActivityRef::PullRequest))
            .chain(self.issues.iter().map(ActivityRef::Issue))
    }
}
