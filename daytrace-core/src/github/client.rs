//! HTTP client for the GitHub REST API
//!
//! Collects a single day of activity for one user: commits across the repos
//! they can access, plus the pull requests and issues they opened.

use std::time::Duration;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, SecondsFormat, TimeDelta, TimeZone, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::de::DeserializeOwned;

use crate::config::GitHubConfig;
use crate::error::{Error, Result};
use crate::types::{ActivityData, Commit, Issue, PullRequest};

use super::models::{CommitResponse, RepoResponse, SearchItem, SearchResponse, UserResponse};

/// Page size used for every list and search request
const PER_PAGE: &str = "100";

/// API version pinned in the `X-GitHub-Api-Version` header
const API_VERSION: &str = "2022-11-28";

/// How far past a missing window edge to look for a local time that exists
const MAX_CLOCK_GAP_MINUTES: i64 = 180;

/// Kind of item requested from the search API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    PullRequest,
    Issue,
}

impl SearchKind {
    fn qualifier(&self) -> &'static str {
        match self {
            SearchKind::PullRequest => "pr",
            SearchKind::Issue => "issue",
        }
    }
}

/// The activity window `[00:00:00.000, 23:59:59.999]` of `date` in `tz`,
/// expressed in UTC.
///
/// When a DST transition skips local midnight the window starts at the first
/// local time that exists; a skipped 23:59:59.999 ends it at the last one.
pub fn day_window<Tz: TimeZone>(
    date: NaiveDate,
    tz: &Tz,
) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let invalid = || Error::InvalidInput(format!("{} has no valid local day", date));

    let start = date
        .and_hms_milli_opt(0, 0, 0, 0)
        .and_then(|t| nearest_local(tz, t, TimeDelta::minutes(1)))
        .ok_or_else(invalid)?;
    let end = date
        .and_hms_milli_opt(23, 59, 59, 999)
        .and_then(|t| nearest_local(tz, t, TimeDelta::minutes(-1)))
        .ok_or_else(invalid)?;

    Ok((start.with_timezone(&Utc), end.with_timezone(&Utc)))
}

/// Nearest time to `local`, moving in the direction of `step`, that exists in `tz`.
fn nearest_local<Tz: TimeZone>(
    tz: &Tz,
    local: NaiveDateTime,
    step: TimeDelta,
) -> Option<DateTime<Tz>> {
    let forward = step > TimeDelta::zero();
    let mut candidate = local;
    for _ in 0..=MAX_CLOCK_GAP_MINUTES {
        let resolved = tz.from_local_datetime(&candidate);
        let found = if forward {
            resolved.earliest()
        } else {
            resolved.latest()
        };
        if found.is_some() {
            return found;
        }
        candidate = candidate.checked_add_signed(step)?;
    }
    None
}

/// Search query for items of `kind` authored by `username` and created
/// within `[since, until]`.
pub fn search_query(
    username: &str,
    kind: SearchKind,
    since: DateTime<Utc>,
    until: DateTime<Utc>,
) -> String {
    format!(
        "author:{} type:{} created:{}..{}",
        username,
        kind.qualifier(),
        since.to_rfc3339_opts(SecondsFormat::Secs, true),
        until.to_rfc3339_opts(SecondsFormat::Secs, true)
    )
}

/// HTTP client for the GitHub REST API
pub struct GitHubClient {
    http_client: reqwest::Client,
    base_url: String,
    username: String,
}

impl GitHubClient {
    /// Create a new client from configuration
    ///
    /// Returns an error if the configuration is invalid or missing required fields.
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        config.validate()?;

        let token = config
            .resolved_token()
            .ok_or_else(|| Error::Config("github.token is required".to_string()))?;
        let username = config
            .username
            .clone()
            .ok_or_else(|| Error::Config("github.username is required".to_string()))?;
        let base_url = config.api_url.trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("daytrace"));
        headers.insert("X-GitHub-Api-Version", HeaderValue::from_static(API_VERSION));

        let auth_value = format!("Bearer {}", token);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value)
                .map_err(|e| Error::Config(format!("invalid github.token: {}", e)))?,
        );

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url,
            username,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Fetch all activity for `date` in the local timezone.
    pub async fn get_user_activity(&self, date: NaiveDate) -> Result<ActivityData> {
        let (start, end) = day_window(date, &Local)?;

        tracing::info!(
            %date,
            since = %start,
            until = %end,
            username = %self.username,
            "Fetching GitHub activity"
        );

        let (commits, pull_requests, issues) = tokio::try_join!(
            self.commits_for_day(start, end),
            self.pull_requests_for_day(start, end),
            self.issues_for_day(start, end),
        )?;

        tracing::info!(
            commits = commits.len(),
            pull_requests = pull_requests.len(),
            issues = issues.len(),
            "Fetched GitHub activity"
        );

        Ok(ActivityData {
            date,
            commits,
            pull_requests,
            issues,
        })
    }

    /// Check that the token is accepted, returning the authenticated login.
    pub async fn verify_connection(&self) -> Result<String> {
        let user: UserResponse = self.get_json("/user", &[]).await?;
        if !user.login.eq_ignore_ascii_case(&self.username) {
            tracing::warn!(
                token_user = %user.login,
                configured_user = %self.username,
                "Token belongs to a different user than configured"
            );
        }
        Ok(user.login)
    }

    /// Repositories of the authenticated user, most recently updated first.
    pub async fn list_repos(&self) -> Result<Vec<RepoResponse>> {
        self.get_json(
            "/user/repos",
            &[("sort", "updated".to_string()), ("per_page", PER_PAGE.to_string())],
        )
        .await
    }

    /// Commits authored by the user in `[since, until]` across all of their
    /// repositories. Repositories that cannot be read are skipped, and a
    /// failed repository listing yields no commits.
    pub async fn commits_for_day(
        &self,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Commit>> {
        let repos = match self.list_repos().await {
            Ok(repos) => repos,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to list repositories");
                return Ok(Vec::new());
            }
        };
        let since = since.to_rfc3339_opts(SecondsFormat::Millis, true);
        let until = until.to_rfc3339_opts(SecondsFormat::Millis, true);

        let mut commits = Vec::new();
        for repo in &repos {
            let path = format!(
                "/repos/{}/{}/commits",
                urlencoding::encode(&repo.owner.login),
                urlencoding::encode(&repo.name)
            );
            let query = [
                ("author", self.username.clone()),
                ("since", since.clone()),
                ("until", until.clone()),
                ("per_page", PER_PAGE.to_string()),
            ];

            match self.get_json::<Vec<CommitResponse>>(&path, &query).await {
                Ok(responses) => {
                    commits.extend(
                        responses
                            .into_iter()
                            .filter_map(|c| c.into_commit(&repo.full_name)),
                    );
                }
                Err(e) => {
                    // Empty repos answer 409, archived/forbidden ones 403/404
                    tracing::debug!(repo = %repo.full_name, error = %e, "Skipping repository");
                }
            }
        }

        Ok(commits)
    }

    /// Pull requests opened by the user in `[since, until]`.
    pub async fn pull_requests_for_day(
        &self,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<PullRequest>> {
        let items = self.search(SearchKind::PullRequest, since, until).await;
        Ok(items.into_iter().map(SearchItem::into_pull_request).collect())
    }

    /// Issues opened by the user in `[since, until]`.
    pub async fn issues_for_day(
        &self,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Issue>> {
        let items = self.search(SearchKind::Issue, since, until).await;
        Ok(items.into_iter().map(SearchItem::into_issue).collect())
    }

    /// Run a search; failures are logged and produce no items.
    async fn search(
        &self,
        kind: SearchKind,
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Vec<SearchItem> {
        let query = [
            ("q", search_query(&self.username, kind, since, until)),
            ("per_page", PER_PAGE.to_string()),
        ];

        match self.get_json::<SearchResponse>("/search/issues", &query).await {
            Ok(response) => {
                tracing::debug!(
                    kind = kind.qualifier(),
                    total_count = response.total_count,
                    "Search complete"
                );
                response.items
            }
            Err(e) => {
                tracing::warn!(kind = kind.qualifier(), error = %e, "Search failed");
                Vec::new()
            }
        }
    }

    /// GET `path` and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| Error::GitHub(format!("HTTP request failed: {}", e)))?;

        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| Error::GitHub(format!("failed to parse response: {}", e)))
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            Err(Error::GitHub(format!(
                "API error ({}) for {}: {}",
                status, path, error_text
            )))
        }
    }
}
