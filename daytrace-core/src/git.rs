//! Commit and push saved reports to a shared git repository.
//!
//! Shells out to the `git` binary in the repository's working tree. A failing
//! git step is logged and reported as `Ok(false)` so the caller can tell the
//! user to commit manually; only a missing `git` binary is an error.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use chrono::NaiveDate;

use crate::config::GitConfig;
use crate::error::{Error, Result};

/// Commit message for the report of `date`.
pub fn commit_message(date: NaiveDate) -> String {
    format!("Add daily report for {}", date.format("%Y-%m-%d"))
}

#[derive(Debug, Clone)]
pub struct GitIntegration {
    repo_path: PathBuf,
    remote: String,
    branch: String,
}

impl GitIntegration {
    pub fn new(
        repo_path: impl Into<PathBuf>,
        remote: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            repo_path: repo_path.into(),
            remote: remote.into(),
            branch: branch.into(),
        }
    }

    /// Build from configuration. Returns `None` unless git integration is
    /// enabled and a repository path is set.
    pub fn from_config(config: &GitConfig) -> Option<Self> {
        if !config.is_ready() {
            return None;
        }
        let repo_path = config.repo_path.clone()?;
        Some(Self::new(repo_path, &config.remote, &config.branch))
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// Stage `report_path`, commit it and push to the configured remote.
    ///
    /// Returns `Ok(true)` when the report ends up committed and pushed, or
    /// when there was nothing new to commit.
    pub fn commit_and_push(&self, report_path: &Path, date: NaiveDate) -> Result<bool> {
        tracing::info!(
            repo = %self.repo_path.display(),
            report = %report_path.display(),
            "Committing report"
        );

        let report = report_path.to_string_lossy();
        let add = self.git(&["add", "--", &*report])?;
        if !self.step_ok("add", &add) {
            return Ok(false);
        }

        // Exit status 0 means nothing is staged
        let staged = self.git(&["diff", "--cached", "--quiet"])?;
        if staged.status.success() {
            tracing::info!(%date, "Report unchanged, nothing to commit");
            return Ok(true);
        }

        let message = commit_message(date);
        let commit = self.git(&["commit", "-m", message.as_str()])?;
        if !self.step_ok("commit", &commit) {
            return Ok(false);
        }

        let push = self.git(&["push", self.remote.as_str(), self.branch.as_str()])?;
        if !self.step_ok("push", &push) {
            return Ok(false);
        }

        tracing::info!(remote = %self.remote, branch = %self.branch, "Report pushed");
        Ok(true)
    }

    fn git(&self, args: &[&str]) -> Result<Output> {
        Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .output()
            .map_err(|e| Error::Git(format!("failed to run git {}: {}", args.join(" "), e)))
    }

    fn step_ok(&self, step: &str, output: &Output) -> bool {
        if output.status.success() {
            return true;
        }
        tracing::warn!(
            step,
            status = %output.status,
            stderr = %String::from_utf8_lossy(&output.stderr).trim(),
            "git step failed"
        );
        false
    }
}
