//! GitHub activity source
//!
//! Fetches one calendar day of commits, pull requests and issues for the
//! configured user and returns them as [`ActivityData`](crate::ActivityData).
//!
//! ## Usage
//!
//! Configure credentials in `~/.config/daytrace/config.toml`:
//!
//! ```toml
//! [github]
//! token = "ghp_xxxxxxxxxxxx"
//! username = "octocat"
//! ```
//!
//! The token may also come from `$GITHUB_TOKEN`.

mod client;
pub mod models;

pub use client::{day_window, search_query, GitHubClient, SearchKind};
