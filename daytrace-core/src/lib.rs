//! # daytrace-core
//!
//! Core library for daytrace - daily GitHub activity reports.
//!
//! This library provides:
//! - Domain types for commits, pull requests, issues and manual notes
//! - The activity analyzer (categorization, impact, productivity, time buckets)
//! - A GitHub REST client that collects one day of activity
//! - Markdown/JSON/text report rendering and persistence
//! - Git integration for committing reports to a shared repository
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Data Flow
//!
//! - **Source:** [`github::GitHubClient`] produces an [`ActivityData`] for one day
//! - **Analysis:** [`analysis::analyze_activity`] turns it into an [`AnalysisResult`]
//! - **Output:** [`report::generate_report`] renders it, [`report::ReportWriter`] saves it
//!
//! The analyzer is pure: it performs no I/O and takes no configuration.
//!
//! ## Example
//!
//! ```rust,no_run
//! use daytrace_core::analysis::analyze_activity;
//! use daytrace_core::{ActivityData, Config};
//!
//! let config = Config::load().expect("failed to load config");
//! let data: ActivityData = serde_json::from_str("...").expect("invalid activity");
//! let analysis = analyze_activity(&data);
//! println!("productivity: {}", analysis.productivity.level);
//! # let _ = config;
//! ```

// Re-export commonly used items at the crate root
pub use analysis::{analyze_activity, AnalysisResult};
pub use config::Config;
pub use error::{Error, Result};
pub use manual::ManualData;
pub use types::*;

// Public modules
pub mod analysis;
pub mod config;
pub mod error;
pub mod format;
pub mod git;
pub mod github;
pub mod logging;
pub mod manual;
pub mod report;
pub mod types;
