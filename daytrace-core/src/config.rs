//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/daytrace/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/daytrace/` (~/.config/daytrace/)
//! - State/Logs: `$XDG_STATE_HOME/daytrace/` (~/.local/state/daytrace/)
//!
//! Reports default to `~/daily-reports`.

use crate::error::{Error, Result};
use crate::report::ReportFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable consulted when no token is configured
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// GitHub credentials and API settings
    #[serde(default)]
    pub github: GitHubConfig,

    /// Report output settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Commit reports to a shared repository (optional)
    #[serde(default)]
    pub git: GitConfig,

    /// Daily scheduler settings
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// GitHub API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubConfig {
    /// Personal access token (falls back to `$GITHUB_TOKEN`)
    pub token: Option<String>,

    /// GitHub login whose activity is reported
    pub username: Option<String>,

    /// API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_github_timeout")]
    pub timeout_secs: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            username: None,
            api_url: default_api_url(),
            timeout_secs: default_github_timeout(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_github_timeout() -> u64 {
    30
}

impl GitHubConfig {
    /// Configured token, or `$GITHUB_TOKEN` when none is set.
    pub fn resolved_token(&self) -> Option<String> {
        self.token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| std::env::var(TOKEN_ENV_VAR).ok())
            .filter(|t| !t.trim().is_empty())
    }

    /// Check if both a token and a username are available
    pub fn is_ready(&self) -> bool {
        self.resolved_token().is_some() && self.username.as_deref().is_some_and(|u| !u.is_empty())
    }

    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if self.resolved_token().is_none() {
            return Err(Error::Config(format!(
                "github.token is required (or set ${})",
                TOKEN_ENV_VAR
            )));
        }
        if self.username.as_deref().map_or(true, str::is_empty) {
            return Err(Error::Config("github.username is required".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config(
                "github.timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Report output configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Directory reports are written to
    #[serde(default = "default_report_dir")]
    pub dir: PathBuf,

    /// Formats written on each run
    #[serde(default = "default_report_formats")]
    pub formats: Vec<ReportFormat>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            dir: default_report_dir(),
            formats: default_report_formats(),
        }
    }
}

fn default_report_dir() -> PathBuf {
    home_dir().join("daily-reports")
}

fn default_report_formats() -> Vec<ReportFormat> {
    vec![ReportFormat::Markdown]
}

/// Git integration configuration
///
/// When enabled, each saved Markdown report is committed and pushed from
/// `repo_path`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitConfig {
    /// Enable/disable commit and push after saving
    #[serde(default)]
    pub enabled: bool,

    /// Working tree of the shared reports repository
    pub repo_path: Option<PathBuf>,

    /// Remote to push to
    #[serde(default = "default_git_remote")]
    pub remote: String,

    /// Branch to push
    #[serde(default = "default_git_branch")]
    pub branch: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            repo_path: None,
            remote: default_git_remote(),
            branch: default_git_branch(),
        }
    }
}

fn default_git_remote() -> String {
    "origin".to_string()
}

fn default_git_branch() -> String {
    "main".to_string()
}

impl GitConfig {
    /// Check if git integration is enabled and has a repository
    pub fn is_ready(&self) -> bool {
        self.enabled && self.repo_path.is_some()
    }

    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        if self.repo_path.is_none() {
            return Err(Error::Config(
                "git.repo_path is required when git integration is enabled".to_string(),
            ));
        }
        if self.remote.trim().is_empty() || self.branch.trim().is_empty() {
            return Err(Error::Config(
                "git.remote and git.branch must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Scheduler configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScheduleConfig {
    /// Local hour (0-23) at which the daily report is generated
    #[serde(default = "default_schedule_hour")]
    pub hour: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            hour: default_schedule_hour(),
        }
    }
}

fn default_schedule_hour() -> u32 {
    18
}

impl ScheduleConfig {
    pub fn validate(&self) -> Result<()> {
        if self.hour > 23 {
            return Err(Error::Config(
                "schedule.hour must be between 0 and 23".to_string(),
            ));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save configuration to a specific path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;

        tracing::info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.github.validate()?;
        self.git.validate()?;
        self.schedule.validate()?;
        Ok(())
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/daytrace/config.toml` (~/.config/daytrace/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("daytrace").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/daytrace/` (~/.local/state/daytrace/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("daytrace")
    }

    /// Ensure XDG base directory environment variables are set.
    ///
    /// This is mainly for CLI binaries that want explicit, stable path behavior
    /// before invoking other components that read these env vars.
    pub fn ensure_xdg_env() {
        let home = home_dir();

        if std::env::var("XDG_STATE_HOME").is_err() {
            std::env::set_var("XDG_STATE_HOME", home.join(".local/state"));
        }

        if std::env::var("XDG_CONFIG_HOME").is_err() {
            std::env::set_var("XDG_CONFIG_HOME", home.join(".config"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.github.token.is_none());
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.github.timeout_secs, 30);
        assert_eq!(config.report.formats, vec![ReportFormat::Markdown]);
        assert!(config.report.dir.ends_with("daily-reports"));
        assert_eq!(config.schedule.hour, 18);
        assert!(!config.git.enabled);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[github]
token = "ghp_test"
username = "octocat"

[report]
dir = "/tmp/reports"
formats = ["markdown", "json"]

[schedule]
hour = 17

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.github.token.as_deref(), Some("ghp_test"));
        assert_eq!(config.github.username.as_deref(), Some("octocat"));
        assert!(config.github.is_ready());
        assert_eq!(config.report.dir, PathBuf::from("/tmp/reports"));
        assert_eq!(
            config.report.formats,
            vec![ReportFormat::Markdown, ReportFormat::Json]
        );
        assert_eq!(config.schedule.hour, 17);
        assert_eq!(config.logging.level, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_github_config_validation() {
        let config = GitHubConfig {
            token: Some("ghp_test".to_string()),
            username: None,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GitHubConfig {
            token: Some("ghp_test".to_string()),
            username: Some("octocat".to_string()),
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_git_config_validation() {
        // Disabled config is always valid
        let config = GitConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.is_ready());

        // Enabled without a repository should fail
        let config = GitConfig {
            enabled: true,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GitConfig {
            enabled: true,
            repo_path: Some(PathBuf::from("/tmp/team-reports")),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert!(config.is_ready());
    }

    #[test]
    fn test_schedule_hour_validation() {
        assert!(ScheduleConfig { hour: 23 }.validate().is_ok());
        assert!(ScheduleConfig { hour: 24 }.validate().is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/config.toml");

        let mut config = Config::default();
        config.github.token = Some("ghp_roundtrip".to_string());
        config.github.username = Some("octocat".to_string());
        config.report.dir = temp.path().join("reports");
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.github.username.as_deref(), Some("octocat"));
        assert_eq!(loaded.report.dir, temp.path().join("reports"));
        assert_eq!(loaded.git.remote, "origin");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[github\ntoken = ").unwrap();

        match Config::load_from(&path) {
            Err(Error::Config(msg)) => assert!(msg.contains("failed to parse config")),
            other => panic!("expected config error, got {:?}", other),
        }
    }
}
