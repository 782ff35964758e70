//! Report rendering and persistence
//!
//! A report is rendered in three formats at once. Which of them are written
//! to disk, and where, is decided by the caller through [`ReportWriter`]; this
//! module holds no configuration of its own.

mod markdown;
mod text;

pub use markdown::{category_emoji, period_emoji, render_markdown};
pub use text::render_text;

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone};
use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisResult;
use crate::error::{Error, Result};
use crate::manual::ManualData;
use crate::types::ActivityData;

/// Output format of a saved report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[serde(alias = "md")]
    Markdown,
    Json,
    #[serde(alias = "txt")]
    Text,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Markdown => "markdown",
            ReportFormat::Json => "json",
            ReportFormat::Text => "text",
        }
    }

    /// File extension used when saving
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Markdown => "md",
            ReportFormat::Json => "json",
            ReportFormat::Text => "txt",
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "json" => Ok(ReportFormat::Json),
            "text" | "txt" => Ok(ReportFormat::Text),
            _ => Err(format!(
                "unknown report format: {} (expected md, json or txt)",
                s
            )),
        }
    }
}

/// A rendered report in every format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub markdown: String,
    pub json: String,
    pub text: String,
}

impl Report {
    pub fn content(&self, format: ReportFormat) -> &str {
        match format {
            ReportFormat::Markdown => &self.markdown,
            ReportFormat::Json => &self.json,
            ReportFormat::Text => &self.text,
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    date: NaiveDate,
    generated: String,
    activity: &'a ActivityData,
    analysis: &'a AnalysisResult,
    manual: Option<&'a ManualData>,
}

/// Render a report. Times are shown in the timezone of `generated_at`.
pub fn generate_report<Tz: TimeZone>(
    data: &ActivityData,
    analysis: &AnalysisResult,
    manual: Option<&ManualData>,
    generated_at: &DateTime<Tz>,
) -> Result<Report>
where
    Tz::Offset: std::fmt::Display,
{
    let json = serde_json::to_string_pretty(&JsonReport {
        date: data.date,
        generated: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        activity: data,
        analysis,
        manual,
    })?;

    Ok(Report {
        markdown: render_markdown(data, analysis, manual, generated_at),
        json,
        text: render_text(data, analysis),
    })
}

/// File name for a report of `date` in `format` (e.g., `2024-01-15-report.md`).
pub fn report_file_name(date: NaiveDate, format: ReportFormat) -> String {
    format!("{}-report.{}", date.format("%Y-%m-%d"), format.extension())
}

/// Paths written by [`ReportWriter::save`], in the order written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedReports {
    pub files: Vec<(ReportFormat, PathBuf)>,
}

impl SavedReports {
    pub fn path(&self, format: ReportFormat) -> Option<&Path> {
        self.files
            .iter()
            .find(|(f, _)| *f == format)
            .map(|(_, p)| p.as_path())
    }

    pub fn markdown(&self) -> Option<&Path> {
        self.path(ReportFormat::Markdown)
    }
}

/// Writes rendered reports into a directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `report` in each of `formats`, creating the directory if
    /// needed. Writes Markdown when `formats` is empty. Existing reports for
    /// the same day are overwritten.
    pub fn save(
        &self,
        report: &Report,
        date: NaiveDate,
        formats: &[ReportFormat],
    ) -> Result<SavedReports> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("failed to create report directory {:?}: {}", self.dir, e),
            ))
        })?;

        let mut wanted: Vec<ReportFormat> = Vec::new();
        for format in formats {
            if !wanted.contains(format) {
                wanted.push(*format);
            }
        }
        if wanted.is_empty() {
            wanted.push(ReportFormat::Markdown);
        }

        let mut saved = SavedReports::default();
        for format in wanted {
            let path = self.dir.join(report_file_name(date, format));
            std::fs::write(&path, report.content(format))?;
            tracing::info!(format = %format, path = %path.display(), "Saved report");
            saved.files.push((format, path));
        }

        Ok(saved)
    }
}
