//! daytrace - daily GitHub activity reports
//!
//! Fetches one day of commits, pull requests and issues from GitHub,
//! analyzes them, optionally asks for manual details, and saves a report.
//!
//! Uses XDG Base Directory specification for file locations:
//! - Config: $XDG_CONFIG_HOME/daytrace/config.toml (~/.config/daytrace/config.toml)
//! - Logs: $XDG_STATE_HOME/daytrace/daytrace.<date>.log (~/.local/state/daytrace/)

mod interactive;
mod schedule;
mod setup;

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::{Days, Local, NaiveDate};
use clap::Parser;
use daytrace_core::config::GitHubConfig;
use daytrace_core::git::GitIntegration;
use daytrace_core::github::GitHubClient;
use daytrace_core::report::{generate_report, ReportFormat, ReportWriter};
use daytrace_core::{analyze_activity, ActivityData, Config, ManualData};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::runtime::Runtime;

use interactive::Prompter;

#[derive(Parser)]
#[command(name = "daytrace")]
#[command(about = "Generate daily progress reports from your GitHub activity")]
#[command(version)]
struct Args {
    /// Report on this day instead of today
    #[arg(long, value_name = "YYYY-MM-DD", conflicts_with = "yesterday")]
    date: Option<NaiveDate>,

    /// Report on yesterday
    #[arg(long)]
    yesterday: bool,

    /// Analyze a saved activity JSON file instead of fetching from GitHub
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Skip the manual details prompts
    #[arg(long)]
    no_manual: bool,

    /// Directory to save reports in (overrides report.dir)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Report formats to save: md, json, txt (overrides report.formats)
    #[arg(long, value_name = "FORMAT", value_delimiter = ',')]
    format: Vec<ReportFormat>,

    /// Run the setup wizard
    #[arg(long, conflicts_with = "schedule")]
    setup: bool,

    /// Generate a report every day at schedule.hour until Ctrl+C
    #[arg(short, long)]
    schedule: bool,
}

impl Args {
    fn report_date(&self, today: NaiveDate) -> NaiveDate {
        if let Some(date) = self.date {
            date
        } else if self.yesterday {
            today.checked_sub_days(Days::new(1)).unwrap_or(today)
        } else {
            today
        }
    }

    fn apply_overrides(&self, config: &mut Config) {
        if let Some(dir) = &self.output_dir {
            config.report.dir = dir.clone();
        }
        if !self.format.is_empty() {
            config.report.formats = self.format.clone();
        }
    }
}

/// Per-run choices that do not live in the config file
struct RunOptions {
    input: Option<PathBuf>,
    ask_manual: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Ensure XDG environment variables are set before using core library
    Config::ensure_xdg_env();

    let mut config = Config::load().context("failed to load configuration")?;

    let _log_guard =
        daytrace_core::logging::init(&config.logging).context("failed to initialize logging")?;

    tracing::info!("daytrace starting");

    let runtime = Runtime::new().context("failed to start async runtime")?;

    if args.setup {
        return setup::run_setup(&runtime, config);
    }

    // One-off overrides; never saved by the setup wizard
    args.apply_overrides(&mut config);

    let options = RunOptions {
        input: args.input.clone(),
        ask_manual: !args.no_manual && io::stdin().is_terminal(),
    };

    if args.schedule {
        config.schedule.validate()?;
        return schedule::run_scheduler(config.schedule.hour, |date| {
            generate_daily_report(&runtime, &config, &options, date)
        });
    }

    let date = args.report_date(Local::now().date_naive());
    generate_daily_report(&runtime, &config, &options, date)
}

fn generate_daily_report(
    runtime: &Runtime,
    config: &Config,
    options: &RunOptions,
    date: NaiveDate,
) -> Result<()> {
    let data = match &options.input {
        Some(path) => {
            let data = ActivityData::from_json_file(path)
                .with_context(|| format!("failed to load activity from {}", path.display()))?;
            println!(
                "📊 Generating report for {} from {}...",
                data.date.format("%a %b %d %Y"),
                path.display()
            );
            data
        }
        None => {
            println!("📊 Generating report for {}...", date.format("%a %b %d %Y"));
            fetch_activity(runtime, &config.github, date)?
        }
    };

    if data.is_empty() {
        println!("⚠️  No activity found for {}.", data.date);
        tracing::info!(date = %data.date, "No activity found");
        return Ok(());
    }

    let analysis = analyze_activity(&data);

    let manual = if options.ask_manual {
        collect_manual()?
    } else {
        None
    };

    let report = generate_report(&data, &analysis, manual.as_ref(), &Local::now())
        .context("failed to render report")?;

    let saved = ReportWriter::new(&config.report.dir)
        .save(&report, data.date, &config.report.formats)
        .context("failed to save report")?;

    println!("✅ Daily report generated successfully!");
    println!("\n📊 Summary:");
    println!("  • {} commits", analysis.summary.total_commits);
    println!("  • {} pull requests", analysis.summary.total_pull_requests);
    println!("  • {} issues", analysis.summary.total_issues);
    println!(
        "  • {} repositories",
        analysis.summary.repositories_worked_on.len()
    );
    println!(
        "  • Productivity: {} (score {})",
        analysis.productivity.level.as_str().to_uppercase(),
        analysis.productivity.score
    );

    println!("\n📁 Report saved to:");
    for (_, path) in &saved.files {
        println!("  • {}", path.display());
    }

    if let Some(git) = GitIntegration::from_config(&config.git) {
        match saved.markdown() {
            Some(path) => {
                println!("\n🔗 Committing report to {}...", git.repo_path().display());
                if git.commit_and_push(path, data.date)? {
                    println!("✅ Report committed and pushed");
                } else {
                    println!("💡 You can manually commit the report later");
                }
            }
            None => {
                tracing::warn!("Git integration enabled but no Markdown report was saved");
            }
        }
    }

    if !analysis.recommendations.is_empty() {
        println!("\n💡 Recommendations:");
        for rec in &analysis.recommendations {
            println!("  • {}", rec);
        }
    }

    tracing::info!(
        date = %data.date,
        activities = data.total_activity(),
        score = analysis.productivity.score,
        files = saved.files.len(),
        "Report generated"
    );

    Ok(())
}

fn fetch_activity(
    runtime: &Runtime,
    github: &GitHubConfig,
    date: NaiveDate,
) -> Result<ActivityData> {
    if !github.is_ready() {
        bail!(
            "GitHub is not configured. Run `daytrace --setup` (or set $GITHUB_TOKEN and github.username)"
        );
    }

    let client = GitHubClient::new(github).context("failed to create GitHub client")?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .context("invalid progress template")?,
    );
    spinner.set_message("🔍 Fetching GitHub activity...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = runtime.block_on(client.get_user_activity(date));
    spinner.finish_and_clear();

    result.context("failed to fetch GitHub activity")
}

fn collect_manual() -> Result<Option<ManualData>> {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    if !prompter
        .wants_manual_input()
        .context("failed to read answer")?
    {
        return Ok(None);
    }

    let manual = prompter
        .collect_manual_input()
        .context("failed to read manual details")?;
    Ok(Some(manual))
}
