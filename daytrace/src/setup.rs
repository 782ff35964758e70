//! First-run setup wizard

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Local;
use daytrace_core::github::GitHubClient;
use daytrace_core::Config;
use tokio::runtime::Runtime;

use crate::interactive::Prompter;

const TOKEN_URL: &str = "https://github.com/settings/tokens";

/// Ask for the GitHub token, username and report directory, updating
/// `config` in place. Blank answers keep the current values.
pub fn prompt_settings<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    config: &mut Config,
) -> io::Result<()> {
    let token = match config.github.token.as_deref().filter(|t| !t.is_empty()) {
        Some(current) => prompter
            .optional_text("Enter your GitHub Personal Access Token [keep current]:")?
            .unwrap_or_else(|| current.to_string()),
        None => prompter.text(
            "Enter your GitHub Personal Access Token:",
            "Please enter a valid token",
        )?,
    };
    config.github.token = Some(token);

    let username = prompter.text_or(
        "Enter your GitHub username:",
        config.github.username.as_deref(),
        "Please enter your username",
    )?;
    config.github.username = Some(username);

    let current_dir = config.report.dir.display().to_string();
    let dir = prompter.text_or(
        "Where should daily reports be saved?",
        Some(&current_dir),
        "Please enter a valid directory path",
    )?;
    config.report.dir = PathBuf::from(dir);

    Ok(())
}

/// Run the wizard on the terminal, save the configuration and check that
/// GitHub accepts the credentials.
pub fn run_setup(runtime: &Runtime, mut config: Config) -> Result<()> {
    println!("\n🚀 Welcome to daytrace setup!\n");
    println!("daytrace tracks your GitHub activity and generates daily reports.");
    println!("You'll need a GitHub Personal Access Token to get started.\n");

    {
        let stdin = io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), io::stdout());
        prompt_settings(&mut prompter, &mut config).context("failed to read setup answers")?;
    }

    let path = config.save().context("failed to save configuration")?;
    println!("\n💾 Configuration saved to {}", path.display());

    println!("\n🔍 Testing GitHub connection...");
    if let Err(e) = verify(runtime, &config) {
        println!("❌ Setup failed: {:#}", e);
        println!("\nPlease check your GitHub token and try again.");
        println!("To create a token: {}", TOKEN_URL);
        bail!("GitHub connection test failed");
    }

    println!("\n🎉 Setup completed successfully!");
    println!("You can now run:");
    println!("  daytrace              - Generate today's report");
    println!("  daytrace --schedule   - Generate a report every day");
    Ok(())
}

fn verify(runtime: &Runtime, config: &Config) -> Result<()> {
    let client = GitHubClient::new(&config.github).context("invalid GitHub settings")?;

    let login = runtime
        .block_on(client.verify_connection())
        .context("GitHub rejected the credentials")?;
    println!("✅ GitHub connection successful! (authenticated as {})", login);

    println!("📊 Fetching today's activity...");
    let activity = runtime
        .block_on(client.get_user_activity(Local::now().date_naive()))
        .context("failed to fetch today's activity")?;
    println!(
        "✅ Found {} activities for today!",
        activity.total_activity()
    );

    Ok(())
}
