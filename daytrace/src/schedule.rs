//! Daily scheduler
//!
//! Generates a report once a day at a fixed local hour until Ctrl+C.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Duration as ChronoDuration, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// How often the wait loop checks the clock and the stop flag
const TICK: Duration = Duration::from_millis(500);

/// The first `hour:00:00` strictly after `now`.
pub fn next_run_after(now: NaiveDateTime, hour: u32) -> NaiveDateTime {
    let at = NaiveTime::from_hms_opt(hour.min(23), 0, 0).unwrap_or(NaiveTime::MIN);
    let today = now.date().and_time(at);
    if today > now {
        today
    } else {
        today + ChronoDuration::days(1)
    }
}

/// Whether a scheduler started at `now` should generate today's report
/// right away instead of waiting for tomorrow.
pub fn runs_immediately(now: NaiveDateTime, hour: u32) -> bool {
    now.hour() >= hour
}

/// Run `generate` every day at `hour` (local time) until Ctrl+C.
///
/// A failed run is reported and the scheduler keeps going.
pub fn run_scheduler<F>(hour: u32, mut generate: F) -> Result<()>
where
    F: FnMut(NaiveDate) -> Result<()>,
{
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    ctrlc::set_handler(move || {
        eprintln!("\n👋 Stopping scheduler...");
        r.store(false, Ordering::SeqCst);
    })
    .context("failed to set Ctrl+C handler")?;

    println!("🕐 Starting automated daily reporting...");
    println!(
        "Reports will be generated automatically at {:02}:00 every day.",
        hour
    );
    tracing::info!(hour, "Scheduler started");

    let mut run = |date: NaiveDate| {
        if let Err(e) = generate(date) {
            eprintln!("❌ Error generating report: {:#}", e);
            tracing::error!(%date, error = %e, "Scheduled report failed");
        }
    };

    let now = Local::now().naive_local();
    if runs_immediately(now, hour) {
        println!("🔄 Generating today's report now...");
        run(now.date());
    }

    println!("✅ Scheduler started. Press Ctrl+C to stop.");

    while running.load(Ordering::SeqCst) {
        let next = next_run_after(Local::now().naive_local(), hour);
        tracing::debug!(next = %next, "Waiting for next scheduled run");

        while running.load(Ordering::SeqCst) && Local::now().naive_local() < next {
            thread::sleep(TICK);
        }
        if !running.load(Ordering::SeqCst) {
            break;
        }

        println!("⏰ Scheduled report generation started...");
        run(next.date());
    }

    tracing::info!("Scheduler stopped");
    Ok(())
}
