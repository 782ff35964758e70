//! Markdown report renderer

use std::fmt::Write as _;

use chrono::{DateTime, TimeZone, Utc};

use crate::analysis::{AnalysisResult, CommitCategory, TimeSlot};
use crate::format::{format_hours, format_long_date, format_time_in};
use crate::manual::ManualData;
use crate::types::{ActivityData, ItemState};

pub fn category_emoji(category: CommitCategory) -> &'static str {
    match category {
        CommitCategory::Feature => "✨",
        CommitCategory::Fix => "🐛",
        CommitCategory::Refactor => "♻️",
        CommitCategory::Docs => "📚",
        CommitCategory::Style => "💄",
        CommitCategory::Test => "🧪",
        CommitCategory::Chore => "🔧",
        CommitCategory::Config => "⚙️",
        CommitCategory::Other => "📝",
    }
}

pub fn period_emoji(slot: TimeSlot) -> &'static str {
    match slot {
        TimeSlot::Morning => "🌅",
        TimeSlot::Afternoon => "☀️",
        TimeSlot::Evening => "🌆",
        TimeSlot::Night => "🌙",
    }
}

fn pull_request_icon(state: ItemState) -> &'static str {
    match state {
        ItemState::Open => "🟡",
        ItemState::Closed => "🔴",
        ItemState::Merged => "🟢",
    }
}

fn issue_icon(state: ItemState) -> &'static str {
    match state {
        ItemState::Open => "🟡",
        _ => "🟢",
    }
}

/// Render the Markdown report. Times use the timezone of `generated_at`.
pub fn render_markdown<Tz: TimeZone>(
    data: &ActivityData,
    analysis: &AnalysisResult,
    manual: Option<&ManualData>,
    generated_at: &DateTime<Tz>,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let tz = generated_at.timezone();
    let time = |ts: DateTime<Utc>| format_time_in(ts, &tz);
    let summary = &analysis.summary;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "# Daily Progress Report - {}\n",
        format_long_date(data.date)
    );

    // Summary
    out.push_str("## 📊 Summary\n\n");
    let _ = writeln!(out, "- **Total Commits:** {}", summary.total_commits);
    let _ = writeln!(out, "- **Pull Requests:** {}", summary.total_pull_requests);
    let _ = writeln!(out, "- **Issues:** {}", summary.total_issues);
    let _ = writeln!(
        out,
        "- **Repositories:** {}",
        summary.repositories_worked_on.len()
    );
    let _ = writeln!(
        out,
        "- **Productivity Level:** {} (Score: {})\n",
        analysis.productivity.level.as_str().to_uppercase(),
        analysis.productivity.score
    );

    if let (Some(first), Some(last)) = (&summary.first_activity, &summary.last_activity) {
        let _ = writeln!(
            out,
            "- **Active Period:** {} - {}\n",
            time(first.timestamp()),
            time(last.timestamp())
        );
    }

    // Commits, grouped by repository in first-seen order
    if !data.commits.is_empty() {
        let _ = writeln!(out, "## 💻 Commits ({})\n", data.commits.len());
        let detailed = &analysis.commit_analysis.detailed_commits;

        for repo in analysis.commit_analysis.by_repository.keys() {
            let _ = writeln!(out, "### {}\n", repo);
            for entry in detailed.iter().filter(|d| &d.commit.repo == repo) {
                let commit = &entry.commit;
                let _ = writeln!(
                    out,
                    "- **[{}]({})** ({}) [{}] {}",
                    commit.sha,
                    commit.url,
                    time(commit.timestamp),
                    entry.category,
                    commit.subject()
                );
            }
            out.push('\n');
        }
    }

    if !data.pull_requests.is_empty() {
        let _ = writeln!(out, "## 🔄 Pull Requests ({})\n", data.pull_requests.len());
        for pr in &data.pull_requests {
            let _ = writeln!(
                out,
                "- {} **[#{}]({})** ({}) {}",
                pull_request_icon(pr.state),
                pr.number,
                pr.url,
                time(pr.timestamp),
                pr.title
            );
            let _ = writeln!(out, "  - Repository: {}", pr.repo);
        }
        out.push('\n');
    }

    if !data.issues.is_empty() {
        let _ = writeln!(out, "## 🐛 Issues ({})\n", data.issues.len());
        for issue in &data.issues {
            let _ = writeln!(
                out,
                "- {} **[#{}]({})** ({}) {}",
                issue_icon(issue.state),
                issue.number,
                issue.url,
                time(issue.timestamp),
                issue.title
            );
            let _ = writeln!(out, "  - Repository: {}", issue.repo);
        }
        out.push('\n');
    }

    // Analysis
    out.push_str("## 📈 Analysis\n\n");

    let by_category = &analysis.commit_analysis.by_category;
    if !by_category.is_empty() {
        out.push_str("### Commit Categories\n\n");
        for (category, count) in by_category.iter() {
            let _ = writeln!(
                out,
                "- {} **{}:** {}",
                category_emoji(*category),
                category.display_name(),
                count
            );
        }
        out.push('\n');
    }

    out.push_str("### Time Distribution\n\n");
    for (slot, count) in analysis.time_distribution.iter() {
        if count > 0 {
            let _ = writeln!(
                out,
                "- {} **{}:** {} activities",
                period_emoji(slot),
                slot.display_name(),
                count
            );
        }
    }
    out.push('\n');

    if let Some(manual) = manual {
        render_manual(&mut out, manual);
    }

    if !analysis.recommendations.is_empty() {
        out.push_str("## 💡 Recommendations\n\n");
        for rec in &analysis.recommendations {
            let _ = writeln!(out, "- {}", rec);
        }
        out.push('\n');
    }

    out.push_str("---\n");
    let _ = writeln!(
        out,
        "*Report generated on {} by daytrace*",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    );

    out
}

fn render_manual(out: &mut String, manual: &ManualData) {
    let tracked: Vec<_> = manual.tracked_time().collect();
    if !tracked.is_empty() {
        out.push_str("## ⏰ Time Allocation\n\n");
        for entry in &tracked {
            let _ = writeln!(
                out,
                "- **{}:** {}",
                entry.category,
                format_hours(entry.hours)
            );
        }
        let _ = writeln!(out, "- **Total:** {}", format_hours(manual.total_hours()));
        out.push('\n');
    }

    let reviews = &manual.code_reviews;
    if reviews.participated && !reviews.reviews.is_empty() {
        out.push_str("## 👀 Code Reviews\n\n");
        for review in &reviews.reviews {
            let _ = writeln!(
                out,
                "- **{}:** {} ({})",
                review.kind, review.description, review.outcome
            );
        }
        out.push('\n');
    }

    let blockers = &manual.blockers;
    if blockers.had_blockers && !blockers.blockers.is_empty() {
        out.push_str("## 🚧 Blockers\n\n");
        for blocker in &blockers.blockers {
            let _ = writeln!(
                out,
                "- **{}** [{}] {}",
                blocker.kind, blocker.status, blocker.description
            );
            if let Some(next) = &blocker.next_steps {
                let _ = writeln!(out, "  - Next steps: {}", next);
            }
        }
        out.push('\n');
    }

    if !manual.tomorrow_plans.is_empty() {
        out.push_str("## 🎯 Tomorrow's Plans\n\n");
        for plan in &manual.tomorrow_plans {
            let _ = write!(out, "- [{}] {}", plan.priority, plan.task);
            if let Some(hours) = plan.estimated_hours {
                let _ = write!(out, " (~{})", format_hours(hours));
            }
            out.push('\n');
        }
        out.push('\n');
    }
}
