//! Plain-text report renderer

use std::fmt::Write as _;

use crate::analysis::AnalysisResult;
use crate::types::ActivityData;

const RULE_WIDTH: usize = 50;

pub fn render_text(data: &ActivityData, analysis: &AnalysisResult) -> String {
    let summary = &analysis.summary;
    let mut out = String::new();

    let _ = writeln!(out, "DAILY PROGRESS REPORT - {}", data.date.format("%Y-%m-%d"));
    let _ = writeln!(out, "{}\n", "=".repeat(RULE_WIDTH));

    out.push_str("SUMMARY:\n");
    let _ = writeln!(out, "- Commits: {}", summary.total_commits);
    let _ = writeln!(out, "- Pull Requests: {}", summary.total_pull_requests);
    let _ = writeln!(out, "- Issues: {}", summary.total_issues);
    let _ = writeln!(out, "- Repositories: {}", summary.repositories_worked_on.len());
    let _ = writeln!(
        out,
        "- Productivity: {}\n",
        analysis.productivity.level.as_str().to_uppercase()
    );

    if !data.commits.is_empty() {
        out.push_str("COMMITS:\n");
        for commit in &data.commits {
            let _ = writeln!(out, "- [{}] {} ({})", commit.sha, commit.subject(), commit.repo);
        }
        out.push('\n');
    }

    if !data.pull_requests.is_empty() {
        out.push_str("PULL REQUESTS:\n");
        for pr in &data.pull_requests {
            let _ = writeln!(out, "- #{}: {} ({}) [{}]", pr.number, pr.title, pr.repo, pr.state);
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze_activity_in;
    use crate::types::{Commit, ItemState, PullRequest};
    use chrono::{NaiveDate, TimeZone, Utc};

    #[test]
    fn test_render_text() {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let data = ActivityData {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            commits: vec![Commit {
                repo: "octo/app".to_string(),
                message: "fix: crash on start\n\ndetails".to_string(),
                sha: "abc1234".to_string(),
                url: "u".to_string(),
                timestamp,
            }],
            pull_requests: vec![PullRequest {
                repo: "octo/app".to_string(),
                title: "Fix crash".to_string(),
                number: 4,
                state: ItemState::Open,
                url: "u".to_string(),
                timestamp,
            }],
            issues: vec![],
        };
        let analysis = analyze_activity_in(&data, &Utc);
        let text = render_text(&data, &analysis);

        let expected = "\
DAILY PROGRESS REPORT - 2024-01-15
==================================================

SUMMARY:
- Commits: 1
- Pull Requests: 1
- Issues: 0
- Repositories: 1
- Productivity: LOW

COMMITS:
- [abc1234] fix: crash on start (octo/app)

PULL REQUESTS:
- #4: Fix crash (octo/app) [open]

";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_text_empty_day() {
        let data = ActivityData::empty(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        let analysis = analyze_activity_in(&data, &Utc);
        let text = render_text(&data, &analysis);
        assert!(text.contains("- Productivity: NONE\n"));
        assert!(!text.contains("COMMITS:"));
    }
}
