use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

struct CliTestEnv {
    _temp_dir: TempDir,
    home: PathBuf,
    xdg_config: PathBuf,
    xdg_state: PathBuf,
    reports: PathBuf,
}

impl CliTestEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let base = temp_dir.path().to_path_buf();
        let home = base.join("home");
        let xdg_config = base.join("xdg-config");
        let xdg_state = base.join("xdg-state");
        let reports = base.join("reports");

        fs::create_dir_all(&home).expect("failed to create HOME");
        fs::create_dir_all(&xdg_config).expect("failed to create XDG_CONFIG_HOME");
        fs::create_dir_all(&xdg_state).expect("failed to create XDG_STATE_HOME");

        Self {
            _temp_dir: temp_dir,
            home,
            xdg_config,
            xdg_state,
            reports,
        }
    }

    fn write_config(&self, contents: &str) {
        let path = self.xdg_config.join("daytrace/config.toml");
        fs::create_dir_all(path.parent().expect("missing config parent"))
            .expect("failed to create config dir");
        fs::write(path, contents).expect("failed to write config");
    }

    fn write_activity(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.home.join(name);
        fs::write(&path, contents).expect("failed to write activity file");
        path
    }
}

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../daytrace-core/tests/fixtures/activity-2024-01-15.json")
}

fn run_bin(env: &CliTestEnv, args: &[&str]) -> Output {
    let bin_path = PathBuf::from(assert_cmd::cargo::cargo_bin!("daytrace"));

    Command::new(bin_path)
        .args(args)
        .env("HOME", &env.home)
        .env("XDG_CONFIG_HOME", &env.xdg_config)
        .env("XDG_STATE_HOME", &env.xdg_state)
        .env_remove("GITHUB_TOKEN")
        .stdin(Stdio::null())
        .output()
        .unwrap_or_else(|e| panic!("failed to execute daytrace: {e}"))
}

fn assert_success(args: &[&str], output: &Output) {
    if output.status.success() {
        return;
    }

    let rendered_args = args
        .iter()
        .map(|arg| OsString::from(arg).to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    panic!(
        "daytrace {rendered_args} failed\nstatus: {}\nstdout:\n{}\nstderr:\n{}",
        output.status, stdout, stderr
    );
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[test]
fn offline_run_saves_markdown_report() {
    let env = CliTestEnv::new();
    let input = path_arg(&fixture_path());
    let out_dir = path_arg(&env.reports);
    let args = ["--input", &input, "--no-manual", "--output-dir", &out_dir];

    let output = run_bin(&env, &args);
    assert_success(&args, &output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Daily report generated successfully"));
    assert!(stdout.contains("• 4 commits"));
    assert!(stdout.contains("• 2 repositories"));
    assert!(
        stdout.contains("Productivity: MEDIUM (score 16)"),
        "expected productivity line, got:\n{stdout}"
    );

    let report = env.reports.join("2024-01-15-report.md");
    assert!(report.exists(), "report should exist at {}", report.display());
    let md = fs::read_to_string(report).expect("failed to read report");
    assert!(md.contains("# Daily Progress Report - Monday, January 15, 2024"));
    assert!(md.contains("## 💻 Commits (4)"));
    assert!(!env.reports.join("2024-01-15-report.json").exists());
}

#[test]
fn offline_run_honors_formats_from_config_and_flags() {
    let env = CliTestEnv::new();
    env.write_config(&format!(
        "[report]\ndir = {:?}\nformats = [\"json\"]\n",
        path_arg(&env.reports)
    ));
    let input = path_arg(&fixture_path());

    let args = ["--input", &input, "--no-manual"];
    let output = run_bin(&env, &args);
    assert_success(&args, &output);
    assert!(env.reports.join("2024-01-15-report.json").exists());
    assert!(!env.reports.join("2024-01-15-report.md").exists());

    let args = ["--input", &input, "--no-manual", "--format", "md,txt"];
    let output = run_bin(&env, &args);
    assert_success(&args, &output);
    assert!(env.reports.join("2024-01-15-report.md").exists());
    let text = fs::read_to_string(env.reports.join("2024-01-15-report.txt"))
        .expect("failed to read text report");
    assert!(text.starts_with("DAILY PROGRESS REPORT - 2024-01-15"));
}

#[test]
fn empty_day_reports_no_activity() {
    let env = CliTestEnv::new();
    let input = env.write_activity("empty.json", r#"{"date": "2024-01-16"}"#);
    let input = path_arg(&input);
    let out_dir = path_arg(&env.reports);
    let args = ["--input", &input, "--output-dir", &out_dir];

    let output = run_bin(&env, &args);
    assert_success(&args, &output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No activity found"));
    assert!(!env.reports.exists(), "no report directory should be created");
}

#[test]
fn fetching_without_credentials_asks_for_setup() {
    let env = CliTestEnv::new();
    let output = run_bin(&env, &["--date", "2024-01-15", "--no-manual"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("daytrace --setup"),
        "expected setup hint, got:\n{stderr}"
    );
}

#[test]
fn invalid_activity_file_fails() {
    let env = CliTestEnv::new();
    let input = env.write_activity("broken.json", r#"{"date": "not-a-date"}"#);
    let input = path_arg(&input);

    let output = run_bin(&env, &["--input", &input, "--no-manual"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to load activity"));
}
