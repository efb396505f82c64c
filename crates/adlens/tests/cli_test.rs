//! Integration tests for the `adlens` binary: argument parsing, error
//! classification, and exit codes, all without a live analytics
//! service. `http://127.0.0.1:1` stands in for an unreachable one.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

/// Build a command with env isolation so tests never read the user's
/// real configuration or keyring-backed session.
fn adlens_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("adlens");
    cmd.env("HOME", "/tmp/adlens-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/adlens-cli-test-nonexistent")
        .env_remove("ADLENS_PROFILE")
        .env_remove("ADLENS_ENDPOINT")
        .env_remove("ADLENS_API_KEY")
        .env_remove("ADLENS_OUTPUT")
        .env_remove("ADLENS_TIMEOUT");
    cmd
}

/// The flags for a syntactically valid connection to a dead port.
const DEAD_SERVICE: [&str; 4] = ["--endpoint", "http://127.0.0.1:1", "--api-key", "test-key"];

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Invocation surface ──────────────────────────────────────────────

#[test]
fn no_args_shows_usage_with_exit_2() {
    let output = adlens_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn help_covers_the_campaign_domain() {
    adlens_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("campaign")
            .and(predicate::str::contains("dashboard"))
            .and(predicate::str::contains("users"))
            .and(predicate::str::contains("analyze"))
            .and(predicate::str::contains("login")),
    );
}

#[test]
fn version_names_the_binary() {
    adlens_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("adlens"));
}

#[test]
fn completions_cover_the_command_tree() {
    adlens_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("adlens"));
    adlens_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn users_watch_is_a_subcommand() {
    adlens_cmd()
        .args(["users", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("watch")
                .and(predicate::str::contains("list"))
                .and(predicate::str::contains("stats")),
        );
}

// ── Parse-time rejection ────────────────────────────────────────────

#[test]
fn unknown_subcommand_is_rejected() {
    let output = adlens_cmd().arg("frobnicate").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn invalid_output_format_lists_choices() {
    let output = adlens_cmd()
        .args(["--output", "xml", "config", "show"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("possible values"));
}

#[test]
fn analyze_requires_a_window() {
    let output = adlens_cmd().arg("analyze").output().unwrap();
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("--start"));
}

#[test]
fn users_update_requires_the_full_form() {
    let output = adlens_cmd().args(["users", "update", "42"]).output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(text.contains("--username") || text.contains("required"));
}

// ── Validation before the wire ──────────────────────────────────────

#[test]
fn malformed_date_gets_a_format_hint() {
    let output = adlens_cmd()
        .args(DEAD_SERVICE)
        .args(["dashboard", "show", "--start", "March 1st"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("YYYY-MM-DD"));
}

#[test]
fn reversed_date_range_is_rejected() {
    let output = adlens_cmd()
        .args(DEAD_SERVICE)
        .args([
            "dashboard", "show", "--start", "2026-05-01", "--end", "2026-01-01",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("start date is after end date"));
}

#[test]
fn account_commands_demand_a_session() {
    // No stored token and none resolvable: refused before any request
    // or confirmation prompt.
    let output = adlens_cmd()
        .args(DEAD_SERVICE)
        .args(["users", "delete", "42", "-y"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert!(combined_output(&output).contains("signed-in session"));
}

// ── Failure classification against a dead service ───────────────────

#[test]
fn unreachable_dashboard_degrades_to_no_data() {
    // Every slice fails, so the store stays empty: warnings per slice
    // on stderr, then the no-data exit code.
    let output = adlens_cmd()
        .args(DEAD_SERVICE)
        .args(["dashboard", "show"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("data unavailable"));
}

#[test]
fn unreachable_analyze_reports_connectivity() {
    let output = adlens_cmd()
        .args(DEAD_SERVICE)
        .args(["analyze", "--start", "2026-01-01", "--end", "2026-03-31"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(7));
    assert!(combined_output(&output).contains("Cannot reach"));
}

// ── Config handling ─────────────────────────────────────────────────

#[test]
fn dashboard_without_any_config_points_at_setup() {
    adlens_cmd()
        .args(["dashboard", "show"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("config")
                .or(predicate::str::contains("Configuration"))
                .or(predicate::str::contains("profile"))
                .or(predicate::str::contains("endpoint")),
        );
}

#[test]
fn config_show_works_without_a_config_file() {
    // Renders the built-in defaults rather than failing.
    adlens_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile"));
}
