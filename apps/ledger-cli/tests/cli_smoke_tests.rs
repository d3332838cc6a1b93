//! CLI smoke tests for the report-ledger binary
//!
//! Each test drives the built binary against a file database inside a
//! temporary home directory and inspects the JSON written to stdout.

use serde_json::Value;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Helper to run the report-ledger binary with given arguments
fn run_report_ledger(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_report-ledger"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute report-ledger")
}

/// Write a config rooted at `home` with console logging off.
fn write_config(home: &Path) -> String {
    let path = home.join("config.yaml");
    let yaml = format!(
        r#"
home_dir: "{}"
database:
  url: "sqlite://db/reports.db"
logging:
  default:
    console_level: "off"
    file: ""
modules:
  reports:
    default_page_size: 2
    max_page_size: 5
"#,
        home.display().to_string().replace('\\', "/")
    );
    std::fs::write(&path, yaml).unwrap();
    path.to_string_lossy().to_string()
}

fn run_with_config(config: &str, args: &[&str]) -> Output {
    let mut full = vec!["--config", config];
    full.extend_from_slice(args);
    run_report_ledger(&full)
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

fn seed(config: &str) {
    for (input, output, payload) in [(2, 0, "0x02"), (0, 1, "01"), (0, 0, "00"), (1, 0, "10")] {
        let out = run_with_config(
            config,
            &[
                "append",
                "--input",
                &input.to_string(),
                "--output",
                &output.to_string(),
                "--payload",
                payload,
            ],
        );
        assert!(out.status.success(), "append failed: {out:?}");
    }
}

#[test]
fn test_cli_help_command() {
    let output = run_report_ledger(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    for sub in ["check", "append", "get", "count", "list"] {
        assert!(stdout.contains(sub), "Should contain '{sub}' subcommand");
    }
    assert!(stdout.contains("--config"), "Should mention config option");
}

#[test]
fn test_cli_version_command() {
    let output = run_report_ledger(&["--version"]);

    assert!(output.status.success(), "Version command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("report-ledger"), "Should contain binary name");
    assert!(stdout.chars().any(|c| c.is_ascii_digit()));
}

#[test]
fn test_cli_invalid_command() {
    let output = run_report_ledger(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid-command") || stderr.contains("unrecognized"));
}

#[test]
fn test_cli_check_with_mock_database() {
    let home = TempDir::new().unwrap();
    let config = write_config(home.path());

    let json = stdout_json(&run_with_config(&config, &["--mock", "check"]));
    assert_eq!(json["total_count"], 0);
    assert!(!home.path().join("db/reports.db").exists());
}

#[test]
fn test_cli_print_config() {
    let home = TempDir::new().unwrap();
    let config = write_config(home.path());

    let output = run_with_config(&config, &["--print-config"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("sqlite://db/reports.db"));
    assert!(stdout.contains("default_page_size"));
}

#[test]
fn test_cli_append_and_get() {
    let home = TempDir::new().unwrap();
    let config = write_config(home.path());
    seed(&config);
    assert!(home.path().join("db/reports.db").exists());

    let json = stdout_json(&run_with_config(
        &config,
        &["get", "--input", "2", "--output", "0"],
    ));
    assert_eq!(json["input_index"], 2);
    assert_eq!(json["output_index"], 0);
    assert_eq!(json["payload"], "02");

    let missing = run_with_config(&config, &["get", "--input", "9", "--output", "9"]);
    assert!(!missing.status.success());
}

#[test]
fn test_cli_count_and_list() {
    let home = TempDir::new().unwrap();
    let config = write_config(home.path());
    seed(&config);

    let json = stdout_json(&run_with_config(&config, &["count"]));
    assert_eq!(json["total_count"], 4);
    let json = stdout_json(&run_with_config(
        &config,
        &["count", "--filter", "InputIndex=0"],
    ));
    assert_eq!(json["total_count"], 2);

    // Configured default page size is 2.
    let page = stdout_json(&run_with_config(&config, &["list"]));
    assert_eq!(page["total_count"], 4);
    let edges = page["edges"].as_array().unwrap();
    assert_eq!(edges.len(), 2);
    assert_eq!(edges[0]["node"]["input_index"], 0);
    assert_eq!(edges[0]["node"]["output_index"], 0);
    assert_eq!(edges[1]["node"]["output_index"], 1);
    assert_eq!(page["page_info"]["has_next_page"], true);
    assert_eq!(page["page_info"]["has_previous_page"], false);

    let end = page["page_info"]["end_cursor"].as_str().unwrap().to_string();
    let next = stdout_json(&run_with_config(
        &config,
        &["list", "--first", "5", "--after", &end],
    ));
    let edges = next["edges"].as_array().unwrap();
    assert_eq!(edges.len(), 2);
    assert_eq!(edges[0]["node"]["input_index"], 1);
    assert_eq!(edges[1]["node"]["input_index"], 2);
    assert_eq!(next["offset"], 2);
    assert_eq!(next["page_info"]["has_next_page"], false);

    let by_input = stdout_json(&run_with_config(&config, &["list", "--input", "0"]));
    assert_eq!(by_input["total_count"], 2);
}

#[test]
fn test_cli_rejects_bad_queries() {
    let home = TempDir::new().unwrap();
    let config = write_config(home.path());

    let out = run_with_config(&config, &["count", "--filter", "Payload=1"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Payload"));

    let out = run_with_config(&config, &["list", "--first", "-1"]);
    assert!(!out.status.success());

    let out = run_with_config(&config, &["list", "--after", "not base64!"]);
    assert!(!out.status.success());
}
