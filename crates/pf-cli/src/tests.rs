use super::*;

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use pf_test_fixtures::{fixture_dir, messages_path};

fn temp_path(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time should be monotonic")
        .as_nanos();
    std::env::temp_dir().join(format!("pf-cli-{}-{}", name, nanos))
}

fn run_args(args: &[&str]) -> i32 {
    run_cli_from_args(std::iter::once("pretty-formatter").chain(args.iter().copied()))
}

fn fixture_messages(name: &str) -> String {
    messages_path(name).to_string_lossy().to_string()
}

#[test]
fn render_and_summary_succeed_on_recorded_fixture() {
    let input = fixture_messages("01-passed-and-failed");
    assert_eq!(run_args(&["render", "--input", &input, "--no-color"]), 0);
    assert_eq!(
        run_args(&["render", "--input", &input, "--format", "ndjson"]),
        0
    );
    assert_eq!(run_args(&["summary", "--input", &input]), 0);
}

#[test]
fn render_reads_console_config_file() {
    let config = temp_path("config.json");
    fs::write(&config, r#"{"console":{"showLogs":true,"color":false}}"#)
        .expect("config should be written");
    let input = fixture_messages("03-background-rule-attachments");
    assert_eq!(
        run_args(&[
            "render",
            "--input",
            &input,
            "--config",
            config.to_string_lossy().as_ref(),
        ]),
        0
    );
}

#[test]
fn input_errors_exit_with_failure() {
    let missing = temp_path("missing.ndjson");
    assert_eq!(
        run_args(&["render", "--input", missing.to_string_lossy().as_ref()]),
        1
    );

    let directory = fixture_dir("01-passed-and-failed");
    let error = open_input(directory.to_str()).err().expect("directory should fail");
    assert_eq!(error.code, "CLI_INPUT_NOT_FILE");
}

#[test]
fn invalid_config_exits_with_failure() {
    let config = temp_path("bad-config.json");
    fs::write(&config, "{console").expect("config should be written");
    let input = fixture_messages("01-passed-and-failed");
    assert_eq!(
        run_args(&[
            "render",
            "--input",
            &input,
            "--config",
            config.to_string_lossy().as_ref(),
        ]),
        1
    );
}

#[test]
fn protocol_violations_exit_with_failure() {
    let input = temp_path("out-of-order.ndjson");
    fs::write(
        &input,
        "{\"testCase\":{\"id\":\"tc1\",\"pickleId\":\"p1\",\"testSteps\":[]}}\n",
    )
    .expect("input should be written");
    assert_eq!(
        run_args(&["render", "--input", input.to_string_lossy().as_ref()]),
        1
    );
}

#[test]
fn summary_requires_run_finished() {
    let input = temp_path("unfinished.ndjson");
    let unfinished = fs::read_to_string(messages_path("01-passed-and-failed"))
        .expect("fixture should be readable")
        .lines()
        .filter(|line| !line.contains("testRunFinished"))
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(&input, unfinished).expect("input should be written");

    let path = input.to_string_lossy().to_string();
    assert_eq!(run_args(&["summary", "--input", &path]), 1);
    assert_eq!(run_args(&["render", "--input", &path, "--no-color"]), 0);
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    assert_eq!(run_args(&["explode"]), 2);
}
