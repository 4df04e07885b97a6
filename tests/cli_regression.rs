// Regression tests for the ash binary: JSON output, line handling and miette
// diagnostics on error.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

fn write_temp(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("ash-{}-{}", std::process::id(), name));
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn cli_parse_prints_json_tree() {
    let mut cmd = Command::cargo_bin("ash").unwrap();
    cmd.args(["parse", "--compact", "shi vene"]);
    cmd.assert().success().stdout(
        contains(r#"{"statement":{"subject":{"head":{"noun":"shi","adjectives":[]},"possessors":[]}"#)
            .and(contains(r#""verb_phrase":{"verb":"vene","adjuncts":[]}"#)),
    );
}

#[test]
fn cli_reports_miette_diagnostics_on_error() {
    let mut cmd = Command::cargo_bin("ash").unwrap();
    cmd.args(["parse", "shi vene $$$"]);
    cmd.assert()
        .failure()
        .stderr(contains("ash::parse::trailing_input").and(contains("end of input")));
}

#[test]
fn cli_file_skips_comments_and_blank_lines() {
    let file = write_temp(
        "file.ash",
        "# I know you\nshi vene shae\n\n# Do it\nvese ses\n",
    );

    let mut cmd = Command::cargo_bin("ash").unwrap();
    cmd.arg("file").arg(&file).arg("--compact");
    let output = cmd.assert().success().get_output().stdout.clone();
    let text = String::from_utf8(output).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with(r#"{"statement""#));
    assert!(lines[1].starts_with(r#"{"command""#));

    let _ = fs::remove_file(file);
}

#[test]
fn cli_file_fails_when_a_line_fails() {
    let file = write_temp("broken.ash", "shi vene\nshi vene kun shae\n");

    let mut cmd = Command::cargo_bin("ash").unwrap();
    cmd.arg("file").arg(&file);
    cmd.assert()
        .failure()
        .stderr(contains("broken.ash:2"));

    let _ = fs::remove_file(file);
}

#[test]
fn cli_check_summarizes() {
    let file = write_temp("check.ash", "shi vene\nka shae vesem ses\nshi\n");

    let mut cmd = Command::cargo_bin("ash").unwrap();
    cmd.arg("check").arg(&file);
    cmd.assert()
        .failure()
        .stdout(contains("Passed: 2 sentences").and(contains("Failed: 1 sentences")));

    let _ = fs::remove_file(file);
}

#[test]
fn cli_missing_file_is_reported() {
    let mut cmd = Command::cargo_bin("ash").unwrap();
    cmd.args(["check", "definitely/not/here.ash"]);
    cmd.assert().failure().stderr(contains("ash::cli::io"));
}
