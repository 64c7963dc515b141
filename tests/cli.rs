//! Integration tests for the CLI surface: flag parsing, exit codes, and the
//! translate pipeline paths that never reach the network.

use assert_cmd::Command;
use predicates::prelude::*;

fn soup_issues() -> Command {
    Command::cargo_bin("soup-issues").unwrap()
}

#[test]
fn help_lists_subcommands() {
    soup_issues()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fetch").and(predicate::str::contains("translate")));
}

#[test]
fn translate_without_api_key_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("issues.csv");
    std::fs::write(&input, "soupId,projectId,title,body\r\n").unwrap();

    soup_issues()
        .env_remove("ANTHROPIC_API_KEY")
        .args([
            "translate",
            "--in",
            input.to_str().unwrap(),
            "--out",
            dir.path().join("out.csv").to_str().unwrap(),
        ])
        .assert()
        .code(2);
}

#[test]
fn translate_missing_input_exits_3() {
    soup_issues()
        .env("ANTHROPIC_API_KEY", "test-key")
        .args(["translate", "--in", "does-not-exist.csv", "--out", "out.csv"])
        .assert()
        .code(3);
}

#[test]
fn translate_missing_required_flags_exits_2() {
    soup_issues().arg("translate").assert().code(2);
}

#[test]
fn translate_header_only_file_succeeds_without_api_calls() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("issues.csv");
    let output = dir.path().join("out.csv");
    std::fs::write(&input, "soupId,projectId,title,body").unwrap();

    soup_issues()
        .env("ANTHROPIC_API_KEY", "test-key")
        .args([
            "translate",
            "--in",
            input.to_str().unwrap(),
            "--out",
            output.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Translated 0 rows"));

    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(written, "soupId,projectId,title,body,titleJa,bodyJa");
}

#[test]
fn translate_empty_content_rows_never_reach_the_api() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("issues.csv");
    let output = dir.path().join("out.csv");
    std::fs::write(&input, "soupId,projectId,title,body\r\nS1,P1,,").unwrap();

    soup_issues()
        .env("ANTHROPIC_API_KEY", "test-key")
        .args([
            "translate",
            "--in",
            input.to_str().unwrap(),
            "--out",
            output.to_str().unwrap(),
            "--newline",
            "lf",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Translated 1 rows"));

    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        written,
        "soupId,projectId,title,body,titleJa,bodyJa\nS1,P1,,,,"
    );
}

#[test]
fn translate_bom_flag_prefixes_the_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("issues.csv");
    let output = dir.path().join("out.csv");
    std::fs::write(&input, "soupId,projectId,title,body").unwrap();

    soup_issues()
        .env("ANTHROPIC_API_KEY", "test-key")
        .args([
            "translate",
            "--in",
            input.to_str().unwrap(),
            "--out",
            output.to_str().unwrap(),
            "--bom",
        ])
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.starts_with('\u{feff}'));
}

#[test]
fn fetch_requires_a_token() {
    soup_issues()
        .env_remove("GITHUB_TOKEN")
        .args([
            "fetch",
            "--owner",
            "acme",
            "--repo",
            "widgets",
            "--soup-id",
            "S1",
            "--project-id",
            "P1",
            "--out",
            "out.csv",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--token"));
}
