//! End-to-end tests for the `blcli` binary

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CONFIG: &str = "\
## Profile
- **Name**: Jane Doe
- **Hero Image**: https://example.com/hero.jpg

## Social Links
- **Twitter**:
  - Icon: //example.com/twitter.png
  - URL: https://twitter.com/janedoe

## Categories
### Work
- **Portfolio**:
  - URL: https://example.com
  - Description: My work
";

fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("config.md");
    fs::write(&path, contents).unwrap();
    path
}

fn blcli() -> Command {
    let mut cmd = Command::cargo_bin("blcli").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn parse_prints_summary() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, CONFIG);

    blcli()
        .arg("parse")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile: 2 field(s)"))
        .stdout(predicate::str::contains("hero_image: https://example.com/hero.jpg"))
        .stdout(predicate::str::contains("[1] Twitter -> https://twitter.com/janedoe"))
        .stdout(predicate::str::contains("[1] Work (1 link(s))"));
}

#[test]
fn parse_json_is_the_document() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, CONFIG);

    let output = blcli()
        .args(["parse", "--json"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["profile"]["name"], "Jane Doe");
    assert_eq!(json["social"][0]["icon"], "https://example.com/twitter.png");
    assert_eq!(json["categories"][0]["links"][0]["description"], "My work");
}

#[test]
fn parse_reads_stdin() {
    blcli()
        .arg("parse")
        .write_stdin("## Social Links\n- **Mail**:\n  - URL: mailto:j@x.io\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mail -> mailto:j@x.io"));
}

#[test]
fn parse_reads_stdin_with_dash() {
    blcli()
        .args(["parse", "-"])
        .write_stdin("### Misc\n- **Orphan**:\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Orphan (no URL)"))
        .stderr(predicate::str::contains("warning: line 2: link `Orphan` has no URL"));
}

#[test]
fn validate_clean_config() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, CONFIG);

    blcli()
        .arg("validate")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Valid: no warnings"));
}

#[test]
fn validate_reports_warnings_and_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "### Work\n- **Blog**:\nnot a field\n");

    blcli()
        .arg("validate")
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid: 2 warning(s) found"))
        .stderr(predicate::str::contains("[missing_url]"))
        .stderr(predicate::str::contains("[unrecognized_line]"));
}

#[test]
fn validate_json_output() {
    let output = blcli()
        .args(["validate", "--json"])
        .write_stdin("## Social Links\n  - URL: https://a.com\n")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["valid"], false);
    assert_eq!(json["warnings"][0]["kind"], "orphan_field");
    assert_eq!(json["warnings"][0]["line"], 2);
}

#[test]
fn stats_counts_incomplete_links() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, CONFIG);

    let output = blcli()
        .args(["stats", "--json"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["social_links"], 1);
    assert_eq!(json["categories"], 1);
    assert_eq!(json["links"], 1);
    assert_eq!(json["missing_url"], 0);
    assert_eq!(json["missing_icon"], 1);
}

#[test]
fn no_bare_urls_flag() {
    let input = "### Work\n- **Site**:\nhttps://site.dev\n";

    blcli()
        .args(["parse", "--no-bare-urls"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Site (no URL)"));

    blcli()
        .arg("parse")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Site -> https://site.dev"));
}

#[test]
fn missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();

    blcli()
        .arg("parse")
        .arg(dir.path().join("nope.md"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to read"));
}
