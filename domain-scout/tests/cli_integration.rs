// domain-scout/tests/cli_integration.rs

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::{Builder, NamedTempFile, TempDir};

const PUSH_SYNC_CONFIG: &str = r#"{
    "generation": { "min_length": 4, "max_length": 12,
                    "patterns": { "single_word": false } },
    "keyword_categories": {
        "action": { "words": ["push"], "bonus": 10 },
        "object": { "words": ["sync"], "bonus": 5 }
    }
}"#;

/// Helper to create a JSON config file
fn create_config_file(content: &str) -> NamedTempFile {
    let file = Builder::new()
        .suffix(".json")
        .tempfile()
        .expect("Failed to create temp file");
    fs::write(file.path(), content).expect("Failed to write to temp file");
    file
}

fn scout() -> Command {
    let mut cmd = Command::cargo_bin("domain-scout").unwrap();
    cmd.env_remove("DS_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    scout()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("rank"))
        .stdout(predicate::str::contains("pipeline"));
}

#[test]
fn test_check_help_shows_performance_flags() {
    scout()
        .args(["check", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--workers"))
        .stdout(predicate::str::contains("--rate-limit"))
        .stdout(predicate::str::contains("--keep-partial"));
}

#[test]
fn test_generate_prints_qualified_names() {
    let config = create_config_file(PUSH_SYNC_CONFIG);

    scout()
        .args(["generate", "--config"])
        .arg(config.path())
        .assert()
        .success()
        .stdout("pushsync.com\nsyncpush.com\n");
}

#[test]
fn test_generate_csv_writes_bare_names_to_file() {
    let config = create_config_file(PUSH_SYNC_CONFIG);
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("names.csv");

    scout()
        .args(["generate", "--format", "csv", "-c"])
        .arg(config.path())
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("Generated 2 domains"));

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "domain\npushsync\nsyncpush\n"
    );
}

#[test]
fn test_generate_cap_reports_sampling() {
    let config = create_config_file(PUSH_SYNC_CONFIG);

    scout()
        .args(["generate", "-m", "1", "--seed", "7", "-c"])
        .arg(config.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Limited output to 1 domains (generated 2 total)"))
        .stdout(predicate::str::contains(".com").count(1));
}

#[test]
fn test_missing_config_file_is_fatal() {
    scout()
        .args(["generate", "--config", "definitely-missing-config.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_rank_writes_ranked_csv() {
    let config = create_config_file("{}");
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("available_domains.csv");
    let output = dir.path().join("ranked.csv");
    fs::write(
        &input,
        "Domain,Available,Status\nsynclink.com,true,AVAILABLE\ngoogle.com,false,TAKEN\nsync.com,true,AVAILABLE\n",
    )
    .unwrap();

    scout()
        .arg("rank")
        .arg("-c")
        .arg(config.path())
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("synclink.com"))
        .stdout(predicate::str::contains("google.com").not());

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "Domain,Score,Syllables,Length\nsync.com,112,1,4\nsynclink.com,84,2,8\n"
    );
}

#[test]
fn test_rank_quiet_and_keywords() {
    let config = create_config_file("{}");
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("list.txt");
    let output = dir.path().join("ranked.csv");
    fs::write(&input, "domain\nsync.com\nsynclink.com\n").unwrap();

    scout()
        .args(["rank", "-q", "-k", "link", "--keyword-bonus", "40", "-c"])
        .arg(config.path())
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let ranked = fs::read_to_string(&output).unwrap();
    assert!(ranked.starts_with("Domain,Score,Syllables,Length\nsynclink.com,124,2,8\nsync.com,112,"));
}

#[test]
fn test_rank_missing_input_fails() {
    let config = create_config_file("{}");
    let dir = TempDir::new().unwrap();

    scout()
        .args(["rank", "-c"])
        .arg(config.path())
        .arg("-i")
        .arg(dir.path().join("nothing.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_check_without_domains_fails() {
    scout()
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "You must specify domain names or a file",
        ));
}

#[test]
fn test_check_rejects_bad_worker_count() {
    scout()
        .args(["check", "example.com", "--workers", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Workers must be between 1 and 100"));
}

#[test]
fn test_check_empty_domain_file_fails() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("domains.txt");
    fs::write(&file, "# nothing here\n\n").unwrap();

    scout()
        .arg("check")
        .arg("-f")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No domains to check"));
}

#[test]
fn test_check_validate_drops_malformed_domains() {
    scout()
        .args(["check", "bad_name", "--validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Validated 0 domains"))
        .stderr(predicate::str::contains("Invalid domain format: bad_name.com"))
        .stderr(predicate::str::contains("No domains to check"));
}
