//! Integration tests for the upkeep CLI
//!
//! These run the built binary against temporary repositories, covering the
//! fixture cycle (fetch → checksums → verify) and the task cycle
//! (validate → update).

#[path = "../common/mod.rs"]
#[allow(dead_code)]
mod common;

use assert_cmd::cargo;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

use common::git_repo::TempGitRepo;
use common::http::FixtureServer;

/// Helper function to create an upkeep command
fn upkeep() -> assert_cmd::Command {
    assert_cmd::Command::new(cargo::cargo_bin!("upkeep"))
}

/// Write a manifest listing `media/a.bin` and `media/b.bin`
fn write_manifest(root: &std::path::Path, server: &FixtureServer) {
    let manifest = serde_json::json!({
        "assets": [{ "download_via_script": [
            { "url": server.url("/a.bin"), "path": "media/a.bin" },
            { "url": server.url("/b.bin"), "path": "media/b.bin" }
        ]}]
    });
    fs::create_dir_all(root.join("meta")).unwrap();
    fs::write(root.join("meta/manifest.json"), manifest.to_string()).unwrap();
}

const PLAN: &str = "\
# Roadmap

- [ ] Ship the checkout screen for T-SF03
- [ ] Wire paymentgateway into exporter
- [ ] Translate onboarding copy to Klingon
- [x] Already finished and ticked by hand
TODO: tidy the build scripts
";

fn task_repo() -> TempGitRepo {
    let repo = TempGitRepo::new();
    repo.write_file("src/pay.ts", "export function paymentGateway() {}\n");
    repo.write_file("docs/ROADMAP.md", PLAN);
    repo.commit_all("initial");
    repo.write_file("src/checkout.ts", "export const view = 1;\n");
    repo.commit_all("T-SF03 scaffold");
    repo
}

// =============================================================================
// GENERAL
// =============================================================================

#[test]
fn test_version() {
    upkeep()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("upkeep v{}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn test_version_json() {
    let output = upkeep().args(["--json", "version"]).output().unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_malformed_config_fails() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("upkeep.toml"), "[tasks\n").unwrap();

    upkeep()
        .args(["tasks", "validate"])
        .arg("--root")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}

// =============================================================================
// FIXTURES
// =============================================================================

#[test]
fn test_fixtures_fetch_checksums_verify() {
    let server = FixtureServer::start(&[("/a.bin", "alpha"), ("/b.bin", "bravo")], 0);
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_manifest(root, &server);

    upkeep()
        .args(["fixtures", "fetch"])
        .arg("--root")
        .arg(root)
        .assert()
        .success()
        .stdout(predicate::str::contains("DL: media/a.bin"))
        .stdout(predicate::str::contains("regenerate checksums"));
    assert_eq!(fs::read(root.join("media/a.bin")).unwrap(), b"alpha");

    // Second run finds everything present
    upkeep()
        .args(["fixtures", "fetch"])
        .arg("--root")
        .arg(root)
        .assert()
        .success()
        .stdout(predicate::str::contains("already present: media/b.bin"));
    assert_eq!(server.hits(), 2);

    upkeep()
        .args(["fixtures", "checksums"])
        .arg("--root")
        .arg(root)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 3 entries"));

    let sums = fs::read_to_string(root.join("meta/checksums.sha256")).unwrap();
    let paths: Vec<&str> = sums.lines().filter_map(|l| l.split_once("  ")).map(|(_, p)| p).collect();
    assert_eq!(paths, vec!["media/a.bin", "media/b.bin", "meta/manifest.json"]);

    upkeep()
        .args(["fixtures", "verify"])
        .arg("--root")
        .arg(root)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 file(s) verified"));

    fs::write(root.join("media/a.bin"), b"changed").unwrap();
    upkeep()
        .args(["fixtures", "verify"])
        .arg("--root")
        .arg(root)
        .assert()
        .failure()
        .stdout(predicate::str::contains("MISMATCH"))
        .stdout(predicate::str::contains("media/a.bin"));
}

#[test]
fn test_fixtures_fetch_exhausted_retries_fail() {
    let server = FixtureServer::start(&[("/a.bin", "alpha")], 0);
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_manifest(root, &server);
    fs::write(
        root.join("upkeep.toml"),
        "[fixtures]\nretries = 2\nbackoff_secs = 0\n",
    )
    .unwrap();

    upkeep()
        .args(["fixtures", "fetch"])
        .arg("--root")
        .arg(root)
        .assert()
        .failure()
        .stderr(predicate::str::contains("giving up"));

    // a.bin landed before b.bin failed
    assert!(root.join("media/a.bin").exists());
    assert!(!root.join("media/b.bin").exists());
}

#[test]
fn test_fixtures_fetch_without_manifest_fails() {
    let temp = TempDir::new().unwrap();
    upkeep()
        .args(["fixtures", "fetch"])
        .arg("--root")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("manifest"));
}

#[test]
fn test_fixtures_checksums_custom_dir_and_output() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("assets/sub")).unwrap();
    fs::write(temp.path().join("assets/sub/x.txt"), "x").unwrap();
    fs::write(temp.path().join("assets/pack.zip"), "zip").unwrap();

    upkeep()
        .current_dir(temp.path())
        .args(["--root", ".", "fixtures", "checksums", "--dir", "assets", "--output", "sums.txt"])
        .assert()
        .success();

    let sums = fs::read_to_string(temp.path().join("sums.txt")).unwrap();
    assert_eq!(sums.lines().count(), 1);
    assert!(sums.ends_with("  sub/x.txt\n"));
}

// =============================================================================
// TASKS
// =============================================================================

#[test]
fn test_tasks_validate_then_update() {
    let repo = task_repo();

    upkeep()
        .args(["tasks", "validate"])
        .current_dir(repo.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Total tasks: 4"))
        .stdout(predicate::str::contains("Likely complete: 2"))
        .stdout(predicate::str::contains("docs/ROADMAP.md:3"))
        .stdout(predicate::str::contains("Found in commits"));
    assert!(repo.path().join("task_validation_results.json").exists());

    upkeep()
        .args(["tasks", "update"])
        .current_dir(repo.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Checked off 2 completed tasks"));

    let plan = repo.read_file("docs/ROADMAP.md");
    assert!(plan.contains("- [x] Ship the checkout screen for T-SF03"));
    assert!(plan.contains("- [x] Wire paymentgateway into exporter"));
    assert!(plan.contains("- [ ] Translate onboarding copy to Klingon"));
    assert!(plan.contains("TODO: tidy the build scripts"));

    // Running again is a no-op
    upkeep()
        .args(["tasks", "update"])
        .current_dir(repo.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Checked off 0 completed tasks"));
    assert_eq!(repo.read_file("docs/ROADMAP.md"), plan);
}

#[test]
fn test_tasks_root_is_discovered_from_subdirectory() {
    let repo = task_repo();

    upkeep()
        .args(["tasks", "validate"])
        .current_dir(repo.path().join("docs"))
        .assert()
        .success();

    assert!(repo.path().join("task_validation_results.json").exists());
}

#[test]
fn test_tasks_update_dry_run_leaves_files() {
    let repo = task_repo();
    upkeep().args(["tasks", "validate"]).current_dir(repo.path()).assert().success();

    upkeep()
        .args(["tasks", "update", "--dry-run"])
        .current_dir(repo.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Would update"));

    assert_eq!(repo.read_file("docs/ROADMAP.md"), PLAN);
}

#[test]
fn test_tasks_validate_json() {
    let repo = task_repo();
    let output = upkeep()
        .args(["--json", "tasks", "validate", "--output", "out/results.json"])
        .current_dir(repo.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["total"], 4);
    assert_eq!(json["likely_complete"], 2);
    assert_eq!(json["highlights"][1]["code_evidence"][0], "has_implementation");
    assert!(repo.path().join("out/results.json").exists());
}

#[test]
fn test_tasks_update_without_results_fails() {
    let repo = task_repo();
    upkeep()
        .args(["tasks", "update"])
        .current_dir(repo.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("upkeep tasks validate"));
}

#[test]
fn test_tasks_update_malformed_results_fails() {
    let repo = task_repo();
    repo.write_file("task_validation_results.json", "{not json");
    upkeep()
        .args(["tasks", "update"])
        .current_dir(repo.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot load validation results"));
}
