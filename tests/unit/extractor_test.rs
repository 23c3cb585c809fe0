//! Tests for markdown task extraction

use upkeep::config::TasksConfig;
use upkeep::core::models::TaskKind;
use upkeep::core::services::extractor::{find_markdown_files, scan_repository};

use crate::common::TestRepo;

// =============================================================================
// DISCOVERY
// =============================================================================

#[test]
fn test_discovery_skips_ignored_and_hidden_dirs() {
    let repo = TestRepo::new();
    repo.add_file("docs/a/inner.md", "# inner\n");
    repo.add_file("docs/notes.txt", "- [ ] not markdown so never scanned\n");

    let files = find_markdown_files(repo.path(), &TasksConfig::default());
    let names: Vec<String> = files
        .iter()
        .map(|p| upkeep::paths::relative_slash(repo.path(), p))
        .collect();

    assert_eq!(names, vec!["README.md", "docs/a/inner.md", "docs/plan.md"]);
}

// =============================================================================
// SCANNING
// =============================================================================

#[test]
fn test_scan_finds_checkbox_and_todo() {
    let repo = TestRepo::new();
    let tasks = scan_repository(repo.path(), &TasksConfig::default());

    assert_eq!(tasks.len(), 2, "{tasks:#?}");

    let checkbox = &tasks[0];
    assert_eq!(checkbox.file, "docs/plan.md");
    assert_eq!(checkbox.line, 3);
    assert_eq!(checkbox.kind, TaskKind::Checkbox);
    assert_eq!(checkbox.text, "- [ ] Implement the login page T-SF03");
    assert_eq!(checkbox.task_id.as_deref(), Some("T-SF03"));

    let todo = &tasks[1];
    assert_eq!(todo.line, 5);
    assert_eq!(todo.kind, TaskKind::Todo);
    assert_eq!(todo.task_id, None);
}

#[test]
fn test_scan_respects_exclusions() {
    let repo = TestRepo::empty();
    repo.add_file("CONTRIBUTING.md", "- [ ] Contributors should sign the CLA\n");
    repo.add_file("docs/CURSOR-WARNINGS-2024.md", "- [ ] Warning list entry that is long\n");
    repo.add_file("docs/AGENTS.md", "TODO: agent instructions\n");
    repo.add_file("docs/real.md", "- [ ] The only real task in this repo\n");

    let tasks = scan_repository(repo.path(), &TasksConfig::default());
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].file, "docs/real.md");
}

#[test]
fn test_scan_filters_noise() {
    let repo = TestRepo::empty();
    repo.add_file(
        "tasks.md",
        "\
- [ ] short one
- [ ] Example rejected input (REJECT: bad)
1. [ ] Numbered item that is long enough
* [ ] Starred item that is long enough too
- [X] Done with an uppercase X marker, TODO cleanup
See todo.md for the TODO list
FIXME the parser drops trailing whitespace
",
    );

    let tasks = scan_repository(repo.path(), &TasksConfig::default());
    let lines: Vec<usize> = tasks.iter().map(|t| t.line).collect();
    assert_eq!(lines, vec![3, 4, 7]);
    assert_eq!(tasks[2].kind, TaskKind::Todo);
}

#[test]
fn test_scan_min_length_is_configurable() {
    let repo = TestRepo::empty();
    repo.add_file("tasks.md", "- [ ] short one\n");

    let config = TasksConfig {
        min_length: 5,
        ..TasksConfig::default()
    };
    assert_eq!(scan_repository(repo.path(), &config).len(), 1);
}

#[test]
fn test_scan_tolerates_invalid_utf8() {
    let repo = TestRepo::empty();
    repo.add_bytes("tasks.md", b"- [ ] Caf\xe9 menu needs translating now\n");

    let tasks = scan_repository(repo.path(), &TasksConfig::default());
    assert_eq!(tasks.len(), 1);
    assert!(tasks[0].text.contains("menu needs translating"));
}
