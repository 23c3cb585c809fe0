//! Tests for fixture downloads over real HTTP

use std::fs;
use std::time::Duration;

use upkeep::adapters::ReqwestClient;
use upkeep::core::services::fetcher::load_manifest;
use upkeep::core::services::{FetchError, FetchOutcome, Fetcher, RetryPolicy};

use crate::common::TestRepo;
use crate::support::http::FixtureServer;

fn fetcher(max_attempts: u32) -> Fetcher<ReqwestClient> {
    let client = ReqwestClient::new(Duration::from_secs(10)).unwrap();
    Fetcher::new(
        client,
        RetryPolicy {
            max_attempts,
            backoff_step: Duration::ZERO,
        },
    )
}

fn write_manifest(repo: &TestRepo, server: &FixtureServer) {
    let manifest = serde_json::json!({
        "assets": [
            { "name": "images", "download_via_script": [
                { "url": server.url("/a.bin"), "path": "media/a.bin" },
                { "url": server.url("/b.bin"), "path": "media/nested/b.bin" }
            ]},
            { "name": "bundled" }
        ]
    });
    repo.add_file("meta/manifest.json", &manifest.to_string());
}

// =============================================================================
// DOWNLOADS
// =============================================================================

#[test]
fn test_fetch_manifest_downloads_then_skips() {
    let server = FixtureServer::start(&[("/a.bin", "alpha"), ("/b.bin", "bravo")], 0);
    let repo = TestRepo::empty();
    write_manifest(&repo, &server);

    let manifest = load_manifest(&repo.path().join("meta/manifest.json")).unwrap();
    let summary = fetcher(3).fetch_manifest(&manifest, repo.path()).unwrap();

    assert_eq!(summary.downloaded, vec!["media/a.bin", "media/nested/b.bin"]);
    assert!(summary.present.is_empty());
    assert_eq!(fs::read(repo.path().join("media/a.bin")).unwrap(), b"alpha");
    assert_eq!(fs::read(repo.path().join("media/nested/b.bin")).unwrap(), b"bravo");
    assert!(!repo.path().join("media/a.bin.part").exists());
    assert_eq!(server.hits(), 2);

    let again = fetcher(3).fetch_manifest(&manifest, repo.path()).unwrap();
    assert_eq!(again.present.len(), 2);
    assert!(again.downloaded.is_empty());
    assert_eq!(server.hits(), 2, "present files must not be requested");
}

#[test]
fn test_empty_file_is_downloaded_again() {
    let server = FixtureServer::start(&[("/a.bin", "alpha")], 0);
    let repo = TestRepo::empty();
    repo.add_bytes("media/a.bin", b"");

    let outcome = fetcher(1)
        .ensure(&server.url("/a.bin"), &repo.path().join("media/a.bin"))
        .unwrap();

    assert_eq!(
        outcome,
        FetchOutcome::Downloaded {
            bytes: 5,
            attempts: 1
        }
    );
}

// =============================================================================
// RETRY
// =============================================================================

#[test]
fn test_transient_failures_are_retried() {
    let server = FixtureServer::start(&[("/a.bin", "alpha")], 2);
    let repo = TestRepo::empty();

    let outcome = fetcher(3)
        .ensure(&server.url("/a.bin"), &repo.path().join("a.bin"))
        .unwrap();

    assert_eq!(
        outcome,
        FetchOutcome::Downloaded {
            bytes: 5,
            attempts: 3
        }
    );
    assert_eq!(server.hits(), 3);
}

#[test]
fn test_exhausted_retries_fail_and_leave_nothing_behind() {
    let server = FixtureServer::start(&[], 0);
    let repo = TestRepo::empty();
    let dest = repo.path().join("media/missing.bin");

    let err = fetcher(2).ensure(&server.url("/missing.bin"), &dest).unwrap_err();

    assert!(matches!(err, FetchError::Exhausted { attempts: 2, .. }), "{err:?}");
    assert_eq!(server.hits(), 2);
    assert!(!dest.exists());
}

// =============================================================================
// MANIFEST
// =============================================================================

#[test]
fn test_missing_manifest_is_error() {
    let repo = TestRepo::empty();
    let err = load_manifest(&repo.path().join("meta/manifest.json")).unwrap_err();
    assert!(matches!(err, FetchError::ManifestRead { .. }));
}

#[test]
fn test_malformed_manifest_is_error() {
    let repo = TestRepo::empty();
    repo.add_file("meta/manifest.json", "{\"assets\": [");
    let err = load_manifest(&repo.path().join("meta/manifest.json")).unwrap_err();
    assert!(matches!(err, FetchError::ManifestParse { .. }));
}
