//! Integration tests for the `novastream` binary
//!
//! Each test points the binary at a temporary library database and a
//! missing config file so the defaults apply.

mod common;

use std::sync::Arc;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use common::generated_video;
use novastream::storage::{SledStore, VideoLibrary};

fn novastream(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("novastream").unwrap();
    cmd.arg("--config")
        .arg(tmp.path().join("missing.yaml"))
        .arg("--storage-path")
        .arg(tmp.path().join("library.db"))
        .env("NOVASTREAM_MEDIA_DIR", tmp.path().join("media"))
        .env("NO_COLOR", "1")
        .env_remove("GEMINI_API_KEY")
        .env_remove("API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

fn seed_library(tmp: &TempDir) {
    let store = SledStore::new_with_path(tmp.path().join("library.db")).unwrap();
    VideoLibrary::new(Arc::new(store))
        .save_video(&generated_video("user-42", "Aurora over fjords"))
        .unwrap();
}

#[test]
fn test_library_list_empty() {
    let tmp = TempDir::new().unwrap();
    novastream(&tmp)
        .args(["library", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Your library is empty."));
}

#[test]
fn test_library_list_json_shows_saved_video() {
    let tmp = TempDir::new().unwrap();
    seed_library(&tmp);

    let output = novastream(&tmp)
        .args(["library", "list", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let videos: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(videos[0]["id"], "user-42");
    assert_eq!(videos[0]["isUserGenerated"], true);
}

#[test]
fn test_library_delete_then_unknown() {
    let tmp = TempDir::new().unwrap();
    seed_library(&tmp);

    novastream(&tmp)
        .args(["library", "delete", "user-42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted video user-42"));

    novastream(&tmp)
        .args(["library", "delete", "user-42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Video not found: user-42"));
}

#[test]
fn test_browse_query_filters_feed() {
    let tmp = TempDir::new().unwrap();
    novastream(&tmp)
        .args(["browse", "--query", "ocean"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deep Ocean Exploration"))
        .stdout(predicate::str::contains("Mountain Retreat").not());
}

#[test]
fn test_browse_lists_library_before_catalog() {
    let tmp = TempDir::new().unwrap();
    seed_library(&tmp);

    let output = novastream(&tmp).arg("browse").output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let generated = stdout.find("Aurora over fjords").expect("library entry missing");
    let catalog = stdout.find("Cyberpunk Cityscape").expect("catalog entry missing");
    assert!(generated < catalog);
}

#[test]
fn test_explore_rejects_unknown_category() {
    let tmp = TempDir::new().unwrap();
    novastream(&tmp)
        .args(["explore", "--category", "Cooking"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown category"));
}

#[test]
fn test_explore_category_shows_matches() {
    let tmp = TempDir::new().unwrap();
    novastream(&tmp)
        .args(["explore", "--category", "nature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mountain Retreat: Cinematic 4K"))
        .stdout(predicate::str::contains("Deep Ocean Exploration").not());
}

#[test]
fn test_play_without_insights() {
    let tmp = TempDir::new().unwrap();
    novastream(&tmp)
        .args(["play", "6", "--no-insights"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deep Ocean Exploration"))
        .stdout(predicate::str::contains("AI Smart Summary").not());
}

#[test]
fn test_play_unknown_id_fails() {
    let tmp = TempDir::new().unwrap();
    novastream(&tmp)
        .args(["play", "nope", "--no-insights"])
        .assert()
        .failure();
}

#[test]
fn test_invalid_config_rejected() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("config.yaml");
    std::fs::write(&config_path, "studio:\n  number_of_videos: 2\n").unwrap();

    Command::cargo_bin("novastream")
        .unwrap()
        .arg("--config")
        .arg(&config_path)
        .arg("--storage-path")
        .arg(tmp.path().join("library.db"))
        .args(["library", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("number_of_videos"));
}
