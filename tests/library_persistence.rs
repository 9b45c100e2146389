//! Integration tests for the persisted video library
//!
//! Exercises the sled-backed store across reopen, the stored JSON layout,
//! and the feed/filter built on top of it.

mod common;

use std::sync::Arc;

use common::{create_temp_library, generated_video};
use novastream::catalog::{builtin_catalog, combined_feed, filter_videos};
use novastream::storage::{KeyValueStore, SledStore, VideoLibrary, STORAGE_KEY};
use tempfile::TempDir;

#[test]
fn test_library_survives_reopen() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("library.db");

    {
        let store = SledStore::new_with_path(&db_path).expect("Failed to open store");
        let library = VideoLibrary::new(Arc::new(store));
        library
            .save_video(&generated_video("user-1", "First light"))
            .unwrap();
        library
            .save_video(&generated_video("user-2", "Second wind"))
            .unwrap();
    }

    let store = SledStore::new_with_path(&db_path).expect("Failed to reopen store");
    let videos = VideoLibrary::new(Arc::new(store)).get_videos().unwrap();
    let ids: Vec<_> = videos.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, vec!["user-2", "user-1"]);
}

#[test]
fn test_stored_value_is_camel_case_json_array() {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(SledStore::new_with_path(temp_dir.path().join("library.db")).unwrap());
    let library = VideoLibrary::new(store.clone());
    library
        .save_video(&generated_video("user-7", "Glass city"))
        .unwrap();

    let raw = store.get(STORAGE_KEY).unwrap().expect("library key missing");
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &value.as_array().unwrap()[0];
    assert_eq!(first["id"], "user-7");
    assert_eq!(first["isUserGenerated"], true);
    assert_eq!(first["createdAt"], 1_700_000_000_000i64);
    assert!(first.get("aiInsights").is_none());
}

#[test]
fn test_delete_then_feed_only_has_catalog() {
    let (library, _tmp) = create_temp_library();
    library
        .save_video(&generated_video("user-3", "Ocean at night"))
        .unwrap();

    let feed = combined_feed(&library.get_videos().unwrap(), &builtin_catalog());
    assert_eq!(feed[0].id, "user-3");
    assert_eq!(filter_videos(&feed, "ocean").len(), 2);

    assert!(library.delete_video("user-3").unwrap());
    let feed = combined_feed(&library.get_videos().unwrap(), &builtin_catalog());
    assert_eq!(feed.len(), builtin_catalog().len());
}

#[test]
fn test_filter_matches_title_or_category_case_insensitively() {
    let catalog = builtin_catalog();
    for query in ["", "a", "NATURE", "design", "zzz"] {
        let needle = query.to_lowercase();
        let expected: Vec<_> = catalog
            .iter()
            .filter(|v| {
                v.title.to_lowercase().contains(&needle)
                    || v.category.to_lowercase().contains(&needle)
            })
            .map(|v| v.id.clone())
            .collect();
        let actual: Vec<_> = filter_videos(&catalog, query)
            .into_iter()
            .map(|v| v.id.clone())
            .collect();
        assert_eq!(actual, expected, "query {:?}", query);
    }
    assert_eq!(filter_videos(&catalog, "").len(), catalog.len());
}
