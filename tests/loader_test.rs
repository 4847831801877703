//! Tests for TrieLoader against the real filesystem

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use trieviz::application::services::TrieLoader;
use trieviz::application::ApplicationError;
use trieviz::domain::TrieMetadata;
use trieviz::infrastructure::traits::RealFileSystem;
use trieviz::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn write_trie(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write trie file");
    path
}

fn loader() -> TrieLoader {
    TrieLoader::new(Arc::new(RealFileSystem))
}

#[test]
fn given_trie_file_when_loading_then_returns_root_and_metadata() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = write_trie(
        &temp,
        "trie.json",
        r#"{"totalUnique": 10, "threshold": 0.05, "root": {"id": 0, "label": "", "isEnd": false,
            "count": 10, "children": {"a": {"id": 1, "label": "a", "isEnd": true, "count": 1,
            "children": {}}}}}"#,
    );

    // Act
    let loaded = loader().load(&path).unwrap();

    // Assert
    assert_eq!(loaded.metadata, TrieMetadata::new(10, 0.05));
    assert_eq!(loaded.root.children.len(), 1);
    assert_eq!(loaded.root.children["a"].count, 1);
}

#[test]
fn given_nonexistent_path_when_loading_then_file_not_found() {
    let result = loader().load(&PathBuf::from("/nonexistent/trie.json"));

    assert!(matches!(result, Err(ApplicationError::FileNotFound(_))));
}

#[test]
fn given_directory_when_loading_then_file_not_found() {
    let temp = TempDir::new().unwrap();

    let result = loader().load(temp.path());

    assert!(matches!(result, Err(ApplicationError::FileNotFound(_))));
}

#[test]
fn given_document_without_root_when_loading_then_missing_root() {
    let temp = TempDir::new().unwrap();
    let path = write_trie(&temp, "trie.json", r#"{"totalUnique": 3, "threshold": 0.1}"#);

    let result = loader().load(&path);

    match result {
        Err(ApplicationError::MissingRoot(p)) => assert_eq!(p, path),
        other => panic!("expected MissingRoot, got {other:?}"),
    }
}

#[test]
fn given_truncated_json_when_loading_then_malformed_input() {
    let temp = TempDir::new().unwrap();
    let path = write_trie(&temp, "trie.json", r#"{"root": {"id": 0, "children": {"#);

    let result = loader().load(&path);

    assert!(matches!(
        result,
        Err(ApplicationError::MalformedInput { .. })
    ));
}

#[test]
fn given_non_utf8_bytes_when_loading_then_malformed_input() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("trie.json");
    std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

    let result = loader().load(&path);

    assert!(matches!(
        result,
        Err(ApplicationError::MalformedInput { .. })
    ));
}

#[test]
fn given_document_without_metadata_when_loading_then_anomalies_disabled() {
    let temp = TempDir::new().unwrap();
    let path = write_trie(
        &temp,
        "trie.json",
        r#"{"root": {"id": 0, "children": {"a": {"id": 1, "isEnd": true, "count": 0}}}}"#,
    );

    let loaded = loader().load(&path).unwrap();

    assert!(!loaded.metadata.detects_anomalies());
}

#[test]
fn given_hundred_level_trie_when_loading_then_all_levels_kept() {
    let temp = TempDir::new().unwrap();
    let mut json = String::from(r#"{"totalUnique": 1, "threshold": 0.5, "root": "#);
    for id in 0..100 {
        json.push_str(&format!(
            r#"{{"id": {id}, "label": "x", "count": 1, "children": {{"x": "#
        ));
    }
    json.push_str(r#"{"id": 100, "label": "x", "isEnd": true, "count": 1}"#);
    json.push_str(&"}}".repeat(100));
    json.push('}');
    let path = write_trie(&temp, "deep.json", &json);

    let loaded = loader().load(&path).unwrap();

    let mut node = &loaded.root;
    let mut depth = 0;
    while let Some(child) = node.children.get("x") {
        node = child;
        depth += 1;
    }
    assert_eq!(depth, 100);
    assert_eq!(node.id, Some(100));
}
