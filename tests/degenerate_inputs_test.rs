use std::fs;
use threader::forest::RawTree;
use threader::pipeline::{
    self, PipelineConfig, ERR_NOT_FOUND, ERR_TWEETS_READ, INCOMPLETE_TREES_FILE, TREES_FILE,
    TWEETS_FILE,
};

fn config_for(root: &std::path::Path, user: &str) -> PipelineConfig {
    PipelineConfig::new(root.to_path_buf(), user.to_string())
}

#[test]
fn test_missing_user_dir_is_not_found_sentinel() {
    let temp_dir = tempfile::tempdir().unwrap();
    let payload = pipeline::run(&config_for(temp_dir.path(), "nobody")).to_json();
    assert_eq!(payload["__error__"], ERR_NOT_FOUND);
}

#[test]
fn test_missing_dataset_short_circuits_to_empty_threads() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(temp_dir.path().join("alice")).unwrap();

    let payload = pipeline::run(&config_for(temp_dir.path(), "alice")).to_json();
    assert_eq!(payload, serde_json::json!({ "threads": [] }));
}

#[test]
fn test_zero_row_dataset_is_empty_threads_not_an_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    let user_dir = temp_dir.path().join("alice");
    fs::create_dir_all(&user_dir).unwrap();
    fs::write(user_dir.join(TWEETS_FILE), "").unwrap();

    let payload = pipeline::run(&config_for(temp_dir.path(), "alice")).to_json();
    assert_eq!(payload, serde_json::json!({ "threads": [] }));
}

#[test]
fn test_corrupt_dataset_is_tweets_read_sentinel() {
    let temp_dir = tempfile::tempdir().unwrap();
    let user_dir = temp_dir.path().join("alice");
    fs::create_dir_all(&user_dir).unwrap();
    fs::write(user_dir.join(TWEETS_FILE), "{broken json\n").unwrap();

    let payload = pipeline::run(&config_for(temp_dir.path(), "alice")).to_json();
    assert_eq!(payload["__error__"], ERR_TWEETS_READ);
}

#[test]
fn test_corrupt_forest_degrades_to_remaining_forest() {
    let temp_dir = tempfile::tempdir().unwrap();
    let user_dir = temp_dir.path().join("alice");
    fs::create_dir_all(&user_dir).unwrap();

    fs::write(
        user_dir.join(TWEETS_FILE),
        concat!(r#"{"tweet_id": "r1", "created_at": "2024-01-01"}"#, "\n"),
    )
    .unwrap();
    // the complete forest is garbage, the incomplete forest is usable
    fs::write(user_dir.join(TREES_FILE), b"not bincode at all").unwrap();
    let entries = vec![("r1".to_string(), RawTree::default())];
    let bytes = bincode::encode_to_vec(&entries, bincode::config::standard()).unwrap();
    fs::write(user_dir.join(INCOMPLETE_TREES_FILE), bytes).unwrap();

    let payload = pipeline::run(&config_for(temp_dir.path(), "alice")).to_json();
    let threads = payload["threads"].as_array().unwrap();
    assert_eq!(threads.len(), 1);
    assert_eq!(threads[0]["id"], "r1");
    assert_eq!(threads[0]["is_incomplete"], true);
}

#[test]
fn test_no_forest_files_is_empty_threads() {
    let temp_dir = tempfile::tempdir().unwrap();
    let user_dir = temp_dir.path().join("alice");
    fs::create_dir_all(&user_dir).unwrap();
    fs::write(
        user_dir.join(TWEETS_FILE),
        concat!(r#"{"tweet_id": "1"}"#, "\n"),
    )
    .unwrap();

    let payload = pipeline::run(&config_for(temp_dir.path(), "alice")).to_json();
    assert_eq!(payload, serde_json::json!({ "threads": [] }));
}
