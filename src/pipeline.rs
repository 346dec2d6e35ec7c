use crate::forest::{load_forest, merge_forests};
use crate::thread_builder::{build_thread, Thread};
use crate::tweet_store::TweetStore;
use serde_json::json;
use std::path::PathBuf;

pub const TWEETS_FILE: &str = "clustered_tweets.jsonl";
pub const TREES_FILE: &str = "trees.bin";
pub const INCOMPLETE_TREES_FILE: &str = "incomplete_trees.bin";

/// Sentinel reason: the target user has no data directory.
pub const ERR_NOT_FOUND: &str = "not-found";
/// Sentinel reason: the tweet dataset exists but cannot be read or parsed.
pub const ERR_TWEETS_READ: &str = "tweets-read";

/// Explicit invocation parameters; there is no ambient state.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub root_dir: PathBuf,
    pub user: String,
}

impl PipelineConfig {
    pub fn new(root_dir: PathBuf, user: String) -> Self {
        Self { root_dir, user }
    }

    pub fn user_dir(&self) -> PathBuf {
        self.root_dir.join(&self.user)
    }

    pub fn tweets_path(&self) -> PathBuf {
        self.user_dir().join(TWEETS_FILE)
    }

    pub fn trees_path(&self) -> PathBuf {
        self.user_dir().join(TREES_FILE)
    }

    pub fn incomplete_trees_path(&self) -> PathBuf {
        self.user_dir().join(INCOMPLETE_TREES_FILE)
    }
}

/// The single object one invocation emits: a thread list on success (possibly
/// empty), or a sentinel for the few hard failures. Callers treat the absence
/// of `__error__` as success.
#[derive(Debug)]
pub enum Output {
    Threads(Vec<Thread>),
    Error(&'static str),
}

impl Output {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Output::Threads(threads) => json!({ "threads": threads }),
            Output::Error(reason) => json!({ "__error__": reason }),
        }
    }
}

/// Run the whole pipeline for one user: load the tweet store and both
/// forests, merge, build one thread per tree, sort, and wrap the result.
/// Never panics; every failure degrades to an empty value or a sentinel.
pub fn run(config: &PipelineConfig) -> Output {
    if !config.user_dir().is_dir() {
        return Output::Error(ERR_NOT_FOUND);
    }

    let tweets_path = config.tweets_path();
    if !tweets_path.exists() {
        return Output::Threads(Vec::new());
    }

    let store = match TweetStore::load(&tweets_path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("[threader] dataset rejected: {}", e);
            return Output::Error(ERR_TWEETS_READ);
        }
    };
    if store.is_empty() {
        return Output::Threads(Vec::new());
    }
    eprintln!("[threader] loaded {} tweet records", store.len());

    let complete = load_forest(&config.trees_path(), false);
    let incomplete = load_forest(&config.incomplete_trees_path(), true);
    eprintln!(
        "[threader] loaded {} complete and {} incomplete trees",
        complete.len(),
        incomplete.len()
    );

    let forest = merge_forests(complete, incomplete);
    let mut threads: Vec<Thread> = forest
        .iter()
        .filter_map(|tree| build_thread(tree, &store))
        .collect();

    sort_threads(&mut threads);
    eprintln!("[threader] built {} thread(s)", threads.len());

    Output::Threads(threads)
}

/// Order threads by recency: dated threads first, most recent first; undated
/// threads last in their original relative order. The sort is stable and the
/// key is (has a date, the date itself), compared descending.
pub fn sort_threads(threads: &mut [Thread]) {
    threads.sort_by(|a, b| {
        let key_a = (a.root_created_at.is_some(), a.root_created_at.as_deref().unwrap_or(""));
        let key_b = (b.root_created_at.is_some(), b.root_created_at.as_deref().unwrap_or(""));
        key_b.cmp(&key_a)
    });
}
