use crate::coerce::{coerce_float, coerce_int, coerce_string, normalize_created_at, RawValue};
use crate::ThreaderError;
use rustc_hash::FxHashMap;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Canonical per-tweet attributes from the flat dataset, fully coerced.
#[derive(Debug, Clone, PartialEq)]
pub struct TweetRecord {
    pub cluster_id: String,
    pub cluster_prob: f64,
    pub username: String,
    pub created_at: Option<String>,
    pub full_text: String,
    pub favorite_count: i64,
    pub reply_to_tweet_id: String,
}

/// Lookup table keyed by tweet id, built once per invocation and read-only
/// afterwards.
#[derive(Debug, Default)]
pub struct TweetStore {
    records: FxHashMap<String, TweetRecord>,
}

impl TweetStore {
    /// Load the dataset from a JSON Lines file. Only the eight known columns
    /// are read; rows without a usable tweet id are dropped, and later
    /// duplicates overwrite earlier ones. An unreadable or unparsable file is
    /// a dataset error; a readable file with zero rows is an empty store.
    pub fn load(path: &Path) -> Result<TweetStore, ThreaderError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            ThreaderError::Dataset(format!("cannot open {}: {}", path.display(), e))
        })?;

        let mut records = FxHashMap::default();
        for (line_no, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let row: Value = serde_json::from_str(line).map_err(|e| {
                ThreaderError::Dataset(format!("row {} is not valid JSON: {}", line_no + 1, e))
            })?;

            let field = |name: &str| row.get(name).map(RawValue::from_json);

            let tweet_id = coerce_string(field("tweet_id").as_ref());
            if tweet_id.is_empty() {
                continue;
            }

            let record = TweetRecord {
                cluster_id: coerce_string(field("cluster").as_ref()),
                cluster_prob: coerce_float(field("cluster_prob").as_ref()),
                username: coerce_string(field("username").as_ref()),
                created_at: normalize_created_at(field("created_at").as_ref()),
                full_text: coerce_string(field("full_text").as_ref()),
                favorite_count: coerce_int(field("favorite_count").as_ref()),
                reply_to_tweet_id: coerce_string(field("reply_to_tweet_id").as_ref()),
            };
            records.insert(tweet_id, record);
        }

        Ok(TweetStore { records })
    }

    pub fn get(&self, tweet_id: &str) -> Option<&TweetRecord> {
        self.records.get(tweet_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
