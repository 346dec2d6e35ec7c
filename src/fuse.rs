use crate::coerce::{
    coerce_float, coerce_int, coerce_string, detect_retweet, normalize_created_at, RawValue,
};
use crate::tweet_store::TweetRecord;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// One tweet on a selected path, after fusing the flat-store record with the
/// tree-embedded record. Serializes as an element of a thread's `tweets`
/// list.
#[derive(Debug, Clone, Serialize)]
pub struct FusedTweet {
    pub id: String,
    pub username: String,
    pub created_at: Option<String>,
    pub full_text: String,
    pub favorite_count: i64,
    pub cluster_id: String,
    pub cluster_prob: f64,
    pub is_reply: bool,
    pub is_retweet: bool,
}

fn prefer(store_value: &str, embedded: Option<&RawValue>) -> String {
    if store_value.is_empty() {
        coerce_string(embedded)
    } else {
        store_value.to_string()
    }
}

/// Fuse the two records for one tweet id. Precedence per field: the flat
/// store when it has a usable value, then the coerced embedded value, then
/// the field's zero value. For the numeric fields a store record that exists
/// always wins, even at zero; for strings an empty store value falls through.
pub fn fuse_tweet(
    tweet_id: &str,
    store_record: Option<&TweetRecord>,
    embedded: Option<&FxHashMap<String, RawValue>>,
) -> FusedTweet {
    let field = |name: &str| embedded.and_then(|fields| fields.get(name));

    let (username, created_at, full_text, reply_to, cluster_id, favorite_count, cluster_prob) =
        match store_record {
            Some(record) => (
                prefer(&record.username, field("username")),
                record
                    .created_at
                    .clone()
                    .or_else(|| normalize_created_at(field("created_at"))),
                prefer(&record.full_text, field("full_text")),
                prefer(&record.reply_to_tweet_id, field("reply_to_tweet_id")),
                prefer(&record.cluster_id, field("cluster")),
                record.favorite_count,
                record.cluster_prob,
            ),
            None => (
                coerce_string(field("username")),
                normalize_created_at(field("created_at")),
                coerce_string(field("full_text")),
                coerce_string(field("reply_to_tweet_id")),
                coerce_string(field("cluster")),
                coerce_int(field("favorite_count")),
                coerce_float(field("cluster_prob")),
            ),
        };

    let is_reply = !reply_to.is_empty();
    let is_retweet = detect_retweet(&full_text);

    FusedTweet {
        id: tweet_id.to_string(),
        username,
        created_at,
        full_text,
        favorite_count,
        cluster_id,
        cluster_prob,
        is_reply,
        is_retweet,
    }
}
