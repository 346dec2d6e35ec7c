use crate::forest::Tree;
use crate::fuse::{fuse_tweet, FusedTweet};
use crate::path_select::longest_path;
use crate::tweet_store::TweetStore;
use serde::Serialize;

/// One reconstructed thread: the longest reply chain of one tree plus its
/// aggregate statistics. Built once, immutable afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Thread {
    pub id: String,
    pub cluster_id: String,
    pub is_incomplete: bool,
    pub root_is_reply: bool,
    pub contains_retweet: bool,
    pub total_favorites: i64,
    pub root_created_at: Option<String>,
    pub max_cluster_prob: f64,
    pub tweets: Vec<FusedTweet>,
}

/// Build the thread for one tree: select its longest path, fuse each tweet on
/// it, and accumulate the aggregates in path order. Returns None only when
/// the selected path is somehow empty (the selector guarantees at least the
/// root, so this is a guard, not an expected outcome).
pub fn build_thread(tree: &Tree, store: &TweetStore) -> Option<Thread> {
    let path = longest_path(tree);
    if path.is_empty() {
        return None;
    }

    let mut tweets = Vec::with_capacity(path.len());
    let mut total_favorites: i64 = 0;
    let mut max_cluster_prob: f64 = 0.0;
    let mut cluster_candidate = String::new();
    let mut root_is_reply = false;
    let mut contains_retweet = false;
    let mut root_created_at: Option<String> = None;

    for (index, tweet_id) in path.iter().enumerate() {
        let entry = fuse_tweet(tweet_id, store.get(tweet_id), tree.tweets.get(tweet_id));

        if index == 0 {
            root_is_reply = entry.is_reply;
            root_created_at = entry.created_at.clone();
        }
        if cluster_candidate.is_empty() && !entry.cluster_id.is_empty() {
            cluster_candidate = entry.cluster_id.clone();
        }
        total_favorites += entry.favorite_count;
        // strict comparison from 0.0, so zero-probability entries never win
        if entry.cluster_prob > max_cluster_prob {
            max_cluster_prob = entry.cluster_prob;
        }
        if entry.is_retweet {
            contains_retweet = true;
        }
        tweets.push(entry);
    }

    Some(Thread {
        id: tree.root_id.clone(),
        cluster_id: cluster_candidate,
        is_incomplete: tree.incomplete,
        root_is_reply,
        contains_retweet,
        total_favorites,
        root_created_at,
        max_cluster_prob,
        tweets,
    })
}
