use crate::coerce::{coerce_string, RawValue};
use crate::ThreaderError;
use bincode::{Decode, Encode};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use std::fs;
use std::path::Path;

/// On-disk shape of one reply tree. Every container is optional: a forest
/// producer that could not fill one in leaves it out, and the loader degrades
/// the missing piece to empty instead of rejecting the tree.
///
/// Containers are ordered pair sequences, not maps, so the producer's
/// insertion order survives the round trip. The equal-length tie-break in
/// path selection depends on that order.
#[derive(Debug, Clone, Default, Encode, Decode)]
pub struct RawTree {
    /// tweet id -> embedded record fields, loosely typed
    pub tweets: Option<Vec<(String, Vec<(String, RawValue)>)>>,
    /// parent id -> ordered child ids
    pub children: Option<Vec<(String, Vec<RawValue>)>>,
    /// leaf id -> precomputed root-to-leaf path
    pub paths: Option<Vec<(String, Vec<RawValue>)>>,
}

/// A reply tree in strict internal form, ready for path selection.
#[derive(Debug, Clone)]
pub struct Tree {
    pub root_id: String,
    pub tweets: FxHashMap<String, FxHashMap<String, RawValue>>,
    pub children: FxHashMap<String, SmallVec<[String; 4]>>,
    /// Precomputed root-to-leaf path candidates, normalized, in file order.
    pub paths: Vec<Vec<String>>,
    pub incomplete: bool,
}

fn decode_forest(path: &Path) -> Result<Vec<(String, RawTree)>, ThreaderError> {
    let bytes = fs::read(path)?;
    let (forest, _) = bincode::decode_from_slice(&bytes, bincode::config::standard())?;
    Ok(forest)
}

/// Load one serialized forest. A missing file is an empty forest; an
/// undecodable file is logged and also degrades to empty. Entries with a
/// blank root id are skipped.
pub fn load_forest(path: &Path, incomplete: bool) -> Vec<Tree> {
    let entries = match decode_forest(path) {
        Ok(entries) => entries,
        Err(ThreaderError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
        Err(e) => {
            eprintln!(
                "[threader] discarding unreadable forest {}: {}",
                path.display(),
                e
            );
            Vec::new()
        }
    };

    entries
        .into_iter()
        .filter_map(|(key, raw)| {
            let root_id = key.trim().to_string();
            if root_id.is_empty() {
                None
            } else {
                Some(normalize_tree(root_id, raw, incomplete))
            }
        })
        .collect()
}

/// Convert a raw tree into the strict internal shape: ids coerced to strings,
/// blank ids and empty containers dropped, path order preserved.
fn normalize_tree(root_id: String, raw: RawTree, incomplete: bool) -> Tree {
    let mut tweets = FxHashMap::default();
    for (id, fields) in raw.tweets.unwrap_or_default() {
        let tweet_id = id.trim().to_string();
        if tweet_id.is_empty() {
            continue;
        }
        tweets.insert(tweet_id, fields.into_iter().collect());
    }

    let mut children = FxHashMap::default();
    for (parent, child_list) in raw.children.unwrap_or_default() {
        let parent_id = parent.trim().to_string();
        if parent_id.is_empty() {
            continue;
        }
        let bucket: SmallVec<[String; 4]> = child_list
            .iter()
            .map(|child| coerce_string(Some(child)))
            .filter(|id| !id.is_empty())
            .collect();
        if !bucket.is_empty() {
            children.insert(parent_id, bucket);
        }
    }

    let mut paths = Vec::new();
    for (_leaf, path) in raw.paths.unwrap_or_default() {
        let normalized: Vec<String> = path
            .iter()
            .map(|entry| coerce_string(Some(entry)))
            .filter(|id| !id.is_empty())
            .collect();
        if !normalized.is_empty() {
            paths.push(normalized);
        }
    }

    Tree {
        root_id,
        tweets,
        children,
        paths,
        incomplete,
    }
}

/// Merge the two forests into one root-keyed sequence. Complete trees are
/// inserted first; an incomplete tree is only kept when its root was not
/// already seen. Insertion order is preserved end to end.
pub fn merge_forests(complete: Vec<Tree>, incomplete: Vec<Tree>) -> Vec<Tree> {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut merged = Vec::with_capacity(complete.len() + incomplete.len());
    for tree in complete.into_iter().chain(incomplete) {
        if seen.insert(tree.root_id.clone()) {
            merged.push(tree);
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_forest(entries: &Vec<(String, RawTree)>) -> Vec<u8> {
        bincode::encode_to_vec(entries, bincode::config::standard()).unwrap()
    }

    fn tree_with_root(root_id: &str) -> Tree {
        normalize_tree(root_id.to_string(), RawTree::default(), false)
    }

    #[test]
    fn test_load_missing_file_is_empty_forest() {
        let dir = tempfile::tempdir().unwrap();
        let forest = load_forest(&dir.path().join("trees.bin"), false);
        assert!(forest.is_empty());
    }

    #[test]
    fn test_load_corrupt_file_is_empty_forest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trees.bin");
        fs::write(&path, b"definitely not bincode").unwrap();
        let forest = load_forest(&path, false);
        assert!(forest.is_empty());
    }

    #[test]
    fn test_load_round_trip_and_flagging() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("incomplete_trees.bin");
        let entries = vec![(
            "r1".to_string(),
            RawTree {
                tweets: Some(vec![(
                    "r1".to_string(),
                    vec![("username".to_string(), RawValue::Str("alice".into()))],
                )]),
                children: Some(vec![(
                    "r1".to_string(),
                    vec![RawValue::Str("a".into()), RawValue::Int(17)],
                )]),
                paths: None,
            },
        )];
        fs::write(&path, encode_forest(&entries)).unwrap();

        let forest = load_forest(&path, true);
        assert_eq!(forest.len(), 1);
        let tree = &forest[0];
        assert!(tree.incomplete);
        assert_eq!(tree.root_id, "r1");
        assert_eq!(
            tree.tweets["r1"]["username"],
            RawValue::Str("alice".into())
        );
        // numeric child ids coerce to strings
        assert_eq!(tree.children["r1"].to_vec(), vec!["a", "17"]);
    }

    #[test]
    fn test_load_skips_blank_roots_and_empty_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trees.bin");
        let entries = vec![
            ("  ".to_string(), RawTree::default()),
            (
                "r2".to_string(),
                RawTree {
                    tweets: None,
                    children: Some(vec![(
                        "r2".to_string(),
                        vec![RawValue::Str("".into()), RawValue::Null],
                    )]),
                    paths: Some(vec![("x".to_string(), vec![RawValue::Str(" ".into())])]),
                },
            ),
        ];
        fs::write(&path, encode_forest(&entries)).unwrap();

        let forest = load_forest(&path, false);
        assert_eq!(forest.len(), 1);
        let tree = &forest[0];
        // buckets and paths that normalize to nothing are dropped entirely
        assert!(tree.children.is_empty());
        assert!(tree.paths.is_empty());
    }

    #[test]
    fn test_normalize_preserves_path_order() {
        let raw = RawTree {
            tweets: None,
            children: None,
            paths: Some(vec![
                ("a".to_string(), vec![RawValue::Str("r".into()), RawValue::Str("a".into())]),
                ("b".to_string(), vec![RawValue::Str("r".into()), RawValue::Str("b".into())]),
            ]),
        };
        let tree = normalize_tree("r".to_string(), raw, false);
        assert_eq!(tree.paths, vec![vec!["r", "a"], vec!["r", "b"]]);
    }

    #[test]
    fn test_merge_complete_wins_on_collision() {
        let mut shared_complete = tree_with_root("shared");
        shared_complete.incomplete = false;
        let mut shared_incomplete = tree_with_root("shared");
        shared_incomplete.incomplete = true;

        let merged = merge_forests(
            vec![shared_complete, tree_with_root("only-complete")],
            vec![shared_incomplete, {
                let mut t = tree_with_root("only-incomplete");
                t.incomplete = true;
                t
            }],
        );

        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].root_id, "shared");
        assert!(!merged[0].incomplete);
        assert_eq!(merged[1].root_id, "only-complete");
        assert_eq!(merged[2].root_id, "only-incomplete");
        assert!(merged[2].incomplete);
    }
}
