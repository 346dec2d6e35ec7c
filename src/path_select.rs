use crate::forest::Tree;

/// Pick the single longest root-to-leaf path for a tree.
///
/// Precomputed paths are authoritative when any survive normalization; the
/// explicit-stack traversal over the children relation covers trees without
/// them. Comparison is strict greater-than in both phases, so the first
/// candidate to reach the maximum length wins ties. Degenerates to `[root]`
/// when neither phase finds anything.
pub fn longest_path(tree: &Tree) -> Vec<String> {
    let mut best: Vec<String> = Vec::new();

    // Entries were already coerced and blank-stripped at load; only the root
    // prefix still needs pinning here.
    for path in &tree.paths {
        let mut candidate = path.clone();
        if candidate.first() != Some(&tree.root_id) {
            candidate.insert(0, tree.root_id.clone());
        }
        if candidate.len() > best.len() {
            best = candidate;
        }
    }
    if !best.is_empty() {
        return best;
    }

    // Depth-first over the children relation with an explicit stack; reply
    // chains can be deep enough to make recursion a liability.
    let mut stack: Vec<Vec<String>> = vec![vec![tree.root_id.clone()]];
    while let Some(current) = stack.pop() {
        let Some(node) = current.last() else {
            continue;
        };
        match tree.children.get(node) {
            Some(kids) if !kids.is_empty() => {
                for child in kids {
                    let mut extended = current.clone();
                    extended.push(child.clone());
                    stack.push(extended);
                }
            }
            _ => {
                if current.len() > best.len() {
                    best = current;
                }
            }
        }
    }

    if best.is_empty() {
        vec![tree.root_id.clone()]
    } else {
        best
    }
}
