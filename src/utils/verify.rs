//! Independence and maximality checks for a computed vertex set.
//!
//! Consumers that feed the selected set into coarsening or coloring can
//! assert both properties cheaply; the checks run over a whole-graph
//! adjacency list, so they belong in tests and debug paths rather than in
//! the distributed hot loop.

use std::collections::HashSet;

/// No two members of `selected` are adjacent.
pub fn is_independent(adjacency: &[Vec<usize>], selected: &[usize]) -> bool {
    let members: HashSet<usize> = selected.iter().copied().collect();
    members
        .iter()
        .all(|&v| adjacency[v].iter().all(|n| !members.contains(n)))
}

/// Every vertex outside `selected` has a neighbor inside it.
pub fn is_maximal(adjacency: &[Vec<usize>], selected: &[usize]) -> bool {
    let members: HashSet<usize> = selected.iter().copied().collect();
    (0..adjacency.len())
        .filter(|v| !members.contains(v))
        .all(|v| adjacency[v].iter().any(|n| members.contains(n)))
}

/// Both properties at once: a valid maximal independent set.
pub fn verify_mis(adjacency: &[Vec<usize>], selected: &[usize]) -> bool {
    is_independent(adjacency, selected) && is_maximal(adjacency, selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 5-vertex path 0-1-2-3-4
    fn path() -> Vec<Vec<usize>> {
        vec![vec![1], vec![0, 2], vec![1, 3], vec![2, 4], vec![3]]
    }

    #[test]
    fn accepts_valid_sets() {
        assert!(verify_mis(&path(), &[0, 2, 4]));
        assert!(verify_mis(&path(), &[1, 3]));
        assert!(verify_mis(&path(), &[0, 3]));
    }

    #[test]
    fn rejects_adjacent_members() {
        assert!(!is_independent(&path(), &[1, 2]));
        assert!(!verify_mis(&path(), &[1, 2]));
    }

    #[test]
    fn rejects_non_maximal_sets() {
        assert!(is_independent(&path(), &[1]));
        assert!(!is_maximal(&path(), &[1]));
        assert!(!verify_mis(&path(), &[]));
    }
}
