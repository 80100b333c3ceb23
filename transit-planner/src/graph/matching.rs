//! Maximum-cardinality bipartite matching.
//!
//! Augmenting paths (Kuhn's algorithm). Left vertices are tried in index
//! order and each candidate list is sorted, so the same graph always
//! yields the same matching.

use std::collections::BTreeSet;

/// Bipartite graph with edges from left vertices to right vertices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BipartiteGraph {
    right_count: usize,
    adjacency: Vec<BTreeSet<usize>>,
}

impl BipartiteGraph {
    pub fn new(left_count: usize, right_count: usize) -> Self {
        Self {
            right_count,
            adjacency: vec![BTreeSet::new(); left_count],
        }
    }

    /// # Panics
    ///
    /// Panics if either endpoint is out of range.
    pub fn add_edge(&mut self, left: usize, right: usize) {
        assert!(right < self.right_count, "right vertex out of range");
        self.adjacency[left].insert(right);
    }

    pub fn left_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn right_count(&self) -> usize {
        self.right_count
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(BTreeSet::len).sum()
    }

    pub fn has_edge(&self, left: usize, right: usize) -> bool {
        self.adjacency
            .get(left)
            .is_some_and(|rights| rights.contains(&right))
    }
}

/// A set of left/right pairs with no vertex used twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matching {
    left_to_right: Vec<Option<usize>>,
}

impl Matching {
    /// Number of matched pairs.
    pub fn len(&self) -> usize {
        self.left_to_right.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Right vertex matched to `left`, if any.
    pub fn partner(&self, left: usize) -> Option<usize> {
        self.left_to_right.get(left).copied().flatten()
    }

    /// Whether every left vertex is matched.
    pub fn covers_left(&self) -> bool {
        self.left_to_right.iter().all(Option::is_some)
    }

    /// Matched pairs in left order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.left_to_right
            .iter()
            .enumerate()
            .filter_map(|(l, r)| r.map(|r| (l, r)))
    }
}

/// Compute a maximum matching.
pub fn max_matching(graph: &BipartiteGraph) -> Matching {
    let mut right_to_left: Vec<Option<usize>> = vec![None; graph.right_count];
    let mut left_to_right: Vec<Option<usize>> = vec![None; graph.left_count()];

    for left in 0..graph.left_count() {
        let mut visited = vec![false; graph.right_count];
        augment(graph, left, &mut visited, &mut right_to_left);
    }

    for (right, left) in right_to_left.iter().enumerate() {
        if let Some(left) = left {
            left_to_right[*left] = Some(right);
        }
    }

    Matching { left_to_right }
}

/// Try to match `left`, re-routing earlier matches along an augmenting path.
fn augment(
    graph: &BipartiteGraph,
    left: usize,
    visited: &mut [bool],
    right_to_left: &mut [Option<usize>],
) -> bool {
    for &right in &graph.adjacency[left] {
        if visited[right] {
            continue;
        }
        visited[right] = true;

        let free = match right_to_left[right] {
            None => true,
            Some(other) => augment(graph, other, visited, right_to_left),
        };
        if free {
            right_to_left[right] = Some(left);
            return true;
        }
    }
    false
}
