//! Generic graph primitives used by the reductions.
//!
//! Every graph here works on dense `usize` vertex indices. The reductions
//! keep their own tables mapping domain identifiers to indices, so the
//! primitives know nothing about stations, slots or crew.

mod colouring;
mod distance;
mod flow;
mod matching;

use std::collections::BTreeSet;

pub use colouring::{Colouring, min_colouring};
pub use distance::distance;
pub use flow::{Flow, FlowNetwork, max_flow};
pub use matching::{BipartiteGraph, Matching, max_matching};

/// A simple undirected graph with sorted, de-duplicated adjacency.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndirectedGraph {
    adjacency: Vec<BTreeSet<usize>>,
}

impl UndirectedGraph {
    /// A graph with `vertex_count` isolated vertices.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            adjacency: vec![BTreeSet::new(); vertex_count],
        }
    }

    /// Connect `a` and `b` in both directions. Self-loops are ignored.
    ///
    /// # Panics
    ///
    /// Panics if either vertex is out of range.
    pub fn add_edge(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.adjacency[a].insert(b);
        self.adjacency[b].insert(a);
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Neighbours of `v` in ascending order.
    pub fn neighbours(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency[v].iter().copied()
    }

    pub fn degree(&self, v: usize) -> usize {
        self.adjacency[v].len()
    }

    pub fn are_adjacent(&self, a: usize, b: usize) -> bool {
        self.adjacency
            .get(a)
            .is_some_and(|neighbours| neighbours.contains(&b))
    }
}
