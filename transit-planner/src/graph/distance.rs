//! Unweighted shortest-path distance.

use pathfinding::directed::bfs::bfs;

use super::UndirectedGraph;

/// Hop count of the shortest path between `a` and `b`.
///
/// Returns `None` when no path exists or either vertex is out of range.
/// The distance from a vertex to itself is 0.
pub fn distance(graph: &UndirectedGraph, a: usize, b: usize) -> Option<usize> {
    let n = graph.vertex_count();
    if a >= n || b >= n {
        return None;
    }
    bfs(&a, |&v| graph.neighbours(v), |&v| v == b).map(|path| path.len() - 1)
}
