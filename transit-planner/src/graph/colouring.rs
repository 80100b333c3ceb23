//! Minimum proper vertex colouring.
//!
//! Exact search: a greedy clique gives a lower bound, a DSatur greedy
//! colouring gives an upper bound, and backtracking (also in DSatur order)
//! tries each colour count in between until one succeeds. Fine for the
//! tens of vertices a timetable produces; exponential in the worst case.

use tracing::trace;

use super::UndirectedGraph;

/// A proper colouring using the fewest colours possible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Colouring {
    /// Number of colours used (the chromatic number).
    pub colours: usize,
    /// Colour of each vertex, in `0..colours`.
    pub assignment: Vec<usize>,
}

impl Colouring {
    /// Vertices grouped by colour, each group in ascending order.
    pub fn classes(&self) -> Vec<Vec<usize>> {
        let mut classes = vec![Vec::new(); self.colours];
        for (v, &c) in self.assignment.iter().enumerate() {
            classes[c].push(v);
        }
        classes
    }

    /// Whether no edge joins two vertices of the same colour.
    pub fn is_proper(&self, graph: &UndirectedGraph) -> bool {
        (0..graph.vertex_count()).all(|v| {
            graph
                .neighbours(v)
                .all(|u| self.assignment[u] != self.assignment[v])
        })
    }
}

/// Colour `graph` with the minimum number of colours.
pub fn min_colouring(graph: &UndirectedGraph) -> Colouring {
    let n = graph.vertex_count();
    if n == 0 {
        return Colouring {
            colours: 0,
            assignment: Vec::new(),
        };
    }

    let upper = dsatur_greedy(graph);
    let lower = greedy_clique_size(graph);
    trace!(vertices = n, lower, upper = upper.colours, "colouring bounds");

    for k in lower..upper.colours {
        let mut assignment = vec![None; n];
        if backtrack(graph, k, &mut assignment, 0, n) {
            return Colouring {
                colours: k,
                assignment: assignment.into_iter().flatten().collect(),
            };
        }
    }
    upper
}

/// Size of a clique found greedily by descending degree.
fn greedy_clique_size(graph: &UndirectedGraph) -> usize {
    let mut order: Vec<usize> = (0..graph.vertex_count()).collect();
    order.sort_by_key(|&v| std::cmp::Reverse(graph.degree(v)));

    let mut clique: Vec<usize> = Vec::new();
    for v in order {
        if clique.iter().all(|&u| graph.are_adjacent(u, v)) {
            clique.push(v);
        }
    }
    clique.len()
}

/// Colours already taken by the neighbours of `v`.
fn neighbour_colours(graph: &UndirectedGraph, assignment: &[Option<usize>], v: usize) -> Vec<usize> {
    let mut colours: Vec<usize> = graph.neighbours(v).filter_map(|u| assignment[u]).collect();
    colours.sort_unstable();
    colours.dedup();
    colours
}

/// Next vertex to colour: highest saturation, then highest degree, then
/// lowest index.
fn select_vertex(graph: &UndirectedGraph, assignment: &[Option<usize>]) -> Option<usize> {
    (0..graph.vertex_count())
        .filter(|&v| assignment[v].is_none())
        .max_by_key(|&v| {
            (
                neighbour_colours(graph, assignment, v).len(),
                graph.degree(v),
                std::cmp::Reverse(v),
            )
        })
}

fn dsatur_greedy(graph: &UndirectedGraph) -> Colouring {
    let n = graph.vertex_count();
    let mut assignment: Vec<Option<usize>> = vec![None; n];
    let mut colours = 0;

    while let Some(v) = select_vertex(graph, &assignment) {
        let taken = neighbour_colours(graph, &assignment, v);
        let colour = (0..).find(|c| taken.binary_search(c).is_err()).unwrap_or(0);
        assignment[v] = Some(colour);
        colours = colours.max(colour + 1);
    }

    Colouring {
        colours,
        assignment: assignment.into_iter().flatten().collect(),
    }
}

/// Try to finish a colouring with at most `k` colours.
///
/// `used` is the number of distinct colours placed so far; new vertices
/// only ever open colour `used`, never a later one, which removes
/// permutations of equivalent colourings.
fn backtrack(
    graph: &UndirectedGraph,
    k: usize,
    assignment: &mut [Option<usize>],
    used: usize,
    remaining: usize,
) -> bool {
    if remaining == 0 {
        return true;
    }
    let Some(v) = select_vertex(graph, assignment) else {
        return true;
    };
    let taken = neighbour_colours(graph, assignment, v);

    for colour in 0..k.min(used + 1) {
        if taken.binary_search(&colour).is_ok() {
            continue;
        }
        assignment[v] = Some(colour);
        if backtrack(graph, k, assignment, used.max(colour + 1), remaining - 1) {
            return true;
        }
        assignment[v] = None;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(n: usize, edges: &[(usize, usize)]) -> UndirectedGraph {
        let mut g = UndirectedGraph::new(n);
        for &(a, b) in edges {
            g.add_edge(a, b);
        }
        g
    }

    #[test]
    fn empty_graph_needs_no_colours() {
        let c = min_colouring(&UndirectedGraph::new(0));
        assert_eq!(c.colours, 0);
        assert!(c.assignment.is_empty());
    }

    #[test]
    fn isolated_vertices_share_one_colour() {
        let c = min_colouring(&graph(4, &[]));
        assert_eq!(c.colours, 1);
        assert_eq!(c.assignment, vec![0, 0, 0, 0]);
    }

    #[test]
    fn path_is_two_colourable() {
        let g = graph(3, &[(0, 2), (1, 2)]);
        let c = min_colouring(&g);
        assert_eq!(c.colours, 2);
        assert!(c.is_proper(&g));
    }

    #[test]
    fn complete_graph_needs_n_colours() {
        let edges: Vec<_> = (0..5)
            .flat_map(|a| (0..5).map(move |b| (a, b)))
            .filter(|(a, b)| a < b)
            .collect();
        let g = graph(5, &edges);
        let c = min_colouring(&g);
        assert_eq!(c.colours, 5);
        assert!(c.is_proper(&g));
    }

    #[test]
    fn odd_cycle_needs_three() {
        let g = graph(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]);
        let c = min_colouring(&g);
        assert_eq!(c.colours, 3);
        assert!(c.is_proper(&g));
    }

    #[test]
    fn classes_partition_vertices() {
        let g = graph(4, &[(0, 1), (2, 3)]);
        let c = min_colouring(&g);
        let classes = c.classes();
        assert_eq!(classes.len(), 2);
        assert_eq!(classes.iter().map(Vec::len).sum::<usize>(), 4);
    }

    /// The crown graph on 8 vertices is bipartite but fools naive greedy
    /// orderings into using more colours.
    #[test]
    fn crown_graph_is_two_colourable() {
        let mut edges = Vec::new();
        for i in 0..4 {
            for j in 0..4 {
                if i != j {
                    edges.push((i, 4 + j));
                }
            }
        }
        let g = graph(8, &edges);
        let c = min_colouring(&g);
        assert_eq!(c.colours, 2);
        assert!(c.is_proper(&g));
    }
}
