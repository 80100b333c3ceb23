//! Maximum flow on integer capacities.

use std::collections::BTreeMap;

use pathfinding::directed::edmonds_karp::edmonds_karp_sparse;

/// Directed network with integer edge capacities.
///
/// Adding the same edge twice adds the capacities together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowNetwork {
    vertex_count: usize,
    capacities: BTreeMap<(usize, usize), i128>,
}

impl FlowNetwork {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            capacities: BTreeMap::new(),
        }
    }

    /// # Panics
    ///
    /// Panics if either endpoint is out of range.
    pub fn add_edge(&mut self, from: usize, to: usize, capacity: i128) {
        assert!(
            from < self.vertex_count && to < self.vertex_count,
            "flow edge endpoint out of range"
        );
        *self.capacities.entry((from, to)).or_insert(0) += capacity;
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn capacity(&self, from: usize, to: usize) -> i128 {
        self.capacities.get(&(from, to)).copied().unwrap_or(0)
    }

    pub fn edges(&self) -> impl Iterator<Item = ((usize, usize), i128)> + '_ {
        self.capacities.iter().map(|(&e, &c)| (e, c))
    }
}

/// A maximum flow: the total value plus the flow on each used edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flow {
    pub value: i128,
    edges: BTreeMap<(usize, usize), i128>,
}

impl Flow {
    /// Flow on one edge (0 if unused).
    pub fn on(&self, from: usize, to: usize) -> i128 {
        self.edges.get(&(from, to)).copied().unwrap_or(0)
    }

    /// Total flow on edges leaving `v`.
    pub fn leaving(&self, v: usize) -> i128 {
        self.edges
            .iter()
            .filter(|((from, _), _)| *from == v)
            .map(|(_, f)| *f)
            .sum()
    }

    /// Total flow on edges entering `v`.
    pub fn entering(&self, v: usize) -> i128 {
        self.edges
            .iter()
            .filter(|((_, to), _)| *to == v)
            .map(|(_, f)| *f)
            .sum()
    }

    pub fn edges(&self) -> impl Iterator<Item = ((usize, usize), i128)> + '_ {
        self.edges.iter().map(|(&e, &f)| (e, f))
    }
}

/// Maximum flow from `source` to `sink` (Edmonds-Karp).
///
/// A degenerate request (same or out-of-range endpoints) carries no flow.
pub fn max_flow(network: &FlowNetwork, source: usize, sink: usize) -> Flow {
    let n = network.vertex_count;
    if source == sink || source >= n || sink >= n {
        return Flow::default();
    }

    let vertices: Vec<usize> = (0..n).collect();
    let (flows, value, _cut) = edmonds_karp_sparse(&vertices, &source, &sink, network.edges());

    let edges = flows
        .into_iter()
        .filter(|(_, f)| *f > 0)
        .collect::<BTreeMap<_, _>>();

    Flow { value, edges }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_path_is_limited_by_bottleneck() {
        let mut net = FlowNetwork::new(4);
        net.add_edge(0, 1, 30);
        net.add_edge(1, 2, 20);
        net.add_edge(2, 3, 60);

        let flow = max_flow(&net, 0, 3);
        assert_eq!(flow.value, 20);
        assert_eq!(flow.leaving(0), 20);
        assert_eq!(flow.entering(3), 20);
        assert_eq!(flow.on(1, 2), 20);
    }

    #[test]
    fn parallel_paths_add_up() {
        let mut net = FlowNetwork::new(4);
        net.add_edge(0, 1, 5);
        net.add_edge(0, 2, 7);
        net.add_edge(1, 3, 10);
        net.add_edge(2, 3, 3);

        let flow = max_flow(&net, 0, 3);
        assert_eq!(flow.value, 8);
    }

    #[test]
    fn unreachable_sink_has_no_flow() {
        let mut net = FlowNetwork::new(3);
        net.add_edge(0, 1, 10);

        let flow = max_flow(&net, 0, 2);
        assert_eq!(flow.value, 0);
        assert_eq!(flow.edges().count(), 0);
    }

    #[test]
    fn duplicate_edges_accumulate() {
        let mut net = FlowNetwork::new(2);
        net.add_edge(0, 1, 4);
        net.add_edge(0, 1, 6);
        assert_eq!(net.capacity(0, 1), 10);
        assert_eq!(max_flow(&net, 0, 1).value, 10);
    }

    #[test]
    fn degenerate_endpoints() {
        let net = FlowNetwork::new(2);
        assert_eq!(max_flow(&net, 1, 1), Flow::default());
        assert_eq!(max_flow(&net, 0, 5), Flow::default());
    }

    #[test]
    fn conservation_at_inner_vertices() {
        let mut net = FlowNetwork::new(5);
        net.add_edge(0, 1, 10);
        net.add_edge(0, 2, 10);
        net.add_edge(1, 3, 4);
        net.add_edge(2, 3, 8);
        net.add_edge(1, 2, 6);
        net.add_edge(3, 4, 15);

        let flow = max_flow(&net, 0, 4);
        assert_eq!(flow.value, 12);
        for v in 1..4 {
            assert_eq!(flow.entering(v), flow.leaving(v), "vertex {v}");
        }
        for ((a, b), f) in flow.edges() {
            assert!(f <= net.capacity(a, b));
        }
    }
}
