//! Sustainable network throughput as maximum flow.
//!
//! Each block edge carries `60 / clearance minutes` trains per hour. A
//! synthetic supersource feeds the first node of every segment, and the
//! maximum flow from it to the destination is the hourly throughput.
//!
//! Capacities are fractions of an hour, so they are scaled by the least
//! common multiple of all block times before running an integer max-flow.
//! The result is divided back afterwards and is exact. When that multiple
//! is too large for the flow arithmetic, a fixed scale is used instead and
//! each capacity is rounded down to it.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, trace};

use crate::domain::{BlockTimes, DomainError, MINUTES_PER_HOUR, NodeId, TrackSegment};
use crate::graph::{FlowNetwork, max_flow};

/// Capacity units per train per hour when no exact scale fits.
const FALLBACK_SCALE: i128 = 1_000_000_000_000;

/// Maximum trains per hour that can reach `destination`.
///
/// Returns 0 when the destination is not part of any segment or cannot be
/// reached. Every block edge must have a block time.
pub fn network_capacity(
    segments: &[TrackSegment],
    block_times: &BlockTimes,
    destination: NodeId,
) -> Result<f64, DomainError> {
    let edges: BTreeSet<(NodeId, NodeId)> = segments.iter().flat_map(|s| s.edges()).collect();

    let mut minutes: BTreeMap<(NodeId, NodeId), i128> = BTreeMap::new();
    for &(from, to) in &edges {
        let m = block_times
            .get(from, to)
            .ok_or(DomainError::MissingBlockTime(from, to))?;
        if m == 0 {
            return Err(DomainError::InvalidBlockTime(from, to));
        }
        minutes.insert((from, to), i128::from(m));
    }

    let sources: BTreeSet<NodeId> = segments.iter().map(TrackSegment::first).collect();

    let edge_count = minutes.len() + sources.len();
    let (scale, exact) = match exact_scale(minutes.values().copied(), edge_count) {
        Some(scale) => (scale, true),
        None => (FALLBACK_SCALE, false),
    };

    let mut index: BTreeMap<NodeId, usize> = BTreeMap::new();
    for node in segments.iter().flat_map(|s| s.nodes()) {
        let next = index.len();
        index.entry(*node).or_insert(next);
    }
    let supersource = index.len();

    let Some(&sink) = index.get(&destination) else {
        debug!(%destination, "destination not in network");
        return Ok(0.0);
    };

    let mut network = FlowNetwork::new(index.len() + 1);
    let mut total: i128 = 0;
    for (&(from, to), &m) in &minutes {
        let capacity = scaled_capacity(m, scale);
        total += capacity;
        trace!(%from, %to, minutes = %m, capacity = %capacity, "block edge");
        network.add_edge(index[&from], index[&to], capacity);
    }

    // Feeds carry the whole network's capacity so they never bind.
    for source in &sources {
        network.add_edge(supersource, index[source], total);
    }

    let flow = max_flow(&network, supersource, sink);
    let throughput = flow.leaving(supersource) as f64 / scale as f64;

    debug!(
        nodes = index.len(),
        edges = minutes.len(),
        sources = sources.len(),
        scale = %scale,
        exact,
        throughput,
        "network capacity computed"
    );
    Ok(throughput)
}

/// Least common multiple of all block times, if flows in those units stay
/// in range for a network with `edge_count` edges.
fn exact_scale(minutes: impl IntoIterator<Item = i128>, edge_count: usize) -> Option<i128> {
    let scale = minutes.into_iter().try_fold(1, lcm)?;
    let headroom = i128::try_from(edge_count).ok()?.checked_add(1)?;
    i128::from(MINUTES_PER_HOUR)
        .checked_mul(scale)?
        .checked_mul(headroom)?
        .checked_mul(headroom)?;
    Some(scale)
}

/// `60 / minutes` in units of `1 / scale` trains per hour, rounded down.
fn scaled_capacity(minutes: i128, scale: i128) -> i128 {
    i128::from(MINUTES_PER_HOUR) * scale / minutes
}

fn gcd(mut a: i128, mut b: i128) -> i128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Least common multiple of positive values, `None` on overflow.
fn lcm(a: i128, b: i128) -> Option<i128> {
    (a / gcd(a, b)).checked_mul(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(nodes: &[u32]) -> TrackSegment {
        TrackSegment::new(nodes.iter().copied().map(NodeId).collect()).unwrap()
    }

    fn times(entries: &[((u32, u32), u32)]) -> BlockTimes {
        let mut bt = BlockTimes::new();
        for &((a, b), m) in entries {
            bt.insert(NodeId(a), NodeId(b), m).unwrap();
        }
        bt
    }

    #[test]
    fn single_line_bottleneck() {
        let segments = vec![segment(&[1, 2, 3, 4, 99])];
        let bt = times(&[((1, 2), 2), ((2, 3), 2), ((3, 4), 3), ((4, 99), 1)]);

        assert_eq!(network_capacity(&segments, &bt, NodeId(99)), Ok(20.0));
    }

    #[test]
    fn branches_merge_at_destination() {
        // Two feeders joining at 3, then a shared block into 99
        let segments = vec![segment(&[1, 3, 99]), segment(&[2, 3])];
        let bt = times(&[((1, 3), 4), ((2, 3), 6), ((3, 99), 1)]);

        // 15 + 10 arrive at 3, the final block could take 60
        assert_eq!(network_capacity(&segments, &bt, NodeId(99)), Ok(25.0));
    }

    #[test]
    fn shared_final_block_limits_branches() {
        let segments = vec![segment(&[1, 3, 99]), segment(&[2, 3])];
        let bt = times(&[((1, 3), 2), ((2, 3), 2), ((3, 99), 3)]);

        assert_eq!(network_capacity(&segments, &bt, NodeId(99)), Ok(20.0));
    }

    #[test]
    fn fractional_capacity_is_exact() {
        let segments = vec![segment(&[1, 2, 99])];
        let bt = times(&[((1, 2), 7), ((2, 99), 4)]);

        let result = network_capacity(&segments, &bt, NodeId(99)).unwrap();
        assert!((result - 60.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_destination_is_zero() {
        let segments = vec![segment(&[1, 2])];
        let bt = times(&[((1, 2), 2)]);
        assert_eq!(network_capacity(&segments, &bt, NodeId(42)), Ok(0.0));
    }

    #[test]
    fn edges_past_the_destination_are_ignored() {
        // 1 -> 2 -> 3 and 4 -> 2; only flow into 2 counts
        let segments = vec![segment(&[1, 2, 3]), segment(&[4, 2])];
        let bt = times(&[((1, 2), 2), ((2, 3), 6), ((4, 2), 3)]);
        assert_eq!(network_capacity(&segments, &bt, NodeId(2)), Ok(50.0));
        assert_eq!(network_capacity(&segments, &bt, NodeId(3)), Ok(10.0));
    }

    #[test]
    fn no_segments_is_zero() {
        assert_eq!(network_capacity(&[], &BlockTimes::new(), NodeId(1)), Ok(0.0));
    }

    #[test]
    fn missing_block_time_is_an_error() {
        let segments = vec![segment(&[1, 2, 3])];
        let bt = times(&[((1, 2), 2)]);
        assert_eq!(
            network_capacity(&segments, &bt, NodeId(3)),
            Err(DomainError::MissingBlockTime(NodeId(2), NodeId(3)))
        );
    }

    #[test]
    fn zero_block_time_is_an_error() {
        let segments = vec![segment(&[1, 2])];
        let bt: BlockTimes = [((NodeId(1), NodeId(2)), 0)].into_iter().collect();
        assert_eq!(
            network_capacity(&segments, &bt, NodeId(2)),
            Err(DomainError::InvalidBlockTime(NodeId(1), NodeId(2)))
        );
    }

    #[test]
    fn shared_edges_are_counted_once() {
        let segments = vec![segment(&[1, 2, 99]), segment(&[1, 2, 99])];
        let bt = times(&[((1, 2), 3), ((2, 99), 3)]);
        assert_eq!(network_capacity(&segments, &bt, NodeId(99)), Ok(20.0));
    }

    #[test]
    fn lcm_and_gcd() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(lcm(4, 6), Some(12));
        assert_eq!(lcm(1, 7), Some(7));
        assert_eq!(lcm(i128::MAX, i128::MAX - 1), None);
    }

    fn primes_up_to(limit: u32) -> Vec<u32> {
        (2..=limit)
            .filter(|&n| (2..n).take_while(|d| d * d <= n).all(|d| n % d != 0))
            .collect()
    }

    #[test]
    fn many_distinct_block_times_stay_exact() {
        // The block times' common multiple exceeds 64 bits once scaled
        let primes = primes_up_to(47);
        let mut nodes: Vec<u32> = (1..=primes.len() as u32).collect();
        nodes.push(99);
        let segments = vec![segment(&nodes)];
        let entries: Vec<((u32, u32), u32)> = nodes
            .windows(2)
            .zip(&primes)
            .map(|(w, &m)| ((w[0], w[1]), m))
            .collect();
        let bt = times(&entries);

        let result = network_capacity(&segments, &bt, NodeId(99)).unwrap();
        assert!((result - 60.0 / 47.0).abs() < 1e-9);
    }

    #[test]
    fn unscalable_block_times_fall_back_to_rounding() {
        // Large primes whose common multiple overflows 128 bits
        let minutes = [
            999_999_937, 999_999_929, 999_999_893, 999_999_883, 999_999_797,
        ];
        assert_eq!(exact_scale(minutes.iter().map(|&m| i128::from(m)), 6), None);

        let mut nodes: Vec<u32> = (1..=minutes.len() as u32).collect();
        nodes.push(99);
        let segments = vec![segment(&nodes)];
        let entries: Vec<((u32, u32), u32)> = nodes
            .windows(2)
            .zip(&minutes)
            .map(|(w, &m)| ((w[0], w[1]), m))
            .collect();
        let bt = times(&entries);

        let result = network_capacity(&segments, &bt, NodeId(99)).unwrap();
        let expected = 60.0 / 999_999_937.0;
        assert!(result <= expected);
        assert!((result - expected).abs() < 1e-11);
    }

    #[test]
    fn exact_scale_is_the_common_multiple() {
        assert_eq!(exact_scale([2, 3, 4], 3), Some(12));
        assert_eq!(exact_scale([], 0), Some(1));
    }
}
