//! Worst-case transfers between terminal stations.
//!
//! Each row links a hub to its leaves. Stations that never act as a hub
//! are terminals (line ends, the places passengers start and finish).
//! The answer is the largest number of changes needed between any two
//! terminals, estimating one change every two hops.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, trace};

use crate::domain::{StationId, StationRow};
use crate::graph::{UndirectedGraph, distance};

/// Outcome of a transfer analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferReport {
    /// Largest transfer count over all reachable terminal pairs.
    pub max_transfers: usize,

    /// A terminal pair achieving `max_transfers`, if any pair was reachable.
    pub worst_pair: Option<(StationId, StationId)>,

    /// Terminals considered, in name order.
    pub terminals: Vec<StationId>,

    /// Terminal pairs with no connecting path; excluded from the maximum.
    pub unreachable_pairs: usize,
}

/// Transfers needed to travel `hops` edges: none for a direct link,
/// then one more for every two further hops.
pub fn transfer_count(hops: usize) -> usize {
    hops.saturating_sub(1) / 2
}

/// Largest transfer count between any two terminal stations.
///
/// Returns 0 for no rows, or when fewer than two terminals exist.
pub fn max_min_transfers(rows: &[StationRow]) -> usize {
    transfer_report(rows).max_transfers
}

/// Full transfer analysis over a set of connection rows.
///
/// Duplicate rows are ignored.
pub fn transfer_report(rows: &[StationRow]) -> TransferReport {
    let rows: BTreeSet<&StationRow> = rows.iter().collect();

    let mut index: BTreeMap<&StationId, usize> = BTreeMap::new();
    for station in rows.iter().flat_map(|r| r.stations()) {
        let next = index.len();
        index.entry(station).or_insert(next);
    }

    let mut graph = UndirectedGraph::new(index.len());
    for row in &rows {
        let hub = index[row.hub()];
        for leaf in row.leaves() {
            graph.add_edge(hub, index[leaf]);
        }
    }

    let hubs: BTreeSet<&StationId> = rows.iter().map(|r| r.hub()).collect();
    let terminals: Vec<&StationId> = index
        .keys()
        .copied()
        .filter(|s| !hubs.contains(s))
        .collect();

    debug!(
        rows = rows.len(),
        stations = index.len(),
        edges = graph.edge_count(),
        terminals = terminals.len(),
        "built connection graph"
    );

    let mut report = TransferReport {
        terminals: terminals.iter().map(|s| (*s).clone()).collect(),
        ..TransferReport::default()
    };

    for (i, a) in terminals.iter().enumerate() {
        for b in &terminals[i + 1..] {
            let Some(hops) = distance(&graph, index[a], index[b]) else {
                trace!(from = %a, to = %b, "terminals not connected");
                report.unreachable_pairs += 1;
                continue;
            };
            let transfers = transfer_count(hops);
            if report.worst_pair.is_none() || transfers > report.max_transfers {
                report.max_transfers = transfers;
                report.worst_pair = Some(((*a).clone(), (*b).clone()));
            }
        }
    }

    debug!(
        max_transfers = report.max_transfers,
        unreachable = report.unreachable_pairs,
        "transfer analysis complete"
    );
    report
}
