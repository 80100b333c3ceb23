//! Minimum train count as conflict-graph colouring.
//!
//! Two slots that overlap in time cannot share a train. Colouring the
//! conflict graph with as few colours as possible gives both the number
//! of trains and, per colour, the slots one train can work in turn.

use tracing::debug;

use crate::domain::Timeslot;
use crate::graph::{UndirectedGraph, min_colouring};

/// Trains needed for a timetable and the slots each one works.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainPlan {
    /// Minimum number of trains.
    pub trains: usize,

    /// For each train, indices into the input slot list in ascending order.
    pub groups: Vec<Vec<usize>>,
}

/// Conflict graph over slot indices, in input order.
pub fn conflict_graph(slots: &[Timeslot]) -> UndirectedGraph {
    let mut graph = UndirectedGraph::new(slots.len());
    for (i, a) in slots.iter().enumerate() {
        for (j, b) in slots.iter().enumerate().skip(i + 1) {
            if a.overlaps(b) {
                graph.add_edge(i, j);
            }
        }
    }
    graph
}

/// Minimum number of trains covering every slot.
pub fn min_trains(slots: &[Timeslot]) -> usize {
    train_plan(slots).trains
}

/// Minimum train count together with a slot grouping that achieves it.
pub fn train_plan(slots: &[Timeslot]) -> TrainPlan {
    let graph = conflict_graph(slots);
    let colouring = min_colouring(&graph);

    debug!(
        slots = slots.len(),
        conflicts = graph.edge_count(),
        trains = colouring.colours,
        "train count computed"
    );

    TrainPlan {
        trains: colouring.colours,
        groups: colouring.classes(),
    }
}
