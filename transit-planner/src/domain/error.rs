//! Domain error types.
//!
//! These errors represent structurally invalid input: rows, records or
//! networks that cannot be turned into a graph. They are distinct from
//! infeasibility, which is a normal outcome carried in return values.

use super::{NodeId, StationId};

/// Domain-level errors for malformed input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Station name is empty or blank
    #[error("invalid station name: must not be blank")]
    InvalidStation,

    /// Connection row has no leaf stations
    #[error("connection row starting at {0} must list at least two stations")]
    ShortRow(StationId),

    /// Timeslot ends before it starts
    #[error("timeslot {line} ends at {end} before it starts at {start}")]
    InvalidTimeslot { line: String, start: u32, end: u32 },

    /// Two different slots share a line and hours
    #[error("timeslot {0} is listed twice with different ETCS requirements")]
    DuplicateTimeslot(String),

    /// Hour range ends before it starts
    #[error("hour range {start}-{end} ends before it starts")]
    InvalidRange { start: u32, end: u32 },

    /// Hour outside 0..=24
    #[error("hour {0} is out of range (0-24)")]
    HourOutOfRange(u32),

    /// Crew record is unusable
    #[error("invalid crew member: {0}")]
    InvalidCrew(String),

    /// Track segment has fewer than two nodes
    #[error("track segment must have at least two nodes, got {0}")]
    ShortSegment(usize),

    /// Track segment repeats a node back to back
    #[error("track segment loops on node {0}")]
    SelfLoop(NodeId),

    /// A block edge has no clearance time
    #[error("no block time for edge {0} -> {1}")]
    MissingBlockTime(NodeId, NodeId),

    /// A block time of zero minutes
    #[error("block time for edge {0} -> {1} must be positive")]
    InvalidBlockTime(NodeId, NodeId),
}
