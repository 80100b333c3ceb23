//! Track segments and block clearance times.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::DomainError;

/// Minutes in an hour, the numerator of every hourly capacity.
pub const MINUTES_PER_HOUR: u64 = 60;

/// A node in the track network (junction, signal, platform).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered run of nodes; consecutive pairs are directed block edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TrackSegment(Vec<NodeId>);

impl TrackSegment {
    /// Fails on segments shorter than two nodes or with a node repeated
    /// back to back.
    pub fn new(nodes: Vec<NodeId>) -> Result<Self, DomainError> {
        if nodes.len() < 2 {
            return Err(DomainError::ShortSegment(nodes.len()));
        }
        if let Some(pair) = nodes.windows(2).find(|w| w[0] == w[1]) {
            return Err(DomainError::SelfLoop(pair[0]));
        }
        Ok(Self(nodes))
    }

    /// Entry point where trains are fed into the segment.
    pub fn first(&self) -> NodeId {
        self.0[0]
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.0
    }

    /// Directed block edges, in order along the segment.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }
}

impl<'de> Deserialize<'de> for TrackSegment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let nodes = Vec::<NodeId>::deserialize(deserializer)?;
        TrackSegment::new(nodes).map_err(serde::de::Error::custom)
    }
}

/// Clearance time in whole minutes for each directed block edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockTimes {
    minutes: HashMap<(NodeId, NodeId), u32>,
}

impl BlockTimes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the clearance time for `from -> to`. Zero is rejected.
    pub fn insert(&mut self, from: NodeId, to: NodeId, minutes: u32) -> Result<(), DomainError> {
        if minutes == 0 {
            return Err(DomainError::InvalidBlockTime(from, to));
        }
        self.minutes.insert((from, to), minutes);
        Ok(())
    }

    /// Clearance time for an edge, if known.
    pub fn get(&self, from: NodeId, to: NodeId) -> Option<u32> {
        self.minutes.get(&(from, to)).copied()
    }

    /// Trains per hour through an edge: `60 / minutes`.
    pub fn hourly_capacity(&self, from: NodeId, to: NodeId) -> Result<f64, DomainError> {
        self.get(from, to)
            .map(|m| MINUTES_PER_HOUR as f64 / f64::from(m))
            .ok_or(DomainError::MissingBlockTime(from, to))
    }

    pub fn len(&self) -> usize {
        self.minutes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.minutes.is_empty()
    }
}

/// Wire form of one block time entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockTimeEntry {
    pub from: NodeId,
    pub to: NodeId,
    pub minutes: u32,
}

impl<'de> Deserialize<'de> for BlockTimes {
    /// Reads `[{"from": 1, "to": 2, "minutes": 2}, ...]`.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<BlockTimeEntry>::deserialize(deserializer)?;
        let mut times = BlockTimes::new();
        for e in entries {
            times
                .insert(e.from, e.to, e.minutes)
                .map_err(serde::de::Error::custom)?;
        }
        Ok(times)
    }
}

impl FromIterator<((NodeId, NodeId), u32)> for BlockTimes {
    /// Collects without validation; zero entries surface later as
    /// [`DomainError::InvalidBlockTime`] when the network is built.
    fn from_iter<I: IntoIterator<Item = ((NodeId, NodeId), u32)>>(iter: I) -> Self {
        Self {
            minutes: iter.into_iter().collect(),
        }
    }
}
