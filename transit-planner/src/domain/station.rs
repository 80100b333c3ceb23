//! Station identifiers and connection rows.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::DomainError;

/// An opaque station name.
///
/// Names are trimmed and never blank. Ordering is lexicographic, which
/// gives every set of stations a stable iteration order.
///
/// # Examples
///
/// ```
/// use transit_planner::domain::StationId;
///
/// let central = StationId::parse(" Central ").unwrap();
/// assert_eq!(central.as_str(), "Central");
///
/// assert!(StationId::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    /// Parse a station name, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidStation);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the station name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for StationId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        StationId::parse(&raw).map_err(serde::de::Error::custom)
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One input row: a hub station and the leaf stations it connects to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StationRow {
    hub: StationId,
    leaves: Vec<StationId>,
}

impl StationRow {
    /// Build a row from its stations, hub first.
    ///
    /// Fails if the row does not name at least one leaf.
    pub fn new(stations: Vec<StationId>) -> Result<Self, DomainError> {
        let mut iter = stations.into_iter();
        let hub = iter.next().ok_or(DomainError::InvalidStation)?;
        let leaves: Vec<StationId> = iter.collect();
        if leaves.is_empty() {
            return Err(DomainError::ShortRow(hub));
        }
        Ok(Self { hub, leaves })
    }

    /// Parse a row from raw station names.
    pub fn parse<S: AsRef<str>>(names: &[S]) -> Result<Self, DomainError> {
        let stations = names
            .iter()
            .map(|n| StationId::parse(n.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(stations)
    }

    /// The connecting station of this row.
    pub fn hub(&self) -> &StationId {
        &self.hub
    }

    /// The stations the hub connects to.
    pub fn leaves(&self) -> &[StationId] {
        &self.leaves
    }

    /// All stations in the row, hub first.
    pub fn stations(&self) -> impl Iterator<Item = &StationId> {
        std::iter::once(&self.hub).chain(self.leaves.iter())
    }
}

impl<'de> Deserialize<'de> for StationRow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let stations = Vec::<StationId>::deserialize(deserializer)?;
        StationRow::new(stations).map_err(serde::de::Error::custom)
    }
}
