//! Timetable slots.
//!
//! A slot covers whole hours: `("IPNA", 6, 9)` runs in hours 6, 7, 8 and 9,
//! so its occupancy is the half-open interval `[6, 10)`.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::DomainError;

/// Latest hour a slot or shift may reference.
pub const LAST_HOUR: u32 = 24;

/// A timetable slot: one run of a line between two hours.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Timeslot {
    line: String,
    start: u32,
    end: u32,
    etcs_required: bool,
}

impl Timeslot {
    /// Create a slot that does not require ETCS.
    pub fn new(line: impl Into<String>, start: u32, end: u32) -> Result<Self, DomainError> {
        Self::with_etcs(line, start, end, false)
    }

    /// Create a slot with an explicit ETCS requirement.
    pub fn with_etcs(
        line: impl Into<String>,
        start: u32,
        end: u32,
        etcs_required: bool,
    ) -> Result<Self, DomainError> {
        let line = line.into();
        for hour in [start, end] {
            if hour > LAST_HOUR {
                return Err(DomainError::HourOutOfRange(hour));
            }
        }
        if end < start {
            return Err(DomainError::InvalidTimeslot { line, start, end });
        }
        Ok(Self {
            line,
            start,
            end,
            etcs_required,
        })
    }

    /// Line identifier.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// First hour of the slot.
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Last hour of the slot (inclusive).
    pub fn end(&self) -> u32 {
        self.end
    }

    /// Whether the driver of this slot must hold ETCS certification.
    pub fn etcs_required(&self) -> bool {
        self.etcs_required
    }

    /// Deterministic processing order: end, then start, then line.
    pub fn sort_key(&self) -> (u32, u32, &str) {
        (self.end, self.start, &self.line)
    }

    /// Occupied hours as the half-open interval `[start, end + 1)`.
    pub fn occupancy(&self) -> (u32, u32) {
        (self.start, self.end + 1)
    }

    /// Whether two slots need the same train at the same time.
    ///
    /// Symmetric; a slot ending at hour 9 conflicts with one starting at 9
    /// but not with one starting at 10.
    pub fn overlaps(&self, other: &Timeslot) -> bool {
        let (a_start, a_end) = self.occupancy();
        let (b_start, b_end) = other.occupancy();
        a_end > b_start && b_end > a_start
    }

    /// Key used in rosters, e.g. `IPNA-6-9`.
    pub fn display_key(&self) -> String {
        format!("{}-{}-{}", self.line, self.start, self.end)
    }
}

impl fmt::Display for Timeslot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:02}-{:02}", self.line, self.start, self.end)
    }
}

/// Sort slots into their deterministic processing order.
pub fn sort_timeslots(slots: &mut [Timeslot]) {
    slots.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}

/// Wire forms: `["IPNA", 6, 9]`, `["IPNA", 6, 9, true]` or an object.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimeslot {
    Record(String, u32, u32),
    EtcsRecord(String, u32, u32, bool),
    Object {
        line: String,
        start: u32,
        end: u32,
        #[serde(default)]
        etcs_required: bool,
    },
}

impl<'de> Deserialize<'de> for Timeslot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let slot = match RawTimeslot::deserialize(deserializer)? {
            RawTimeslot::Record(line, start, end) => Timeslot::new(line, start, end),
            RawTimeslot::EtcsRecord(line, start, end, etcs) => {
                Timeslot::with_etcs(line, start, end, etcs)
            }
            RawTimeslot::Object {
                line,
                start,
                end,
                etcs_required,
            } => Timeslot::with_etcs(line, start, end, etcs_required),
        };
        slot.map_err(serde::de::Error::custom)
    }
}
