//! Rostering configuration: shift hours and peak blocks.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{DomainError, LAST_HOUR, Shift};

/// A span of hours `start..=end` as used by shifts and peak blocks.
///
/// Deserialization applies the same checks as [`HourRange::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourRange {
    pub start: u32,
    pub end: u32,
}

impl HourRange {
    pub fn new(start: u32, end: u32) -> Result<Self, DomainError> {
        for hour in [start, end] {
            if hour > LAST_HOUR {
                return Err(DomainError::HourOutOfRange(hour));
            }
        }
        if end < start {
            return Err(DomainError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Whether `start..=end` fits entirely inside this range.
    pub fn contains(&self, start: u32, end: u32) -> bool {
        self.start <= start && end <= self.end
    }

    /// Overlap with `start..end`; touching a boundary does not count.
    pub fn overlaps(&self, start: u32, end: u32) -> bool {
        start < self.end && end > self.start
    }
}

#[derive(Deserialize)]
struct RawHourRange {
    start: u32,
    end: u32,
}

impl<'de> Deserialize<'de> for HourRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawHourRange::deserialize(deserializer)?;
        HourRange::new(raw.start, raw.end).map_err(serde::de::Error::custom)
    }
}

/// Configuration parameters for crew rostering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Hours of the Morning shift.
    pub morning: HourRange,

    /// Hours of the Day shift.
    pub day: HourRange,

    /// Hours of the Night shift.
    pub night: HourRange,

    /// Blocks that peak-restricted crew must not work.
    pub peak_blocks: Vec<HourRange>,
}

impl RosterConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        morning: HourRange,
        day: HourRange,
        night: HourRange,
        peak_blocks: Vec<HourRange>,
    ) -> Self {
        Self {
            morning,
            day,
            night,
            peak_blocks,
        }
    }

    /// Hour bounds of a shift.
    pub fn shift_bounds(&self, shift: Shift) -> HourRange {
        match shift {
            Shift::Morning => self.morning,
            Shift::Day => self.day,
            Shift::Night => self.night,
        }
    }

    /// Whether `start..end` touches the inside of any peak block.
    pub fn hits_peak(&self, start: u32, end: u32) -> bool {
        self.peak_blocks.iter().any(|pb| pb.overlaps(start, end))
    }
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            morning: HourRange { start: 4, end: 12 },
            day: HourRange { start: 9, end: 17 },
            night: HourRange { start: 16, end: 24 },
            peak_blocks: vec![
                HourRange { start: 8, end: 10 },
                HourRange { start: 16, end: 18 },
            ],
        }
    }
}
