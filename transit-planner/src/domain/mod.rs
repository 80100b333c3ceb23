//! Domain types for the transit planner.
//!
//! This module contains the validated input model shared by the
//! reductions. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod crew;
mod error;
mod station;
mod timeslot;
mod track;

pub use crew::{CrewMember, Role, RoleSet, Shift};
pub use error::DomainError;
pub use station::{StationId, StationRow};
pub use timeslot::{LAST_HOUR, Timeslot, sort_timeslots};
pub use track::{BlockTimeEntry, BlockTimes, MINUTES_PER_HOUR, NodeId, TrackSegment};
