//! Transit planning questions reduced to graph problems.
//!
//! Each reduction builds a fresh graph from its input, runs one primitive
//! from [`crate::graph`], and maps the answer back to domain terms:
//!
//! - worst-case transfers between terminals: shortest-path distance
//! - driver/guard roster: maximum bipartite matching
//! - minimum train count: minimum vertex colouring
//! - network throughput: maximum flow

mod capacity;
mod config;
mod crew;
mod trains;
mod transfers;

pub use capacity::network_capacity;
pub use config::{HourRange, RosterConfig};
pub use crew::{CrewPair, Position, Roster, RosterOutcome, assign_crew, is_eligible};
pub use trains::{TrainPlan, conflict_graph, min_trains, train_plan};
pub use transfers::{TransferReport, max_min_transfers, transfer_count, transfer_report};
