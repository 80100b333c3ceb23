//! Transit planning by reduction to graph problems.
//!
//! Answers four questions about a rail operation, each by building a
//! graph and running one classic algorithm over it:
//!
//! - how many changes a passenger may need between two line ends;
//! - whether drivers and guards can cover every timetabled slot;
//! - how few trains can work a timetable;
//! - how many trains per hour a branching network can deliver.

pub mod domain;
pub mod graph;
pub mod loading;
pub mod reduce;
pub mod web;
