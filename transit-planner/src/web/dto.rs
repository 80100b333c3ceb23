//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{BlockTimes, CrewMember, NodeId, StationId, StationRow, Timeslot, TrackSegment};
use crate::reduce::{Roster, RosterOutcome, TrainPlan, TransferReport};

/// Request to find the worst-case transfer count.
#[derive(Debug, Deserialize)]
pub struct TransfersRequest {
    /// Connection rows, hub first
    pub rows: Vec<StationRow>,
}

/// Worst-case transfers between terminal stations.
#[derive(Debug, Serialize)]
pub struct TransfersResponse {
    /// Largest transfer count over reachable terminal pairs
    pub max_transfers: usize,

    /// A pair of terminals needing that many transfers
    pub worst_pair: Option<(StationId, StationId)>,

    /// Number of terminal stations
    pub terminals: usize,

    /// Terminal pairs with no path between them
    pub unreachable_pairs: usize,
}

impl From<TransferReport> for TransfersResponse {
    fn from(report: TransferReport) -> Self {
        Self {
            max_transfers: report.max_transfers,
            worst_pair: report.worst_pair,
            terminals: report.terminals.len(),
            unreachable_pairs: report.unreachable_pairs,
        }
    }
}

/// Request to roster drivers and guards.
#[derive(Debug, Deserialize)]
pub struct CrewRequest {
    /// Available crew members
    pub crew: Vec<CrewMember>,

    /// Slots to cover, each needing a driver and a guard
    pub timeslots: Vec<Timeslot>,
}

/// A roster, or the statement that none exists.
#[derive(Debug, Serialize)]
pub struct CrewResponse {
    /// Whether every slot could be covered
    pub feasible: bool,

    /// Driver and guard per slot key, only when feasible
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roster: Option<Roster>,
}

impl From<RosterOutcome> for CrewResponse {
    fn from(outcome: RosterOutcome) -> Self {
        match outcome {
            RosterOutcome::Feasible(roster) => Self {
                feasible: true,
                roster: Some(roster),
            },
            RosterOutcome::Infeasible => Self {
                feasible: false,
                roster: None,
            },
        }
    }
}

/// Request to count trains for a timetable.
#[derive(Debug, Deserialize)]
pub struct TrainsRequest {
    pub timeslots: Vec<Timeslot>,
}

/// Minimum trains and which slots each one works.
#[derive(Debug, Serialize)]
pub struct TrainsResponse {
    pub trains: usize,

    /// Slot keys per train
    pub groups: Vec<Vec<String>>,
}

impl TrainsResponse {
    pub fn from_plan(plan: &TrainPlan, slots: &[Timeslot]) -> Self {
        let groups = plan
            .groups
            .iter()
            .map(|group| group.iter().map(|&i| slots[i].display_key()).collect())
            .collect();

        Self {
            trains: plan.trains,
            groups,
        }
    }
}

/// Request to compute network throughput.
#[derive(Debug, Deserialize)]
pub struct CapacityRequest {
    /// Track segments as node lists
    pub segments: Vec<TrackSegment>,

    /// Clearance minutes per directed block edge
    pub block_times: BlockTimes,

    /// Node the trains must reach
    pub destination: NodeId,
}

/// Sustainable throughput into the destination.
#[derive(Debug, Serialize)]
pub struct CapacityResponse {
    pub trains_per_hour: f64,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crew_request_from_records() {
        let json = r#"{
            "crew": [["Alice", ["Guard", "Driver"], true, "Morning", false]],
            "timeslots": [["IPNA", 6, 9, true]]
        }"#;
        let req: CrewRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.crew.len(), 1);
        assert!(req.timeslots[0].etcs_required());
    }

    #[test]
    fn infeasible_response_omits_roster() {
        let resp = CrewResponse::from(RosterOutcome::Infeasible);
        assert_eq!(
            serde_json::to_string(&resp).unwrap(),
            r#"{"feasible":false}"#
        );
    }

    #[test]
    fn trains_response_uses_slot_keys() {
        let slots = vec![
            Timeslot::new("A", 6, 7).unwrap(),
            Timeslot::new("B", 7, 8).unwrap(),
        ];
        let plan = TrainPlan {
            trains: 2,
            groups: vec![vec![0], vec![1]],
        };
        let resp = TrainsResponse::from_plan(&plan, &slots);
        assert_eq!(resp.groups, vec![vec!["A-6-7"], vec!["B-7-8"]]);
    }

    #[test]
    fn capacity_request_parses() {
        let json = r#"{
            "segments": [[1, 2, 3, 4, 99]],
            "block_times": [
                {"from": 1, "to": 2, "minutes": 2},
                {"from": 2, "to": 3, "minutes": 2},
                {"from": 3, "to": 4, "minutes": 3},
                {"from": 4, "to": 99, "minutes": 1}
            ],
            "destination": 99
        }"#;
        let req: CapacityRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.segments.len(), 1);
        assert_eq!(req.block_times.len(), 4);
        assert_eq!(req.destination, NodeId(99));
    }

    #[test]
    fn transfers_response_from_report() {
        let report = TransferReport {
            max_transfers: 1,
            worst_pair: None,
            terminals: vec![],
            unreachable_pairs: 0,
        };
        let resp = TransfersResponse::from(report);
        assert_eq!(resp.max_transfers, 1);
        assert_eq!(resp.terminals, 0);
    }
}
