//! Driver and guard rostering as bipartite matching.
//!
//! Every slot needs one Driver and one Guard. Positions (slot, role) form
//! the left side of a bipartite graph, crew members the right side, and an
//! edge joins each position to every member eligible for it. A roster
//! exists exactly when a maximum matching covers every position.
//!
//! A matching uses each crew member at most once, so nobody can be booked
//! onto two positions, overlapping or not.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::debug;

use super::config::RosterConfig;
use crate::domain::{CrewMember, DomainError, Role, Timeslot, sort_timeslots};
use crate::graph::{BipartiteGraph, max_matching};

/// A role on a particular slot, by index into the sorted slot list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub slot: usize,
    pub role: Role,
}

impl Position {
    /// Dense index used on the left side of the matching graph.
    fn index(&self) -> usize {
        self.slot * Role::ALL.len()
            + match self.role {
                Role::Driver => 0,
                Role::Guard => 1,
            }
    }

    fn from_index(index: usize) -> Self {
        Self {
            slot: index / Role::ALL.len(),
            role: Role::ALL[index % Role::ALL.len()],
        }
    }
}

/// The crew on one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrewPair {
    pub driver: String,
    pub guard: String,
}

/// A complete roster keyed by slot display key (`LINE-start-end`).
pub type Roster = BTreeMap<String, CrewPair>;

/// Result of a rostering attempt.
///
/// Infeasibility is an ordinary answer, not an error: the input was valid
/// but no assignment covers every position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterOutcome {
    Feasible(Roster),
    Infeasible,
}

impl RosterOutcome {
    pub fn is_feasible(&self) -> bool {
        matches!(self, RosterOutcome::Feasible(_))
    }

    /// The roster, if one exists.
    pub fn roster(&self) -> Option<&Roster> {
        match self {
            RosterOutcome::Feasible(roster) => Some(roster),
            RosterOutcome::Infeasible => None,
        }
    }
}

/// Whether `member` may fill `position` on `slot`.
///
/// All of the following must hold:
/// - the role is one of the member's roles;
/// - the slot lies within the member's shift hours;
/// - a peak-restricted member's slot does not overlap a peak block;
/// - an ETCS slot's driver holds ETCS certification.
pub fn is_eligible(
    position: Position,
    member: &CrewMember,
    slot: &Timeslot,
    config: &RosterConfig,
) -> bool {
    if !member.roles().contains(position.role) {
        return false;
    }

    if !config
        .shift_bounds(member.shift())
        .contains(slot.start(), slot.end())
    {
        return false;
    }

    if member.peak_restricted() && config.hits_peak(slot.start(), slot.end()) {
        return false;
    }

    if position.role == Role::Driver && slot.etcs_required() && !member.etcs_certified() {
        return false;
    }

    true
}

/// Assign a driver and a guard to every slot.
///
/// Slots are processed in (end, start, line) order; identical slots are
/// merged. Returns [`RosterOutcome::Infeasible`] unless every position is
/// filled.
pub fn assign_crew(
    crew: &[CrewMember],
    slots: &[Timeslot],
    config: &RosterConfig,
) -> Result<RosterOutcome, DomainError> {
    let slots = prepare_slots(slots)?;

    let mut members: BTreeMap<&str, &CrewMember> = BTreeMap::new();
    for member in crew {
        if members.insert(member.name(), member).is_some() {
            return Err(DomainError::InvalidCrew(format!(
                "{} is listed more than once",
                member.name()
            )));
        }
    }
    let members: Vec<&CrewMember> = members.into_values().collect();

    let position_count = slots.len() * Role::ALL.len();
    let mut graph = BipartiteGraph::new(position_count, members.len());
    for (i, slot) in slots.iter().enumerate() {
        for role in Role::ALL {
            let position = Position { slot: i, role };
            for (right, member) in members.iter().enumerate() {
                if is_eligible(position, member, slot, config) {
                    graph.add_edge(position.index(), right);
                }
            }
        }
    }

    let matching = max_matching(&graph);
    debug!(
        slots = slots.len(),
        crew = members.len(),
        eligible_edges = graph.edge_count(),
        matched = matching.len(),
        "crew matching complete"
    );

    if !matching.covers_left() {
        return Ok(RosterOutcome::Infeasible);
    }

    let mut filled: HashMap<Position, &str> = HashMap::new();
    for (left, right) in matching.pairs() {
        filled.insert(Position::from_index(left), members[right].name());
    }

    let mut roster = Roster::new();
    for (i, slot) in slots.iter().enumerate() {
        let driver = filled.get(&Position {
            slot: i,
            role: Role::Driver,
        });
        let guard = filled.get(&Position {
            slot: i,
            role: Role::Guard,
        });
        let (Some(driver), Some(guard)) = (driver, guard) else {
            return Ok(RosterOutcome::Infeasible);
        };
        roster.insert(
            slot.display_key(),
            CrewPair {
                driver: driver.to_string(),
                guard: guard.to_string(),
            },
        );
    }

    Ok(RosterOutcome::Feasible(roster))
}

/// Sort slots, merge exact duplicates, and reject conflicting duplicates.
fn prepare_slots(slots: &[Timeslot]) -> Result<Vec<Timeslot>, DomainError> {
    let mut sorted = slots.to_vec();
    sort_timeslots(&mut sorted);
    sorted.dedup();

    if let Some(pair) = sorted
        .windows(2)
        .find(|w| w[0].display_key() == w[1].display_key())
    {
        return Err(DomainError::DuplicateTimeslot(pair[0].display_key()));
    }
    Ok(sorted)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{RoleSet, Shift};
    use proptest::prelude::*;

    fn shift() -> impl Strategy<Value = Shift> {
        prop_oneof![Just(Shift::Morning), Just(Shift::Day), Just(Shift::Night)]
    }

    fn crew() -> impl Strategy<Value = Vec<CrewMember>> {
        proptest::collection::vec(
            (any::<bool>(), any::<bool>(), any::<bool>(), shift(), any::<bool>()),
            0..8,
        )
        .prop_map(|records| {
            records
                .into_iter()
                .enumerate()
                .map(|(i, (drives, guards, etcs, shift, peak))| {
                    let mut roles = Vec::new();
                    if drives {
                        roles.push(Role::Driver);
                    }
                    if guards {
                        roles.push(Role::Guard);
                    }
                    CrewMember::new(format!("crew{i}"), RoleSet::from_roles(roles), etcs, shift, peak)
                        .unwrap()
                })
                .collect()
        })
    }

    fn slots() -> impl Strategy<Value = Vec<Timeslot>> {
        proptest::collection::vec((0u32..22, 0u32..4, any::<bool>()), 0..4).prop_map(|raw| {
            raw.into_iter()
                .enumerate()
                .map(|(i, (start, len, etcs))| {
                    Timeslot::with_etcs(format!("L{i}"), start, (start + len).min(24), etcs)
                        .unwrap()
                })
                .collect()
        })
    }

    proptest! {
        /// Every rostered pair is eligible for its slot
        #[test]
        fn roster_respects_eligibility(crew in crew(), slots in slots()) {
            let config = RosterConfig::default();
            if let RosterOutcome::Feasible(roster) = assign_crew(&crew, &slots, &config).unwrap() {
                prop_assert_eq!(roster.len(), slots.len());
                for s in &slots {
                    let crew_pair = &roster[&s.display_key()];
                    let driver = crew.iter().find(|m| m.name() == crew_pair.driver).unwrap();
                    let guard = crew.iter().find(|m| m.name() == crew_pair.guard).unwrap();
                    let driver_ok = is_eligible(Position { slot: 0, role: Role::Driver }, driver, s, &config);
                    let guard_ok = is_eligible(Position { slot: 0, role: Role::Guard }, guard, s, &config);
                    prop_assert!(driver_ok, "{} cannot drive {}", driver.name(), s);
                    prop_assert!(guard_ok, "{} cannot guard {}", guard.name(), s);
                }
            }
        }

        /// Nobody appears twice in a roster
        #[test]
        fn roster_never_double_books(crew in crew(), slots in slots()) {
            let config = RosterConfig::default();
            if let RosterOutcome::Feasible(roster) = assign_crew(&crew, &slots, &config).unwrap() {
                let mut seen = std::collections::HashSet::new();
                for p in roster.values() {
                    prop_assert!(seen.insert(p.driver.clone()));
                    prop_assert!(seen.insert(p.guard.clone()));
                }
            }
        }

        /// Same input, same answer
        #[test]
        fn roster_is_deterministic(crew in crew(), slots in slots()) {
            let config = RosterConfig::default();
            prop_assert_eq!(
                assign_crew(&crew, &slots, &config),
                assign_crew(&crew, &slots, &config)
            );
        }
    }
}
