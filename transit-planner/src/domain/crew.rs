//! Crew members and the roles they can fill.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::DomainError;

/// A position on board a train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    Driver,
    Guard,
}

impl Role {
    /// Every slot needs one of each, in this order.
    pub const ALL: [Role; 2] = [Role::Driver, Role::Guard];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Driver => f.write_str("Driver"),
            Role::Guard => f.write_str("Guard"),
        }
    }
}

/// The set of roles a crew member may fill.
///
/// Always serialized as a list, even with a single role: `["Driver"]`.
/// A bare `"Driver"` string is rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RoleSet {
    driver: bool,
    guard: bool,
}

impl RoleSet {
    /// Build a set from any number of roles.
    pub fn from_roles(roles: impl IntoIterator<Item = Role>) -> Self {
        let mut set = Self::default();
        for role in roles {
            match role {
                Role::Driver => set.driver = true,
                Role::Guard => set.guard = true,
            }
        }
        set
    }

    /// Strict membership test.
    pub fn contains(&self, role: Role) -> bool {
        match role {
            Role::Driver => self.driver,
            Role::Guard => self.guard,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.driver && !self.guard
    }

    /// Roles in the set, drivers first.
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(|r| self.contains(*r))
    }
}

impl Serialize for RoleSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for RoleSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let roles = Vec::<Role>::deserialize(deserializer)?;
        Ok(RoleSet::from_roles(roles))
    }
}

/// Named working shift. Hour bounds come from
/// [`RosterConfig`](crate::reduce::RosterConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shift {
    Morning,
    Day,
    Night,
}

/// A driver and/or guard available for rostering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrewMember {
    name: String,
    roles: RoleSet,
    etcs_certified: bool,
    shift: Shift,
    peak_restricted: bool,
}

impl CrewMember {
    pub fn new(
        name: impl Into<String>,
        roles: RoleSet,
        etcs_certified: bool,
        shift: Shift,
        peak_restricted: bool,
    ) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::InvalidCrew("name must not be blank".into()));
        }
        Ok(Self {
            name,
            roles,
            etcs_certified,
            shift,
            peak_restricted,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn roles(&self) -> RoleSet {
        self.roles
    }

    pub fn etcs_certified(&self) -> bool {
        self.etcs_certified
    }

    pub fn shift(&self) -> Shift {
        self.shift
    }

    /// Whether this member must not work during peak blocks.
    pub fn peak_restricted(&self) -> bool {
        self.peak_restricted
    }
}

/// Wire forms: a 5-field record or an object.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCrewMember {
    Record(String, RoleSet, bool, Shift, bool),
    Object {
        name: String,
        roles: RoleSet,
        #[serde(default)]
        etcs_certified: bool,
        shift: Shift,
        #[serde(default)]
        peak_restricted: bool,
    },
}

impl<'de> Deserialize<'de> for CrewMember {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let member = match RawCrewMember::deserialize(deserializer)? {
            RawCrewMember::Record(name, roles, etcs, shift, peak) => {
                CrewMember::new(name, roles, etcs, shift, peak)
            }
            RawCrewMember::Object {
                name,
                roles,
                etcs_certified,
                shift,
                peak_restricted,
            } => CrewMember::new(name, roles, etcs_certified, shift, peak_restricted),
        };
        member.map_err(serde::de::Error::custom)
    }
}
