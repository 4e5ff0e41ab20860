//! Distribution lines and their rotation groups.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Number of lines in the default fleet.
pub const DEFAULT_LINE_COUNT: u32 = 20;

/// Number of lines per rotation group in the default fleet.
pub const LINES_PER_GROUP: u32 = 10;

/// Default line capacity in megawatts.
pub const DEFAULT_CAPACITY_MW: f64 = 10.0;

/// One of the two disjoint rotation groups.
///
/// Groups are serialized as the integers 0 and 1; any other tag is rejected
/// during deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Group {
    /// Group 0: shed on even days since the rotation epoch.
    A,
    /// Group 1: shed on odd days since the rotation epoch.
    B,
}

impl Group {
    /// Both groups, in tag order.
    pub const ALL: [Self; 2] = [Self::A, Self::B];

    /// Numeric tag used in persisted documents and reports.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

impl TryFrom<u8> for Group {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::A),
            1 => Ok(Self::B),
            other => Err(EngineError::InvalidGroup(other)),
        }
    }
}

impl From<Group> for u8 {
    fn from(group: Group) -> Self {
        group.index()
    }
}

/// One controllable distribution line.
///
/// Lines are created once at bootstrap and never deleted; only capacity and
/// the active flag change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub id: u32,
    pub name: String,
    pub group: Group,
    pub capacity_mw: f64,
    pub is_active: bool,
}

impl Line {
    /// Builds the fixed default fleet: ids 1..=20, the first ten in group 0
    /// and the rest in group 1, all active at 10 MW.
    pub fn default_fleet() -> Vec<Self> {
        (1..=DEFAULT_LINE_COUNT)
            .map(|id| Self {
                id,
                name: format!("Line_{id:02}"),
                group: if id <= LINES_PER_GROUP { Group::A } else { Group::B },
                capacity_mw: DEFAULT_CAPACITY_MW,
                is_active: true,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_fleet_is_split_evenly() {
        let fleet = Line::default_fleet();
        assert_eq!(fleet.len(), 20);
        assert!(fleet[..10].iter().all(|l| l.group == Group::A));
        assert!(fleet[10..].iter().all(|l| l.group == Group::B));
        assert!(fleet.iter().all(|l| l.is_active));
    }

    #[test]
    fn default_fleet_names_are_zero_padded() {
        let fleet = Line::default_fleet();
        assert_eq!(fleet[0].name, "Line_01");
        assert_eq!(fleet[19].name, "Line_20");
    }

    #[test]
    fn group_serializes_as_integer() {
        let json = serde_json::to_string(&Group::A).unwrap();
        assert_eq!(json, "0");
        let json = serde_json::to_string(&Group::B).unwrap();
        assert_eq!(json, "1");
    }

    #[test]
    fn group_rejects_out_of_range_tag() {
        let parsed: Result<Group, _> = serde_json::from_str("2");
        assert!(parsed.is_err());
    }

    #[test]
    fn line_serde_uses_camel_case_keys() {
        let line = Line {
            id: 3,
            name: "Line_03".to_string(),
            group: Group::A,
            capacity_mw: 12.5,
            is_active: false,
        };
        let json = serde_json::to_string(&line).unwrap();
        assert!(json.contains("\"capacityMw\":12.5"));
        assert!(json.contains("\"isActive\":false"));
        let parsed: Line = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, line);
    }
}
