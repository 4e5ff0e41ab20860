//! Historical shedding records and their time slots.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Daily window during which shedding may occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    Morning,
    Evening,
}

impl TimeSlot {
    /// String tag used in persisted documents.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Evening => "evening",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TimeSlot {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" => Ok(Self::Morning),
            "evening" => Ok(Self::Evening),
            _ => Err(EngineError::UnknownTimeSlot(s.to_string())),
        }
    }
}

/// One shedding assignment, appended to history by the allocation engine.
///
/// Records are immutable once written and are never compacted or expired.
/// `load_reduced_mw` holds the line's full capacity at assignment time, not
/// the partial amount the plan asked of it (see DESIGN.md).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheddingRecord {
    pub line_id: u32,
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
    pub duration_hours: f64,
    pub load_reduced_mw: f64,
}
