//! Core domain logic for the load-shedding planner.
//!
//! This crate contains the fundamental types and logic for:
//! - Rotation: mapping calendar dates onto the two line groups
//! - Ledger: per-line usage bookkeeping derived from the shedding history
//! - Allocation: distributing a requested reduction fairly across a group
//! - Reports: per-line, per-group, and per-day aggregation over a range

pub mod engine;
pub mod error;
pub mod ledger;
pub mod line;
pub mod record;
pub mod report;
pub mod schedule;

pub use engine::{AllocationItem, LineUsage, MAX_SLOT_HOURS, ShedPlanner};
pub use error::EngineError;
pub use ledger::{UsageLedger, UsageStats, month_key};
pub use line::{DEFAULT_CAPACITY_MW, DEFAULT_LINE_COUNT, Group, LINES_PER_GROUP, Line};
pub use record::{SheddingRecord, TimeSlot};
pub use report::{
    DayStats, GroupStats, LineStats, PeriodReport, ReportType, daily_report, monthly_report,
    period_report, weekly_report,
};
pub use schedule::group_for_date;
