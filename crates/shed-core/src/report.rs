//! Period aggregation over the shedding history.
//!
//! Reports are read-only projections: they filter the history to a date
//! range and compute per-line, per-group, and per-day statistics plus
//! totals. Nothing here mutates the planner. Named report shapes (daily,
//! weekly, monthly) are thin wrappers over the generic range query.

use std::fmt;

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use crate::engine::ShedPlanner;
use crate::error::EngineError;
use crate::line::{Group, Line};
use crate::record::SheddingRecord;

/// The shape a report was requested as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    Daily,
    Weekly,
    Monthly,
    Custom,
}

impl ReportType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Aggregates for one line over the report range.
///
/// Present for every configured line, zero-filled when the line has no
/// matching records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineStats {
    pub line_id: u32,
    pub line_name: String,
    pub group: Group,
    pub record_count: usize,
    pub total_hours: f64,
    pub total_reduction_mw: f64,
    pub average_duration_hours: f64,
}

/// Aggregates for one rotation group over the report range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStats {
    pub group: Group,
    pub line_count: usize,
    pub record_count: usize,
    pub total_hours: f64,
    pub total_reduction_mw: f64,
    pub average_hours_per_line: f64,
}

/// Aggregates for one calendar day of the report range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayStats {
    pub date: NaiveDate,
    pub record_count: usize,
    pub total_hours: f64,
    pub total_reduction_mw: f64,
}

/// A computed report over an inclusive date range.
///
/// Ephemeral: computed fresh per query and never persisted as canonical
/// state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub report_type: ReportType,
    pub total_hours: f64,
    pub total_reduction_mw: f64,
    pub per_line: Vec<LineStats>,
    pub per_group: Vec<GroupStats>,
    pub per_day: Vec<DayStats>,
}

/// Computes a report over `start..=end` (both ends inclusive).
#[allow(clippy::cast_precision_loss)]
pub fn period_report(
    lines: &[Line],
    history: &[SheddingRecord],
    start: NaiveDate,
    end: NaiveDate,
    report_type: ReportType,
) -> Result<PeriodReport, EngineError> {
    if start > end {
        return Err(EngineError::RangeStartAfterEnd { start, end });
    }

    let in_range: Vec<&SheddingRecord> = history
        .iter()
        .filter(|r| r.date >= start && r.date <= end)
        .collect();

    let per_line: Vec<LineStats> = lines
        .iter()
        .map(|line| {
            let mut record_count = 0;
            let mut total_hours = 0.0;
            let mut total_reduction_mw = 0.0;
            for record in in_range.iter().filter(|r| r.line_id == line.id) {
                record_count += 1;
                total_hours += record.duration_hours;
                total_reduction_mw += record.load_reduced_mw;
            }
            let average_duration_hours = if record_count > 0 {
                total_hours / record_count as f64
            } else {
                0.0
            };
            LineStats {
                line_id: line.id,
                line_name: line.name.clone(),
                group: line.group,
                record_count,
                total_hours,
                total_reduction_mw,
                average_duration_hours,
            }
        })
        .collect();

    let per_group: Vec<GroupStats> = Group::ALL
        .iter()
        .map(|&group| {
            let members: Vec<&LineStats> =
                per_line.iter().filter(|s| s.group == group).collect();
            let line_count = members.len();
            let record_count = members.iter().map(|s| s.record_count).sum();
            let total_hours: f64 = members.iter().map(|s| s.total_hours).sum();
            let total_reduction_mw = members.iter().map(|s| s.total_reduction_mw).sum();
            let average_hours_per_line = if line_count > 0 {
                total_hours / line_count as f64
            } else {
                0.0
            };
            GroupStats {
                group,
                line_count,
                record_count,
                total_hours,
                total_reduction_mw,
                average_hours_per_line,
            }
        })
        .collect();

    let per_day: Vec<DayStats> = start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|date| {
            let mut record_count = 0;
            let mut total_hours = 0.0;
            let mut total_reduction_mw = 0.0;
            for record in in_range.iter().filter(|r| r.date == date) {
                record_count += 1;
                total_hours += record.duration_hours;
                total_reduction_mw += record.load_reduced_mw;
            }
            DayStats {
                date,
                record_count,
                total_hours,
                total_reduction_mw,
            }
        })
        .collect();

    Ok(PeriodReport {
        start_date: start,
        end_date: end,
        report_type,
        total_hours: in_range.iter().map(|r| r.duration_hours).sum(),
        total_reduction_mw: in_range.iter().map(|r| r.load_reduced_mw).sum(),
        per_line,
        per_group,
        per_day,
    })
}

/// Report over a single day.
pub fn daily_report(
    lines: &[Line],
    history: &[SheddingRecord],
    date: NaiveDate,
) -> Result<PeriodReport, EngineError> {
    period_report(lines, history, date, date, ReportType::Daily)
}

/// Report over the Monday-to-Sunday week containing `date`.
pub fn weekly_report(
    lines: &[Line],
    history: &[SheddingRecord],
    date: NaiveDate,
) -> Result<PeriodReport, EngineError> {
    let monday = date - chrono::Duration::days(i64::from(date.weekday().num_days_from_monday()));
    period_report(
        lines,
        history,
        monday,
        monday + chrono::Duration::days(6),
        ReportType::Weekly,
    )
}

/// Report over a full calendar month.
pub fn monthly_report(
    lines: &[Line],
    history: &[SheddingRecord],
    year: i32,
    month: u32,
) -> Result<PeriodReport, EngineError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(EngineError::InvalidMonth { year, month })?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|d| d.pred_opt())
        .ok_or(EngineError::InvalidMonth { year, month })?;
    period_report(lines, history, first, last, ReportType::Monthly)
}

impl ShedPlanner {
    /// Report over a caller-supplied inclusive range.
    pub fn custom_report(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PeriodReport, EngineError> {
        period_report(self.lines(), self.history(), start, end, ReportType::Custom)
    }

    pub fn daily_report(&self, date: NaiveDate) -> Result<PeriodReport, EngineError> {
        daily_report(self.lines(), self.history(), date)
    }

    pub fn weekly_report(&self, date: NaiveDate) -> Result<PeriodReport, EngineError> {
        weekly_report(self.lines(), self.history(), date)
    }

    pub fn monthly_report(&self, year: i32, month: u32) -> Result<PeriodReport, EngineError> {
        monthly_report(self.lines(), self.history(), year, month)
    }
}
