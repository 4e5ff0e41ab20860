//! Fair allocation of a requested reduction across the active rotation group.
//!
//! # Algorithm summary
//!
//! 1. Resolve the group on duty for the target date.
//! 2. Rank that group's active lines by current-month shedding hours, line
//!    id breaking ties, ascending.
//! 3. Walk the ranking, assigning each line up to its capacity until the
//!    requested reduction is covered or candidates run out.
//!
//! Every assignment appends a [`SheddingRecord`] and folds it into the
//! [`UsageLedger`] immediately, so the next allocation call sees the
//! updated ranking.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;

use crate::error::EngineError;
use crate::ledger::UsageLedger;
use crate::line::Line;
use crate::record::{SheddingRecord, TimeSlot};
use crate::schedule::group_for_date;

/// Maximum shedding duration per time slot, in hours.
pub const MAX_SLOT_HOURS: f64 = 2.0;

/// One entry of a computed shedding plan.
///
/// `load_reduced_mw` is the partial amount this line was asked to shed;
/// the durable [`SheddingRecord`] written alongside carries the line's full
/// capacity instead (see DESIGN.md).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationItem {
    pub line_id: u32,
    pub line_name: String,
    pub duration_hours: f64,
    pub load_reduced_mw: f64,
    pub time_slot: TimeSlot,
}

/// Usage summary for a single line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineUsage {
    pub line_id: u32,
    pub total_hours: f64,
    pub current_month_hours: f64,
    pub last_shedding_time: Option<DateTime<Utc>>,
    /// Month bucket -> hours, sorted by bucket key for stable output.
    pub monthly_breakdown: BTreeMap<String, f64>,
}

/// Owns the line fleet, the append-only shedding history, and the usage
/// ledger derived from it.
///
/// A planner is constructed from an explicitly supplied fleet and history;
/// loading or bootstrapping a persisted document is the caller's separate
/// step, never a constructor side effect.
#[derive(Debug, Clone)]
pub struct ShedPlanner {
    lines: Vec<Line>,
    history: Vec<SheddingRecord>,
    ledger: UsageLedger,
}

impl ShedPlanner {
    /// Creates a planner over the given fleet and history, recomputing the
    /// ledger from the history.
    pub fn new(lines: Vec<Line>, history: Vec<SheddingRecord>) -> Self {
        let ledger = UsageLedger::recompute(&history, &lines);
        Self {
            lines,
            history,
            ledger,
        }
    }

    /// Creates a planner over the default fleet with empty history.
    pub fn with_default_fleet() -> Self {
        Self::new(Line::default_fleet(), Vec::new())
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn history(&self) -> &[SheddingRecord] {
        &self.history
    }

    pub fn ledger(&self) -> &UsageLedger {
        &self.ledger
    }

    fn line(&self, line_id: u32) -> Result<&Line, EngineError> {
        self.lines
            .iter()
            .find(|l| l.id == line_id)
            .ok_or(EngineError::UnknownLine(line_id))
    }

    /// Sets a line's capacity after validating the id and the value.
    pub fn set_capacity(&mut self, line_id: u32, capacity_mw: f64) -> Result<(), EngineError> {
        if !capacity_mw.is_finite() || capacity_mw <= 0.0 {
            return Err(EngineError::InvalidCapacity(capacity_mw));
        }
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.id == line_id)
            .ok_or(EngineError::UnknownLine(line_id))?;
        line.capacity_mw = capacity_mw;
        tracing::debug!(line_id, capacity_mw, "updated line capacity");
        Ok(())
    }

    /// Activates or deactivates a line.
    pub fn set_active(&mut self, line_id: u32, is_active: bool) -> Result<(), EngineError> {
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.id == line_id)
            .ok_or(EngineError::UnknownLine(line_id))?;
        line.is_active = is_active;
        tracing::debug!(line_id, is_active, "updated line state");
        Ok(())
    }

    /// Usage summary for one line; `today` selects the current-month bucket.
    pub fn line_usage(&self, line_id: u32, today: NaiveDate) -> Result<LineUsage, EngineError> {
        self.line(line_id)?;
        let stats = self.ledger.get(line_id);
        Ok(LineUsage {
            line_id,
            total_hours: stats.map_or(0.0, |s| s.total_hours),
            current_month_hours: self
                .ledger
                .monthly_hours_for(line_id, today.month(), today.year()),
            last_shedding_time: stats.and_then(|s| s.last_shedding_time),
            monthly_breakdown: stats
                .map(|s| s.monthly_hours.iter().map(|(k, v)| (k.clone(), *v)).collect())
                .unwrap_or_default(),
        })
    }

    /// Computes a shedding plan for the given reduction, slot, and date.
    ///
    /// Returns the plan in assignment order. Every emitted item has already
    /// been appended to history and folded into the ledger when this
    /// returns. A group with no active lines yields an empty plan, not an
    /// error.
    pub fn allocate(
        &mut self,
        required_reduction_mw: f64,
        time_slot: TimeSlot,
        target_date: NaiveDate,
    ) -> Result<Vec<AllocationItem>, EngineError> {
        if !required_reduction_mw.is_finite() || required_reduction_mw <= 0.0 {
            return Err(EngineError::NonPositiveReduction(required_reduction_mw));
        }

        let group = group_for_date(target_date);
        let month = target_date.month();
        let year = target_date.year();

        // Ranking is built once per call; each line is extracted at most
        // once, so the in-loop ledger updates only affect future calls.
        let mut ranked: Vec<(f64, u32)> = self
            .lines
            .iter()
            .filter(|l| l.group == group && l.is_active)
            .map(|l| (self.ledger.monthly_hours_for(l.id, month, year), l.id))
            .collect();
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        if ranked.is_empty() {
            tracing::debug!(%group, %target_date, "no active lines in scheduled group");
            return Ok(Vec::new());
        }

        let mut plan = Vec::new();
        let mut remaining = required_reduction_mw;

        for (_, line_id) in ranked {
            if remaining <= 0.0 {
                break;
            }
            let (capacity_mw, line_name) = {
                let line = self.line(line_id)?;
                (line.capacity_mw, line.name.clone())
            };

            let assigned = remaining.min(capacity_mw);
            let duration_hours = if capacity_mw > 0.0 {
                (assigned / capacity_mw) * MAX_SLOT_HOURS
            } else {
                0.0
            };
            if duration_hours <= 0.0 {
                continue;
            }

            plan.push(AllocationItem {
                line_id,
                line_name,
                duration_hours: round2(duration_hours),
                load_reduced_mw: round2(assigned),
                time_slot,
            });
            remaining -= assigned;

            let record = SheddingRecord {
                line_id,
                date: target_date,
                time_slot,
                duration_hours,
                load_reduced_mw: capacity_mw,
            };
            self.ledger.apply(&record);
            self.history.push(record);
            tracing::debug!(
                line_id,
                assigned_mw = assigned,
                duration_hours,
                remaining_mw = remaining,
                "assigned partial reduction"
            );
        }

        Ok(plan)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
