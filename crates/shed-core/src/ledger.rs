//! Per-line usage bookkeeping derived from the shedding history.
//!
//! The ledger is a pure fold over the append-only history: zero every
//! counter, then apply each record in its original order. The allocation
//! engine reuses the same fold step for its incremental updates, so the
//! ledger is always exactly the fold of the current history.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::line::Line;
use crate::record::SheddingRecord;

/// Bucket key for a record's calendar month, e.g. `"7_2025"`.
#[must_use]
pub fn month_key(date: NaiveDate) -> String {
    format!("{}_{}", date.month(), date.year())
}

/// Accumulated shedding usage for one line.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageStats {
    pub line_id: u32,
    /// Sum of all recorded shedding hours for this line.
    pub total_hours: f64,
    /// Shedding hours bucketed by the month of each record's date.
    pub monthly_hours: HashMap<String, f64>,
    /// When this line's stats were last touched. Stamped with the wall
    /// clock at fold time, so after a full recompute it reflects the
    /// recompute, not the original allocation.
    pub last_shedding_time: Option<DateTime<Utc>>,
}

impl UsageStats {
    fn zeroed(line_id: u32) -> Self {
        Self {
            line_id,
            total_hours: 0.0,
            monthly_hours: HashMap::new(),
            last_shedding_time: None,
        }
    }
}

/// Derived usage statistics for the whole fleet.
#[derive(Debug, Clone, Default)]
pub struct UsageLedger {
    stats: HashMap<u32, UsageStats>,
}

impl UsageLedger {
    /// Rebuilds the ledger from scratch by folding the full history.
    pub fn recompute(history: &[SheddingRecord], lines: &[Line]) -> Self {
        let mut ledger = Self {
            stats: lines
                .iter()
                .map(|line| (line.id, UsageStats::zeroed(line.id)))
                .collect(),
        };
        for record in history {
            ledger.apply(record);
        }
        tracing::debug!(
            records = history.len(),
            lines = lines.len(),
            "recomputed usage ledger"
        );
        ledger
    }

    /// Folds one record into the ledger.
    ///
    /// This is the single fold step shared by [`Self::recompute`] and the
    /// allocation engine's incremental update.
    pub fn apply(&mut self, record: &SheddingRecord) {
        let stats = self
            .stats
            .entry(record.line_id)
            .or_insert_with(|| UsageStats::zeroed(record.line_id));
        stats.total_hours += record.duration_hours;
        *stats
            .monthly_hours
            .entry(month_key(record.date))
            .or_insert(0.0) += record.duration_hours;
        stats.last_shedding_time = Some(Utc::now());
    }

    /// Shedding hours the line has accumulated in the given month.
    ///
    /// Zero when the line or the bucket is unknown.
    #[must_use]
    pub fn monthly_hours_for(&self, line_id: u32, month: u32, year: i32) -> f64 {
        self.stats
            .get(&line_id)
            .and_then(|s| s.monthly_hours.get(&format!("{month}_{year}")))
            .copied()
            .unwrap_or(0.0)
    }

    /// Full stats for one line, if it is tracked.
    #[must_use]
    pub fn get(&self, line_id: u32) -> Option<&UsageStats> {
        self.stats.get(&line_id)
    }
}
