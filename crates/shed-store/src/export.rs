//! Report export, independent of the primary data file.

use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use shed_core::{DayStats, GroupStats, LineStats, PeriodReport, ReportType};

use crate::{StoreError, write_json_atomic};

/// Header block of an exported report document.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportInfo {
    start_date: NaiveDate,
    end_date: NaiveDate,
    report_type: ReportType,
    total_hours: f64,
    total_reduction_mw: f64,
}

/// The exported document: header plus the three statistic groupings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportDocument<'a> {
    report_info: ReportInfo,
    per_line_stats: &'a [LineStats],
    per_group_stats: &'a [GroupStats],
    per_day_stats: &'a [DayStats],
}

/// Writes a computed report to `path` as a standalone JSON document.
pub fn export_report(path: &Path, report: &PeriodReport) -> Result<(), StoreError> {
    let document = ReportDocument {
        report_info: ReportInfo {
            start_date: report.start_date,
            end_date: report.end_date,
            report_type: report.report_type,
            total_hours: report.total_hours,
            total_reduction_mw: report.total_reduction_mw,
        },
        per_line_stats: &report.per_line,
        per_group_stats: &report.per_group,
        per_day_stats: &report.per_day,
    };
    write_json_atomic(path, &document)?;
    tracing::debug!(
        path = %path.display(),
        report_type = %report.report_type,
        "exported report"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shed_core::{Line, daily_report};
    use tempfile::TempDir;

    #[test]
    fn exported_document_has_info_and_three_groupings() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("report.json");

        let lines = Line::default_fleet();
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let report = daily_report(&lines, &[], date).unwrap();
        export_report(&path, &report).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let info = &value["reportInfo"];
        assert_eq!(info["startDate"], "2025-05-01");
        assert_eq!(info["endDate"], "2025-05-01");
        assert_eq!(info["reportType"], "daily");
        assert_eq!(value["perLineStats"].as_array().unwrap().len(), 20);
        assert_eq!(value["perGroupStats"].as_array().unwrap().len(), 2);
        assert_eq!(value["perDayStats"].as_array().unwrap().len(), 1);
    }
}
