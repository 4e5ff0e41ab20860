//! Report command: format, print, and export computed reports.

use std::fmt::Write;
use std::path::Path;

use anyhow::{Context, Result};
use shed_core::PeriodReport;

/// Prints a computed report, optionally as JSON, optionally exporting it to
/// a standalone document first.
pub fn emit(report: &PeriodReport, json: bool, export: Option<&Path>) -> Result<()> {
    if let Some(path) = export {
        shed_store::export_report(path, report)
            .with_context(|| format!("failed to export report to {}", path.display()))?;
        eprintln!("Exported report to {}", path.display());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", format_report(report));
    }

    Ok(())
}

/// Formats a report for the terminal.
///
/// Per-line rows are shown only for lines with recorded activity; groups
/// and days are always shown, zero-filled.
pub fn format_report(report: &PeriodReport) -> String {
    let mut output = String::new();

    writeln!(
        output,
        "SHEDDING REPORT ({}): {} to {}",
        report.report_type, report.start_date, report.end_date
    )
    .unwrap();
    let record_count: usize = report.per_day.iter().map(|d| d.record_count).sum();
    writeln!(
        output,
        "Total: {:.2} h shed, {:.2} MW reduced, {} record(s)",
        report.total_hours, report.total_reduction_mw, record_count
    )
    .unwrap();

    writeln!(output).unwrap();
    writeln!(output, "BY GROUP").unwrap();
    for group in &report.per_group {
        writeln!(
            output,
            "  group {}: {} lines, {:.2} h, {:.2} MW, {:.2} h/line",
            group.group,
            group.line_count,
            group.total_hours,
            group.total_reduction_mw,
            group.average_hours_per_line
        )
        .unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "BY LINE").unwrap();
    let mut any = false;
    for line in report.per_line.iter().filter(|s| s.record_count > 0) {
        any = true;
        writeln!(
            output,
            "  line {:>2} ({}): {} record(s), {:.2} h, {:.2} MW",
            line.line_id, line.line_name, line.record_count, line.total_hours,
            line.total_reduction_mw
        )
        .unwrap();
    }
    if !any {
        writeln!(output, "  (no shedding recorded)").unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "BY DAY").unwrap();
    for day in &report.per_day {
        writeln!(
            output,
            "  {}: {} record(s), {:.2} h, {:.2} MW",
            day.date, day.record_count, day.total_hours, day.total_reduction_mw
        )
        .unwrap();
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use insta::assert_snapshot;
    use shed_core::{Line, SheddingRecord, TimeSlot, daily_report, period_report, ReportType};
    use tempfile::TempDir;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn record(line_id: u32, date: NaiveDate, hours: f64) -> SheddingRecord {
        SheddingRecord {
            line_id,
            date,
            time_slot: TimeSlot::Morning,
            duration_hours: hours,
            load_reduced_mw: 10.0,
        }
    }

    #[test]
    fn report_output_shows_groups_lines_and_days() {
        let lines = Line::default_fleet();
        let history = vec![
            record(1, d(2024, 1, 1), 2.0),
            record(2, d(2024, 1, 1), 1.0),
        ];
        let report = daily_report(&lines, &history, d(2024, 1, 1)).unwrap();

        let output = format_report(&report);
        assert_snapshot!(output, @r"
        SHEDDING REPORT (daily): 2024-01-01 to 2024-01-01
        Total: 3.00 h shed, 20.00 MW reduced, 2 record(s)

        BY GROUP
          group 0: 10 lines, 3.00 h, 20.00 MW, 0.30 h/line
          group 1: 10 lines, 0.00 h, 0.00 MW, 0.00 h/line

        BY LINE
          line  1 (Line_01): 1 record(s), 2.00 h, 10.00 MW
          line  2 (Line_02): 1 record(s), 1.00 h, 10.00 MW

        BY DAY
          2024-01-01: 2 record(s), 3.00 h, 20.00 MW
        ");
    }

    #[test]
    fn empty_report_is_zero_filled() {
        let lines = Line::default_fleet();
        let report = daily_report(&lines, &[], d(2025, 5, 1)).unwrap();

        let output = format_report(&report);
        assert!(output.contains("Total: 0.00 h shed, 0.00 MW reduced, 0 record(s)"));
        assert!(output.contains("(no shedding recorded)"));
        assert!(output.contains("2025-05-01: 0 record(s)"));
    }

    #[test]
    fn multi_day_report_lists_every_day() {
        let lines = Line::default_fleet();
        let history = vec![record(1, d(2025, 5, 2), 2.0)];
        let report =
            period_report(&lines, &history, d(2025, 5, 1), d(2025, 5, 3), ReportType::Custom)
                .unwrap();

        let output = format_report(&report);
        assert!(output.contains("2025-05-01: 0 record(s)"));
        assert!(output.contains("2025-05-02: 1 record(s)"));
        assert!(output.contains("2025-05-03: 0 record(s)"));
    }

    #[test]
    fn emit_export_writes_document() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("report.json");

        let lines = Line::default_fleet();
        let report = daily_report(&lines, &[], d(2025, 5, 1)).unwrap();
        emit(&report, false, Some(&path)).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["reportInfo"]["reportType"], "daily");
    }
}
