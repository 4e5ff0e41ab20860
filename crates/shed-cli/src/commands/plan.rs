//! Plan command: compute and record a shedding allocation.

use std::fmt::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use shed_core::{AllocationItem, ShedPlanner, TimeSlot};

/// Runs the plan command. The caller persists the planner afterwards.
pub fn run(
    planner: &mut ShedPlanner,
    reduction_mw: f64,
    slot: TimeSlot,
    date: NaiveDate,
) -> Result<()> {
    let plan = planner
        .allocate(reduction_mw, slot, date)
        .context("failed to compute shedding plan")?;
    print!("{}", format_plan(&plan, date, slot));
    Ok(())
}

/// Formats a computed plan for the terminal.
pub fn format_plan(plan: &[AllocationItem], date: NaiveDate, slot: TimeSlot) -> String {
    let mut output = String::new();

    if plan.is_empty() {
        writeln!(
            output,
            "No active lines in the scheduled group for {date}; nothing to shed."
        )
        .unwrap();
        return output;
    }

    writeln!(output, "Shedding plan for {date} ({slot}):").unwrap();
    let mut total_mw = 0.0;
    let mut total_hours = 0.0;
    for item in plan {
        writeln!(
            output,
            "  line {:>2} ({}): {:>5.2} h  {:>6.2} MW",
            item.line_id, item.line_name, item.duration_hours, item.load_reduced_mw
        )
        .unwrap();
        total_mw += item.load_reduced_mw;
        total_hours += item.duration_hours;
    }
    writeln!(
        output,
        "Total: {total_mw:.2} MW over {total_hours:.2} line-hours"
    )
    .unwrap();

    output
}
