//! Line commands: usage statistics, capacity, and activation.

use std::fmt::Write;

use anyhow::Result;
use chrono::NaiveDate;
use shed_core::{LineUsage, ShedPlanner};

/// Shows usage statistics for one line.
pub fn stats(planner: &ShedPlanner, id: u32, today: NaiveDate) -> Result<()> {
    let usage = planner.line_usage(id, today)?;
    print!("{}", format_stats(&usage));
    Ok(())
}

/// Formats a line's usage summary for the terminal.
pub fn format_stats(usage: &LineUsage) -> String {
    let mut output = String::new();
    writeln!(output, "Line {} usage:", usage.line_id).unwrap();
    writeln!(output, "  total shed: {:.2} h", usage.total_hours).unwrap();
    writeln!(output, "  this month: {:.2} h", usage.current_month_hours).unwrap();
    match usage.last_shedding_time {
        Some(at) => writeln!(output, "  last touched: {}", at.to_rfc3339()).unwrap(),
        None => writeln!(output, "  last touched: never").unwrap(),
    }
    if usage.monthly_breakdown.is_empty() {
        writeln!(output, "  monthly breakdown: (none)").unwrap();
    } else {
        writeln!(output, "  monthly breakdown:").unwrap();
        for (bucket, hours) in &usage.monthly_breakdown {
            writeln!(output, "    {bucket}: {hours:.2} h").unwrap();
        }
    }
    output
}

/// Sets a line's capacity. The caller persists the planner afterwards.
pub fn set_capacity(planner: &mut ShedPlanner, id: u32, capacity_mw: f64) -> Result<()> {
    planner.set_capacity(id, capacity_mw)?;
    println!("Line {id} capacity set to {capacity_mw:.2} MW");
    Ok(())
}

/// Activates or deactivates a line. The caller persists the planner
/// afterwards.
pub fn set_active(planner: &mut ShedPlanner, id: u32, is_active: bool) -> Result<()> {
    planner.set_active(id, is_active)?;
    if is_active {
        println!("Line {id} enabled");
    } else {
        println!("Line {id} disabled");
    }
    Ok(())
}
