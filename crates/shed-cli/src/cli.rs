//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use shed_core::TimeSlot;

/// Load-shedding rotation planner.
///
/// Allocates a requested power reduction across a fixed pool of
/// distribution lines, rotating responsibility fairly over time, and
/// produces historical usage reports.
#[derive(Debug, Parser)]
#[command(name = "shed", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compute a shedding plan and record it in the history.
    Plan {
        /// Required reduction in megawatts.
        #[arg(long)]
        reduction: f64,

        /// Time slot to shed in.
        #[arg(long, value_enum)]
        slot: SlotArg,

        /// Target date (YYYY-MM-DD); defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Inspect or modify a single line.
    Line {
        #[command(subcommand)]
        action: LineAction,
    },

    /// Generate usage reports over the shedding history.
    Report {
        #[command(subcommand)]
        period: ReportPeriod,
    },

    /// Create the data file with the default fleet if it does not exist.
    Init,
}

/// Per-line operations.
#[derive(Debug, Subcommand)]
pub enum LineAction {
    /// Show usage statistics for a line.
    Stats { id: u32 },

    /// Set a line's capacity in megawatts.
    SetCapacity { id: u32, capacity: f64 },

    /// Return a line to the allocation pool.
    Enable { id: u32 },

    /// Take a line out of the allocation pool.
    Disable { id: u32 },
}

/// Report period selection.
#[derive(Debug, Subcommand)]
pub enum ReportPeriod {
    /// One calendar day.
    Daily {
        /// Day to report on; defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,

        /// Also write the report document to this path.
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// The Monday-to-Sunday week containing a date.
    Weekly {
        /// Any day of the week to report on; defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,

        /// Also write the report document to this path.
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// A full calendar month.
    Monthly {
        /// Month 1-12; defaults to the current month.
        #[arg(long)]
        month: Option<u32>,

        /// Year; defaults to the current year.
        #[arg(long)]
        year: Option<i32>,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,

        /// Also write the report document to this path.
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// A caller-supplied inclusive date range.
    Range {
        /// First day of the range (YYYY-MM-DD).
        #[arg(long)]
        from: NaiveDate,

        /// Last day of the range (YYYY-MM-DD).
        #[arg(long)]
        to: NaiveDate,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,

        /// Also write the report document to this path.
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

/// CLI-facing time slot tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SlotArg {
    Morning,
    Evening,
}

impl From<SlotArg> for TimeSlot {
    fn from(slot: SlotArg) -> Self {
        match slot {
            SlotArg::Morning => Self::Morning,
            SlotArg::Evening => Self::Evening,
        }
    }
}
