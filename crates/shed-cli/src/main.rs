use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use shed_cli::commands::{init, line, plan, report};
use shed_cli::{Cli, Commands, Config, LineAction, ReportPeriod};
use shed_core::ShedPlanner;
use shed_store::Document;

/// Load config and build a planner from the persisted document,
/// bootstrapping the default fleet when no document exists yet.
fn open_planner(config_path: Option<&Path>) -> Result<(ShedPlanner, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let document =
        shed_store::load_or_bootstrap(&config.data_path).context("failed to load data file")?;
    let planner = ShedPlanner::new(document.lines, document.shedding_history);
    Ok((planner, config))
}

/// Persist the planner's current state, creating the data directory if
/// needed.
fn save_planner(config: &Config, planner: &ShedPlanner) -> Result<()> {
    if let Some(parent) = config.data_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create data directory")?;
    }
    let document = Document::new(planner.lines(), planner.history());
    shed_store::save(&config.data_path, &document).context("failed to save data file")
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    match &cli.command {
        Some(Commands::Plan {
            reduction,
            slot,
            date,
        }) => {
            let (mut planner, config) = open_planner(cli.config.as_deref())?;
            let date = (*date).unwrap_or_else(today);
            plan::run(&mut planner, *reduction, (*slot).into(), date)?;
            save_planner(&config, &planner)?;
        }
        Some(Commands::Line { action }) => match action {
            LineAction::Stats { id } => {
                let (planner, _config) = open_planner(cli.config.as_deref())?;
                line::stats(&planner, *id, today())?;
            }
            LineAction::SetCapacity { id, capacity } => {
                let (mut planner, config) = open_planner(cli.config.as_deref())?;
                line::set_capacity(&mut planner, *id, *capacity)?;
                save_planner(&config, &planner)?;
            }
            LineAction::Enable { id } => {
                let (mut planner, config) = open_planner(cli.config.as_deref())?;
                line::set_active(&mut planner, *id, true)?;
                save_planner(&config, &planner)?;
            }
            LineAction::Disable { id } => {
                let (mut planner, config) = open_planner(cli.config.as_deref())?;
                line::set_active(&mut planner, *id, false)?;
                save_planner(&config, &planner)?;
            }
        },
        Some(Commands::Report { period }) => {
            let (planner, _config) = open_planner(cli.config.as_deref())?;
            match period {
                ReportPeriod::Daily { date, json, export } => {
                    let computed = planner.daily_report((*date).unwrap_or_else(today))?;
                    report::emit(&computed, *json, export.as_deref())?;
                }
                ReportPeriod::Weekly { date, json, export } => {
                    let computed = planner.weekly_report((*date).unwrap_or_else(today))?;
                    report::emit(&computed, *json, export.as_deref())?;
                }
                ReportPeriod::Monthly {
                    month,
                    year,
                    json,
                    export,
                } => {
                    let now = today();
                    let computed = planner
                        .monthly_report((*year).unwrap_or(now.year()), (*month).unwrap_or(now.month()))?;
                    report::emit(&computed, *json, export.as_deref())?;
                }
                ReportPeriod::Range {
                    from,
                    to,
                    json,
                    export,
                } => {
                    let computed = planner.custom_report(*from, *to)?;
                    report::emit(&computed, *json, export.as_deref())?;
                }
            }
        }
        Some(Commands::Init) => {
            let config =
                Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
            init::run(&config.data_path)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
