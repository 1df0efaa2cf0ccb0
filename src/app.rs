//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and sets up logging
//! - parses CLI arguments
//! - runs the search pipeline
//! - prints reports and writes optional exports

use clap::Parser;

use crate::cli::{Command, SearchArgs, ShowArgs};
use crate::domain::{RunConfig, SearchConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `bss` binary.
pub fn run() -> Result<(), AppError> {
    // `.env` may carry `RUST_LOG` and `BSS_*`, so it has to be loaded before
    // the logger and the argument parser read the environment.
    dotenvy::dotenv().ok();
    init_logging();

    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Search(args) => handle_search(args, OutputMode::Full),
        Command::Best(args) => handle_search(args, OutputMode::BestOnly),
        Command::Show(args) => handle_show(args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    BestOnly,
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn handle_search(args: SearchArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = run_config_from_args(&args);
    let run = pipeline::run_pipeline(&config)?;
    let report = &run.report;

    match mode {
        OutputMode::Full => {
            println!(
                "{}",
                crate::report::format_run_summary(
                    report,
                    Some(config.csv_path.as_path()),
                    run.ingest.dropped_column.as_deref(),
                )
            );
            println!("{}", crate::report::format_size_table(report));
            println!("{}", crate::report::format_best(report));
        }
        OutputMode::BestOnly => {
            println!(
                "{}",
                crate::report::format_best_line(&report.best, &report.feature_names)
            );
        }
    }

    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let report = crate::io::export::read_report_json(&args.report)?;

    println!("{}", crate::report::format_run_summary(&report, None, None));
    println!("{}", crate::report::format_size_table(&report));
    println!("{}", crate::report::format_best(&report));
    Ok(())
}

pub fn run_config_from_args(args: &SearchArgs) -> RunConfig {
    RunConfig {
        csv_path: args.csv.clone(),
        id_column: args.id_column,
        search: SearchConfig {
            min_subset_size: args.min_size,
            max_subset_size: args.max_size,
        },
        export: args.export.clone(),
    }
}
