//! Command-line parsing for the best-subset search.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! search code. Every search option can also come from a `BSS_*` environment
//! variable (or a `.env` file, loaded before parsing).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{DEFAULT_MIN_SUBSET_SIZE, IdColumn};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "bss", version, about = "Exhaustive best-subset linear regression scored by AIC")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search every feature subset and print the best model per size and overall.
    Search(SearchArgs),
    /// Print only the overall best model on one line (useful for scripting).
    Best(SearchArgs),
    /// Print a previously exported report JSON.
    Show(ShowArgs),
}

/// Options for running a search.
#[derive(Debug, Parser, Clone)]
pub struct SearchArgs {
    /// Input CSV with a header row; the last column is the response.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Smallest subset size to search.
    #[arg(long, env = "BSS_MIN_SIZE", default_value_t = DEFAULT_MIN_SUBSET_SIZE)]
    pub min_size: usize,

    /// Largest subset size to search (defaults to all explanatory columns).
    #[arg(long, env = "BSS_MAX_SIZE")]
    pub max_size: Option<usize>,

    /// How to treat the first CSV column.
    #[arg(long, env = "BSS_ID_COLUMN", value_enum, default_value_t = IdColumn::Auto)]
    pub id_column: IdColumn,

    /// Export the full report to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

/// Options for printing a saved report.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Report JSON file produced by `bss search --export`.
    #[arg(value_name = "JSON")]
    pub report: PathBuf,
}
