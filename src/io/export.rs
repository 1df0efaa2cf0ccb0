//! Read/write search reports as JSON.
//!
//! The report JSON is the portable record of a run:
//! - run metadata (rows, column names, size range, timing)
//! - the best subset, AIC, MSE and coefficients for each size
//! - the overall best
//!
//! The schema is defined by `domain::SearchReport`.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::info;

use crate::domain::SearchReport;
use crate::error::{AppError, EXIT_USAGE};

/// Write a search report as pretty-printed JSON.
pub fn write_report_json(path: &Path, report: &SearchReport) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to create report JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(BufWriter::new(file), report)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to write report JSON: {e}")))?;

    info!("wrote report to {}", path.display());
    Ok(())
}

/// Read a search report JSON file.
pub fn read_report_json(path: &Path) -> Result<SearchReport, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to open report JSON '{}': {e}", path.display())))?;
    let report: SearchReport = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Invalid report JSON: {e}")))?;
    Ok(report)
}
