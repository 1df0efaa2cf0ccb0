//! CSV ingest.
//!
//! Turns a numeric table into a validated `Dataset`:
//!
//! - the first row is a header; its names label the columns in reports
//! - an optional leading identifier column (e.g. a neighborhood name) is dropped
//! - every remaining field must be a finite number
//! - the last remaining column is the response
//!
//! Unlike a row-filtering import, any bad row is fatal: a best-subset search
//! over silently thinned data would not be comparable across runs.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use log::{debug, info};

use crate::domain::{Dataset, IdColumn};
use crate::error::{AppError, EXIT_USAGE, SearchError};

/// Ingest output: the dataset plus what happened to the source columns.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub dataset: Dataset,
    /// Header of the identifier column that was dropped, if any.
    pub dropped_column: Option<String>,
}

/// Load a CSV file into a `Dataset`.
pub fn load_dataset(path: &Path, id_column: IdColumn) -> Result<IngestedData, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            EXIT_USAGE,
            format!("Failed to open CSV '{}': {e}", path.display()),
        )
    })?;

    let ingested = read_dataset(file, id_column)?;
    info!(
        "loaded {}: {} rows, {} features, response `{}`",
        path.display(),
        ingested.dataset.n_rows(),
        ingested.dataset.num_explanatory(),
        ingested.dataset.response_name()
    );
    Ok(ingested)
}

/// Parse CSV text from any reader into a `Dataset`.
pub fn read_dataset<R: Read>(reader: R, id_column: IdColumn) -> Result<IngestedData, SearchError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers().map_err(csv_error)?.clone();
    let records = reader
        .records()
        .collect::<Result<Vec<StringRecord>, csv::Error>>()
        .map_err(csv_error)?;

    let drop_first = match id_column {
        IdColumn::None => false,
        IdColumn::First => true,
        IdColumn::Auto => records
            .first()
            .and_then(|r| r.get(0))
            .is_some_and(|v| v.parse::<f64>().is_err()),
    };
    let skip = usize::from(drop_first);

    let dropped_column = drop_first.then(|| normalize_header_name(headers.get(0).unwrap_or("")));
    if let Some(name) = &dropped_column {
        debug!("dropping identifier column `{name}`");
    }

    let columns: Vec<String> = headers.iter().skip(skip).map(normalize_header_name).collect();

    let mut rows = Vec::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        let line = record.position().map_or(idx + 2, |p| p.line() as usize);
        rows.push(parse_row(record, &columns, skip, headers.len(), line)?);
    }

    let dataset = Dataset::with_columns(columns, &rows)?;
    Ok(IngestedData {
        dataset,
        dropped_column,
    })
}

fn parse_row(
    record: &StringRecord,
    columns: &[String],
    skip: usize,
    expected: usize,
    line: usize,
) -> Result<Vec<f64>, SearchError> {
    if record.len() != expected {
        return Err(SearchError::RowLengthMismatch {
            row: line,
            expected,
            found: record.len(),
        });
    }

    record
        .iter()
        .skip(skip)
        .zip(columns)
        .map(|(field, column)| {
            field
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| SearchError::InvalidValue {
                    row: line,
                    column: column.clone(),
                    value: field.to_string(),
                })
        })
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

fn csv_error(err: csv::Error) -> SearchError {
    let line = err.position().map_or(0, |p| p.line());
    SearchError::Csv {
        line,
        message: err.to_string(),
    }
}
