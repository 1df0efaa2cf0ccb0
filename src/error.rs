//! Error types.
//!
//! Two layers:
//!
//! - [`SearchError`]: typed failures raised by the dataset, the fitter and the
//!   search engine. Library callers match on these.
//! - [`AppError`]: what the binary reports. Carries the process exit code and a
//!   human-readable message.

use thiserror::Error;

use crate::domain::FeatureSubset;

/// Exit code for bad flags, bad configuration and file I/O failures.
pub const EXIT_USAGE: u8 = 2;
/// Exit code for malformed or unusable input data.
pub const EXIT_INPUT: u8 = 3;
/// Exit code for numerical failures that escaped the search.
pub const EXIT_NUMERIC: u8 = 4;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("dataset is empty: no data rows")]
    EmptyDataset,
    #[error("dataset needs at least 2 numeric columns (features + response), found {found}")]
    TooFewColumns { found: usize },
    #[error("row {row} has {found} columns, expected {expected}")]
    RowLengthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("row {row}, column `{column}`: invalid numeric value '{value}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },
    #[error("malformed CSV at line {line}: {message}")]
    Csv { line: u64, message: String },
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("invalid argument: cannot choose {k} of {n}")]
    InvalidArgument { n: usize, k: usize },
    #[error("singular design matrix for subset {subset} (rank {rank} < {columns})")]
    SingularModel {
        subset: FeatureSubset,
        rank: usize,
        columns: usize,
    },
}

impl SearchError {
    /// Whether this error belongs to the input-data family (fatal before the search).
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SearchError::EmptyDataset
                | SearchError::TooFewColumns { .. }
                | SearchError::RowLengthMismatch { .. }
                | SearchError::InvalidValue { .. }
                | SearchError::Csv { .. }
        )
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            _ if self.is_input_error() => EXIT_INPUT,
            SearchError::InvalidConfiguration(_) | SearchError::InvalidArgument { .. } => EXIT_USAGE,
            _ => EXIT_NUMERIC,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        let prefix = if err.is_input_error() { "Input error" } else { "Error" };
        AppError::new(err.exit_code(), format!("{prefix}: {err}"))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
