//! Shared domain types.
//!
//! These types are kept small and (where it makes sense) serializable so they can be:
//!
//! - shared read-only across search workers
//! - exported to JSON
//! - reloaded later for display

use std::ops::RangeInclusive;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};

/// Smallest subset size searched when none is configured.
pub const DEFAULT_MIN_SUBSET_SIZE: usize = 4;

/// How the leading column of an input CSV is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IdColumn {
    /// Drop the first column when its first value is not numeric.
    Auto,
    /// Always drop the first column.
    First,
    /// Keep every column.
    None,
}

/// An in-memory regression dataset.
///
/// Rows are observations. The last column of the source table is the response;
/// all earlier columns are candidate explanatory variables (features). Values
/// are validated finite on construction and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Dataset {
    feature_names: Vec<String>,
    response_name: String,
    features: DMatrix<f64>,
    response: DVector<f64>,
}

impl Dataset {
    /// Build a dataset from rows, naming columns `x0..x{p-1}` and `y`.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let width = rows.first().map(Vec::len).ok_or(SearchError::EmptyDataset)?;
        Self::with_columns(default_column_names(width), rows)
    }

    /// Build a dataset from rows with one name per column (response last).
    pub fn with_columns(columns: Vec<String>, rows: &[Vec<f64>]) -> Result<Self> {
        if rows.is_empty() {
            return Err(SearchError::EmptyDataset);
        }
        let width = columns.len();
        if width < 2 {
            return Err(SearchError::TooFewColumns { found: width });
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(SearchError::RowLengthMismatch {
                    row: i + 1,
                    expected: width,
                    found: row.len(),
                });
            }
            if let Some(j) = row.iter().position(|v| !v.is_finite()) {
                return Err(SearchError::InvalidValue {
                    row: i + 1,
                    column: columns[j].clone(),
                    value: row[j].to_string(),
                });
            }
        }

        let p = width - 1;
        let features = DMatrix::from_fn(rows.len(), p, |i, j| rows[i][j]);
        let response = DVector::from_fn(rows.len(), |i, _| rows[i][p]);

        let mut feature_names = columns;
        let response_name = feature_names.pop().unwrap_or_default();

        Ok(Self {
            feature_names,
            response_name,
            features,
            response,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.response.len()
    }

    /// Number of candidate explanatory columns (response excluded).
    pub fn num_explanatory(&self) -> usize {
        self.features.ncols()
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn response_name(&self) -> &str {
        &self.response_name
    }

    pub fn response(&self) -> &DVector<f64> {
        &self.response
    }

    /// Design matrix for a subset: one row per observation, one column per index.
    ///
    /// No intercept column is added.
    pub fn design_matrix(&self, subset: &FeatureSubset) -> DMatrix<f64> {
        let idx = subset.indices();
        DMatrix::from_fn(self.n_rows(), idx.len(), |i, j| self.features[(i, idx[j])])
    }
}

fn default_column_names(width: usize) -> Vec<String> {
    let mut names: Vec<String> = (0..width.saturating_sub(1)).map(|j| format!("x{j}")).collect();
    names.push("y".to_string());
    names
}

/// A set of feature column indices in canonical (strictly increasing) form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct FeatureSubset(Vec<usize>);

impl TryFrom<Vec<usize>> for FeatureSubset {
    type Error = String;

    fn try_from(indices: Vec<usize>) -> std::result::Result<Self, Self::Error> {
        Self::new(indices.clone())
            .ok_or_else(|| format!("feature subset {indices:?} is not non-empty and strictly increasing"))
    }
}

impl From<FeatureSubset> for Vec<usize> {
    fn from(subset: FeatureSubset) -> Self {
        subset.0
    }
}

impl FeatureSubset {
    /// Returns `None` unless `indices` is non-empty and strictly increasing.
    pub fn new(indices: Vec<usize>) -> Option<Self> {
        if indices.is_empty() || indices.windows(2).any(|w| w[0] >= w[1]) {
            return None;
        }
        Some(Self(indices))
    }

    pub(crate) fn from_sorted(indices: Vec<usize>) -> Self {
        debug_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.binary_search(&index).is_ok()
    }
}

impl std::fmt::Display for FeatureSubset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.0.iter().map(usize::to_string).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Fit output for a single feature subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub subset: FeatureSubset,
    pub mse: f64,
    /// `-inf` for a perfect fit (`mse == 0`).
    #[serde(with = "float_repr")]
    pub aic: f64,
    /// One coefficient per subset index, same order.
    pub coefficients: Vec<f64>,
}

/// Best fit found for one subset size.
///
/// `best == None` means every subset of this size was singular; such a result
/// compares as AIC `+inf`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeResult {
    pub size: usize,
    pub best: Option<FitResult>,
    /// Subsets attempted.
    pub evaluated: usize,
    /// Subsets skipped because their design matrix was singular.
    pub singular: usize,
}

impl SizeResult {
    pub fn aic(&self) -> f64 {
        self.best.as_ref().map_or(f64::INFINITY, |fit| fit.aic)
    }
}

/// Search bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub min_subset_size: usize,
    /// `None` means "all explanatory columns".
    pub max_subset_size: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_subset_size: DEFAULT_MIN_SUBSET_SIZE,
            max_subset_size: None,
        }
    }
}

impl SearchConfig {
    /// Resolve and validate the subset sizes to search for `num_explanatory` features.
    pub fn size_range(&self, num_explanatory: usize) -> Result<RangeInclusive<usize>> {
        let min = self.min_subset_size;
        let max = self.max_subset_size.unwrap_or(num_explanatory);

        if min < 1 {
            return Err(SearchError::InvalidConfiguration(format!(
                "min subset size must be >= 1, got {min}"
            )));
        }
        if max > num_explanatory {
            return Err(SearchError::InvalidConfiguration(format!(
                "max subset size {max} exceeds the {num_explanatory} explanatory columns"
            )));
        }
        if min > max {
            return Err(SearchError::InvalidConfiguration(format!(
                "min subset size {min} is greater than max subset size {max} \
                 ({num_explanatory} explanatory columns)"
            )));
        }

        Ok(min..=max)
    }
}

/// Complete outcome of one search run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchReport {
    pub generated_at: DateTime<Utc>,
    pub rows: usize,
    pub feature_names: Vec<String>,
    pub response_name: String,
    pub min_subset_size: usize,
    pub max_subset_size: usize,
    pub elapsed_secs: f64,
    /// One entry per size, ascending.
    pub per_size: Vec<SizeResult>,
    /// Minimum-AIC entry of `per_size` (smallest size wins ties).
    pub best: SizeResult,
}

impl SearchReport {
    pub fn subsets_evaluated(&self) -> usize {
        self.per_size.iter().map(|r| r.evaluated).sum()
    }

    pub fn subsets_singular(&self) -> usize {
        self.per_size.iter().map(|r| r.singular).sum()
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus environment and defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub csv_path: PathBuf,
    pub id_column: IdColumn,
    pub search: SearchConfig,
    pub export: Option<PathBuf>,
}

/// JSON has no infinities; non-finite values are written as `"inf"`, `"-inf"`
/// or `"nan"` and parsed back.
mod float_repr {
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str("nan")
        } else if *value > 0.0 {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(v) => Ok(v),
            Repr::Text(s) => s.parse::<f64>().map_err(de::Error::custom),
        }
    }
}
