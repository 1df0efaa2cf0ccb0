//! Single-subset regression fit.
//!
//! Given a dataset and a feature subset we:
//! - build the design matrix from the subset's columns (no intercept column)
//! - solve the OLS problem for the coefficients
//! - compute MSE and AIC from the in-sample residuals
//!
//! The fit is a pure function of its inputs, so repeated calls return
//! bit-identical results.

use crate::domain::{Dataset, FeatureSubset, FitResult};
use crate::error::{Result, SearchError};
use crate::math::{aic, is_perfect_fit, mean_squared_error, solve_least_squares};

/// Fit `y ≈ X β` using only the columns in `subset`.
///
/// Returns `SearchError::SingularModel` when the selected columns are
/// collinear (or outnumber the rows).
pub fn fit_subset(dataset: &Dataset, subset: &FeatureSubset) -> Result<FitResult> {
    let x = dataset.design_matrix(subset);
    let y = dataset.response();

    let beta = solve_least_squares(&x, y).map_err(|deficient| SearchError::SingularModel {
        subset: subset.clone(),
        rank: deficient.rank,
        columns: deficient.columns,
    })?;

    let residuals = y - &x * &beta;
    let mse = if is_perfect_fit(&residuals, y) {
        0.0
    } else {
        mean_squared_error(&residuals)
    };
    let aic = aic(dataset.n_rows(), mse, subset.len());

    Ok(FitResult {
        subset: subset.clone(),
        mse,
        aic,
        coefficients: beta.iter().copied().collect(),
    })
}
