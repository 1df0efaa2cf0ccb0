//! Fit quality metrics.
//!
//! - `MSE = (1/n) Σ r_i²`
//! - `AIC = n · ln(MSE) + 2k`
//!
//! AIC here uses the MSE as the residual variance in the Gaussian likelihood.
//! `k` counts the fitted coefficients only. A perfect fit (`MSE == 0`) gives
//! `ln(0) = -inf`, which we keep as the AIC: it is the best possible score.
//! The solver never leaves residuals of exactly zero, so a residual vector at
//! rounding level relative to the response (`PERFECT_FIT_RTOL`) counts as a
//! perfect fit.

use nalgebra::DVector;

/// Relative tolerance under which two AIC values count as tied.
pub const AIC_TIE_RTOL: f64 = 1e-9;

/// Residual norm, relative to the response norm, at or below which a fit is exact.
pub const PERFECT_FIT_RTOL: f64 = 1e-12;

/// Whether `residuals` are rounding noise left over from fitting `response` exactly.
pub fn is_perfect_fit(residuals: &DVector<f64>, response: &DVector<f64>) -> bool {
    residuals.norm() <= PERFECT_FIT_RTOL * response.norm()
}

/// Mean of squared residuals.
pub fn mean_squared_error(residuals: &DVector<f64>) -> f64 {
    if residuals.is_empty() {
        return 0.0;
    }
    residuals.norm_squared() / residuals.len() as f64
}

/// Akaike information criterion for `n` observations and `k` coefficients.
pub fn aic(n: usize, mse: f64, k: usize) -> f64 {
    if mse == 0.0 {
        return f64::NEG_INFINITY;
    }
    n as f64 * mse.ln() + 2.0 * k as f64
}

/// Whether `candidate` is a strictly better (lower) AIC than `incumbent`.
///
/// Finite values within `AIC_TIE_RTOL` of each other are a tie and return
/// `false`, so the incumbent is kept.
pub fn improves_on(candidate: f64, incumbent: f64) -> bool {
    if !(candidate.is_finite() && incumbent.is_finite()) {
        return candidate < incumbent;
    }
    candidate < incumbent - AIC_TIE_RTOL * incumbent.abs().max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn mse_averages_squared_residuals() {
        let r = DVector::from_row_slice(&[1.0, -2.0, 3.0, 0.0]);
        assert_abs_diff_eq!(mean_squared_error(&r), 14.0 / 4.0, epsilon = 1e-15);
    }

    #[test]
    fn aic_matches_formula() {
        let v = aic(10, 2.0, 3);
        assert_abs_diff_eq!(v, 10.0 * 2.0_f64.ln() + 6.0, epsilon = 1e-12);
        assert!(v.is_finite());
    }

    #[test]
    fn aic_penalizes_extra_coefficients() {
        assert!(aic(20, 1.5, 4) > aic(20, 1.5, 3));
    }

    #[test]
    fn perfect_fit_is_negative_infinity() {
        assert_eq!(aic(5, 0.0, 2), f64::NEG_INFINITY);
    }

    #[test]
    fn rounding_level_residuals_are_a_perfect_fit() {
        let y = DVector::from_row_slice(&[2.0, 4.0, 6.0, 8.0]);
        assert!(is_perfect_fit(&DVector::from_row_slice(&[4e-15, -1e-15, 0.0, 2e-15]), &y));
        assert!(is_perfect_fit(&DVector::zeros(4), &DVector::zeros(4)));
        assert!(!is_perfect_fit(&DVector::from_row_slice(&[1e-6, 0.0, 0.0, 0.0]), &y));
    }

    #[test]
    fn improvement_ignores_rounding_level_differences() {
        assert!(improves_on(10.0, 11.0));
        assert!(!improves_on(11.0, 10.0));
        assert!(!improves_on(10.0, 10.0));
        assert!(!improves_on(10.0 - 1e-12, 10.0));
        assert!(improves_on(-5.0, f64::INFINITY));
        assert!(improves_on(f64::NEG_INFINITY, -1e6));
        assert!(!improves_on(f64::NEG_INFINITY, f64::NEG_INFINITY));
        assert!(!improves_on(f64::INFINITY, f64::INFINITY));
    }
}
