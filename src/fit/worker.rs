//! Exhaustive search over every subset of one fixed size.

use log::{debug, trace, warn};

use crate::domain::{Dataset, FitResult, SizeResult};
use crate::error::{Result, SearchError};
use crate::fit::fitter::fit_subset;
use crate::fit::subsets::{binomial, combinations};
use crate::math::improves_on;

/// Fit every `size`-subset of the dataset's features and keep the lowest AIC.
///
/// Subsets are visited in lexicographic order and a later subset only replaces
/// the incumbent when its AIC is lower beyond tie tolerance, so the earliest
/// subset wins ties. Singular subsets are skipped; if all of them are singular
/// the result has no model and compares as AIC `+inf`.
pub fn search_size(dataset: &Dataset, size: usize) -> Result<SizeResult> {
    let n = dataset.num_explanatory();
    debug!("size {size}: evaluating {} subsets", binomial(n, size));

    let mut best: Option<FitResult> = None;
    let mut evaluated = 0usize;
    let mut singular = 0usize;

    for subset in combinations(n, size)? {
        evaluated += 1;
        let fit = match fit_subset(dataset, &subset) {
            Ok(fit) => fit,
            Err(err @ SearchError::SingularModel { .. }) => {
                trace!("size {size}: skipping {err}");
                singular += 1;
                continue;
            }
            Err(err) => return Err(err),
        };

        let improves = best.as_ref().is_none_or(|b| improves_on(fit.aic, b.aic));
        if improves {
            best = Some(fit);
        }
    }

    match &best {
        Some(fit) => debug!(
            "size {size}: best {} aic={:.4} mse={:.4} ({singular} singular)",
            fit.subset, fit.aic, fit.mse
        ),
        None => warn!("size {size}: no valid model, all {evaluated} subsets were singular"),
    }

    Ok(SizeResult {
        size,
        best,
        evaluated,
        singular,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FeatureSubset;
    use crate::fit::fitter::tests::noisy_dataset;

    #[test]
    fn picks_true_model_among_same_size_subsets() {
        let ds = noisy_dataset(120, 21);
        let result = search_size(&ds, 3).unwrap();

        assert_eq!(result.size, 3);
        assert_eq!(result.evaluated, 4);
        assert_eq!(result.singular, 0);
        let best = result.best.unwrap();
        assert_eq!(best.subset.indices(), &[0, 1, 3]);
    }

    #[test]
    fn best_has_minimum_aic_of_its_size() {
        let ds = noisy_dataset(40, 2);
        let result = search_size(&ds, 2).unwrap();
        let best_aic = result.aic();
        for subset in combinations(4, 2).unwrap() {
            let fit = fit_subset(&ds, &subset).unwrap();
            assert!(best_aic <= fit.aic + 1e-6);
        }
    }

    #[test]
    fn ties_go_to_first_subset_in_enumeration_order() {
        // Column 2 mirrors column 1, so {0, 1} and {0, 2} fit identically.
        let rows: Vec<Vec<f64>> = [(1.0, 1.0), (2.0, -1.0), (3.0, 1.0), (4.0, -1.0), (5.0, 1.0)]
            .iter()
            .map(|&(a, b)| vec![a, b, -b, 2.0 * a + 0.3 * b * b])
            .collect();
        let ds = Dataset::from_rows(&rows).unwrap();

        let fit_01 = fit_subset(&ds, &FeatureSubset::new(vec![0, 1]).unwrap()).unwrap();
        let fit_02 = fit_subset(&ds, &FeatureSubset::new(vec![0, 2]).unwrap()).unwrap();
        assert!((fit_01.aic - fit_02.aic).abs() < 1e-9);

        let result = search_size(&ds, 2).unwrap();
        let best = result.best.unwrap();
        // {1, 2} is singular (x2 = -x1), so the contest is between {0, 1} and {0, 2}.
        assert_eq!(result.singular, 1);
        assert_eq!(best.subset.indices(), &[0, 1]);
    }

    #[test]
    fn all_singular_size_reports_no_model() {
        // Every column is a multiple of the first, so every pair is singular.
        let rows: Vec<Vec<f64>> = (1..=6)
            .map(|i| {
                let a = i as f64;
                vec![a, 2.0 * a, -a, a * a]
            })
            .collect();
        let ds = Dataset::from_rows(&rows).unwrap();

        let result = search_size(&ds, 2).unwrap();
        assert!(result.best.is_none());
        assert_eq!(result.evaluated, 3);
        assert_eq!(result.singular, 3);
        assert_eq!(result.aic(), f64::INFINITY);
    }

    #[test]
    fn zero_size_is_invalid() {
        let ds = noisy_dataset(10, 1);
        assert!(matches!(
            search_size(&ds, 0),
            Err(SearchError::InvalidArgument { k: 0, .. })
        ));
    }
}
