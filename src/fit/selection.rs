//! Search coordination and model selection.
//!
//! One worker per subset size runs in parallel on rayon's pool. Every worker
//! reads the same immutable dataset and returns exactly one `SizeResult`; the
//! indexed `collect` is the join point, so nothing is aggregated until every
//! size has finished, and results come back in ascending size order.
//!
//! Selection rules:
//! 1. Per size: lowest AIC, earliest subset wins ties (see `worker`).
//! 2. Overall: lowest AIC across sizes, smallest size wins ties.

use std::time::Instant;

use chrono::Utc;
use log::info;
use rayon::prelude::*;

use crate::domain::{Dataset, SearchConfig, SearchReport, SizeResult};
use crate::error::{Result, SearchError};
use crate::fit::subsets::binomial;
use crate::fit::worker::search_size;
use crate::math::improves_on;

/// Run the exhaustive search for every configured subset size.
///
/// Configuration is validated before any worker starts. Per-subset failures
/// (singular designs) stay inside their worker, so a successful run always
/// has one entry per size in `[min, max]`.
pub fn run_search(dataset: &Dataset, config: &SearchConfig) -> Result<SearchReport> {
    let num_explanatory = dataset.num_explanatory();
    let sizes = config.size_range(num_explanatory)?;
    let (min_size, max_size) = (*sizes.start(), *sizes.end());

    let total: usize = sizes.clone().map(|k| binomial(num_explanatory, k)).fold(0, usize::saturating_add);
    info!(
        "searching sizes {min_size}..={max_size} over {num_explanatory} features \
         ({total} subsets, {} rows)",
        dataset.n_rows()
    );

    let started = Instant::now();
    let per_size: Vec<SizeResult> = sizes
        .into_par_iter()
        .map(|size| search_size(dataset, size))
        .collect::<Result<Vec<_>>>()?;
    let elapsed = started.elapsed();

    let best = select_best(&per_size)
        .cloned()
        .ok_or_else(|| SearchError::InvalidConfiguration("no subset sizes to search".to_string()))?;

    info!(
        "search finished in {:.3}s: best size {} aic={:.4}",
        elapsed.as_secs_f64(),
        best.size,
        best.aic()
    );

    Ok(SearchReport {
        generated_at: Utc::now(),
        rows: dataset.n_rows(),
        feature_names: dataset.feature_names().to_vec(),
        response_name: dataset.response_name().to_string(),
        min_subset_size: min_size,
        max_subset_size: max_size,
        elapsed_secs: elapsed.as_secs_f64(),
        per_size,
        best,
    })
}

/// Lowest-AIC entry; on ties the earlier (smaller size) entry is kept.
///
/// When every entry has no model, this is the first entry.
pub fn select_best(per_size: &[SizeResult]) -> Option<&SizeResult> {
    let (first, rest) = per_size.split_first()?;
    let mut best = first;
    for candidate in rest {
        if improves_on(candidate.aic(), best.aic()) {
            best = candidate;
        }
    }
    Some(best)
}
