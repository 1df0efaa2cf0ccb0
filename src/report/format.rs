//! Formatted terminal output for search reports.
//!
//! We keep formatting code in one place so:
//! - the search code stays clean and testable
//! - output changes are localized
//!
//! Numbers are printed with 4 decimals; AIC of a perfect fit prints as `-inf`.

use std::path::Path;

use crate::domain::{FitResult, SearchReport, SizeResult};

/// Format the run summary (input shape, size range, totals, timing).
pub fn format_run_summary(report: &SearchReport, source: Option<&Path>, dropped_column: Option<&str>) -> String {
    let mut out = String::new();

    out.push_str("=== bss - Best-Subset Regression Search ===\n");
    if let Some(path) = source {
        match dropped_column {
            Some(name) => out.push_str(&format!("Input: {} (dropped id column `{name}`)\n", path.display())),
            None => out.push_str(&format!("Input: {}\n", path.display())),
        }
    }
    out.push_str(&format!(
        "Rows: n={} | features={} | response={}\n",
        report.rows,
        report.feature_names.len(),
        report.response_name
    ));
    out.push_str(&format!(
        "Sizes: {}..={} | subsets={} | singular skipped={}\n",
        report.min_subset_size,
        report.max_subset_size,
        report.subsets_evaluated(),
        report.subsets_singular()
    ));
    out.push_str(&format!("Elapsed: {:.3}s\n", report.elapsed_secs));

    out
}

/// Format the per-size table, one line per subset size in ascending order.
pub fn format_size_table(report: &SearchReport) -> String {
    let mut out = String::new();
    out.push_str("Best model per subset size:\n");
    out.push_str(
        format!(
            "{:>4} {:>14} {:>14} {:>9} {:>9}  {}\n",
            "size", "aic", "mse", "subsets", "singular", "features"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:->4} {:->14} {:->14} {:->9} {:->9}  {:-<8}\n",
            "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for r in &report.per_size {
        let marker = if r.size == report.best.size { "*" } else { " " };
        let (aic, mse, features) = match &r.best {
            Some(fit) => (
                format!("{:.4}", fit.aic),
                format!("{:.4}", fit.mse),
                format!("{} {}", fit.subset, feature_names(fit, &report.feature_names)),
            ),
            None => ("inf".to_string(), "-".to_string(), "(no valid model)".to_string()),
        };
        out.push_str(
            format!(
                "{:>4} {:>14} {:>14} {:>9} {:>9}  {}{marker}\n",
                r.size, aic, mse, r.evaluated, r.singular, features
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Format the overall best model with its coefficients.
pub fn format_best(report: &SearchReport) -> String {
    let mut out = String::new();
    out.push_str("Overall best model:\n");

    let Some(fit) = &report.best.best else {
        out.push_str("- no valid model: every searched subset was singular\n");
        return out;
    };

    out.push_str(&format!("- size: {}\n", report.best.size));
    out.push_str(&format!("- features: {}\n", fit.subset));
    out.push_str(&format!("- AIC: {:.4}\n", fit.aic));
    out.push_str(&format!("- MSE: {:.4}\n", fit.mse));
    out.push_str(&format!("- {} ≈\n", report.response_name));
    for (&idx, beta) in fit.subset.indices().iter().zip(&fit.coefficients) {
        out.push_str(&format!("    {beta:>+14.6} * {}\n", column_name(&report.feature_names, idx)));
    }

    out
}

/// One line for scripting: `size=.. aic=.. mse=.. features=[..] names=..`.
pub fn format_best_line(best: &SizeResult, feature_names_all: &[String]) -> String {
    match &best.best {
        Some(fit) => format!(
            "size={} aic={:.4} mse={:.4} features={} names={}",
            best.size,
            fit.aic,
            fit.mse,
            fit.subset,
            fit.subset
                .indices()
                .iter()
                .map(|&i| column_name(feature_names_all, i))
                .collect::<Vec<_>>()
                .join(",")
        ),
        None => format!("size={} aic=inf mse=- features=[] names=", best.size),
    }
}

fn feature_names(fit: &FitResult, names: &[String]) -> String {
    let parts: Vec<String> = fit
        .subset
        .indices()
        .iter()
        .map(|&i| column_name(names, i))
        .collect();
    format!("({})", parts.join(", "))
}

fn column_name(names: &[String], idx: usize) -> String {
    names.get(idx).cloned().unwrap_or_else(|| format!("x{idx}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FeatureSubset;
    use chrono::Utc;

    fn fit(indices: &[usize], aic: f64) -> FitResult {
        FitResult {
            subset: FeatureSubset::new(indices.to_vec()).unwrap(),
            mse: 2.5,
            aic,
            coefficients: indices.iter().map(|&i| i as f64 + 0.5).collect(),
        }
    }

    fn report() -> SearchReport {
        let per_size = vec![
            SizeResult {
                size: 1,
                best: Some(fit(&[2], 14.25)),
                evaluated: 3,
                singular: 0,
            },
            SizeResult {
                size: 2,
                best: Some(fit(&[0, 2], 10.5)),
                evaluated: 3,
                singular: 1,
            },
            SizeResult {
                size: 3,
                best: None,
                evaluated: 1,
                singular: 1,
            },
        ];
        SearchReport {
            generated_at: Utc::now(),
            rows: 9,
            feature_names: vec!["rooms".to_string(), "age".to_string(), "tax".to_string()],
            response_name: "mv".to_string(),
            min_subset_size: 1,
            max_subset_size: 3,
            elapsed_secs: 0.25,
            best: per_size[1].clone(),
            per_size,
        }
    }

    #[test]
    fn summary_mentions_shape_and_totals() {
        let text = format_run_summary(&report(), Some(Path::new("housing.csv")), Some("neighborhood"));
        assert!(text.contains("Input: housing.csv (dropped id column `neighborhood`)"));
        assert!(text.contains("Rows: n=9 | features=3 | response=mv"));
        assert!(text.contains("Sizes: 1..=3 | subsets=7 | singular skipped=2"));
    }

    #[test]
    fn size_table_lists_every_size_and_marks_best() {
        let text = format_size_table(&report());
        let lines: Vec<&str> = text.lines().collect();
        // Title, header, rule, then one line per size.
        assert_eq!(lines.len(), 6);
        assert!(lines[3].contains("[2] (tax)"));
        assert!(lines[4].contains("10.5000"));
        assert!(lines[4].contains("[0, 2] (rooms, tax)*"));
        assert!(lines[5].contains("inf"));
        assert!(lines[5].contains("(no valid model)"));
    }

    #[test]
    fn best_block_lists_coefficients_by_name() {
        let text = format_best(&report());
        assert!(text.contains("- size: 2"));
        assert!(text.contains("* rooms"));
        assert!(text.contains("* tax"));
        assert!(text.contains("+2.500000"));
    }

    #[test]
    fn best_line_is_single_line() {
        let r = report();
        let line = format_best_line(&r.best, &r.feature_names);
        assert_eq!(line, "size=2 aic=10.5000 mse=2.5000 features=[0, 2] names=rooms,tax");

        let none = format_best_line(&r.per_size[2], &r.feature_names);
        assert_eq!(none, "size=3 aic=inf mse=- features=[] names=");
    }

    #[test]
    fn perfect_fit_prints_negative_infinity() {
        let mut r = report();
        r.best.best = Some(fit(&[1], f64::NEG_INFINITY));
        assert!(format_best(&r).contains("- AIC: -inf"));
    }
}
