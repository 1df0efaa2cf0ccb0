//! Shared search pipeline used by the `search` and `best` commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! CSV ingest -> validated dataset -> parallel subset search -> optional export
//!
//! The commands can then focus on presentation.

use crate::domain::{RunConfig, SearchReport};
use crate::error::AppError;
use crate::fit::run_search;
use crate::io::ingest::{IngestedData, load_dataset};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedData,
    pub report: SearchReport,
}

/// Execute the full pipeline: load the CSV, search, and export if requested.
pub fn run_pipeline(config: &RunConfig) -> Result<RunOutput, AppError> {
    let ingest = load_dataset(&config.csv_path, config.id_column)?;
    run_with_dataset(config, ingest)
}

/// Execute the search on an already-ingested dataset.
pub fn run_with_dataset(config: &RunConfig, ingest: IngestedData) -> Result<RunOutput, AppError> {
    let report = run_search(&ingest.dataset, &config.search)?;

    if let Some(path) = &config.export {
        crate::io::export::write_report_json(path, &report)?;
    }

    Ok(RunOutput { ingest, report })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{IdColumn, SearchConfig};
    use crate::error::{EXIT_INPUT, EXIT_USAGE};
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("bss-{}-{name}", std::process::id()))
    }

    fn config(csv_path: PathBuf, min: usize) -> RunConfig {
        RunConfig {
            csv_path,
            id_column: IdColumn::Auto,
            search: SearchConfig {
                min_subset_size: min,
                max_subset_size: None,
            },
            export: None,
        }
    }

    #[test]
    fn pipeline_runs_end_to_end_from_csv() {
        let csv = temp_path("pipeline.csv");
        let mut text = String::from("town,a,b,c,price\n");
        for i in 1..=10 {
            let a = i as f64;
            let b = (a * 1.7).sin();
            let c = (a * 0.3).cos();
            let price = 2.0 * a - 3.0 * b + 0.01 * c * a;
            text.push_str(&format!("t{i},{a},{b},{c},{price}\n"));
        }
        std::fs::write(&csv, text).unwrap();

        let export = temp_path("pipeline.json");
        let mut cfg = config(csv.clone(), 1);
        cfg.export = Some(export.clone());

        let out = run_pipeline(&cfg).unwrap();
        let exported = crate::io::export::read_report_json(&export).unwrap();
        std::fs::remove_file(&csv).ok();
        std::fs::remove_file(&export).ok();

        assert_eq!(out.ingest.dropped_column.as_deref(), Some("town"));
        assert_eq!(out.report.per_size.len(), 3);
        assert_eq!(out.report.feature_names, vec!["a", "b", "c"]);
        assert_eq!(exported.per_size, out.report.per_size);
    }

    #[test]
    fn bad_configuration_is_a_usage_error() {
        let csv = temp_path("small.csv");
        std::fs::write(&csv, "a,b,y\n1,2,3\n2,1,4\n3,5,1\n").unwrap();

        let err = run_pipeline(&config(csv.clone(), 4)).unwrap_err();
        std::fs::remove_file(&csv).ok();
        assert_eq!(err.exit_code(), EXIT_USAGE);
    }

    #[test]
    fn ragged_csv_is_an_input_error() {
        let csv = temp_path("ragged.csv");
        std::fs::write(&csv, "a,b,y\n1,2,3\n2,1\n").unwrap();

        let err = run_pipeline(&config(csv.clone(), 1)).unwrap_err();
        std::fs::remove_file(&csv).ok();
        assert_eq!(err.exit_code(), EXIT_INPUT);
        assert!(err.to_string().contains("row 3 has 2 columns, expected 3"));
    }
}
