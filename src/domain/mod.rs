//! Domain types used throughout the search.
//!
//! This module defines:
//!
//! - the validated in-memory `Dataset`
//! - canonical feature subsets (`FeatureSubset`)
//! - fit and search outputs (`FitResult`, `SizeResult`, `SearchReport`)
//! - run configuration (`SearchConfig`, `RunConfig`)

pub mod types;

pub use types::*;
