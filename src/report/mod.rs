//! Reporting: human-readable summaries of a search run.

pub mod format;

pub use format::*;
