//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - search report JSON read/write (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
