//! `best-subset` library crate.
//!
//! The binary (`bss`) is a thin wrapper around this library so that:
//!
//! - the search engine is testable without spawning processes
//! - the engine can be driven from other code with an in-memory `Dataset`
//!
//! The engine lives in [`fit`]: subset enumeration, per-subset OLS fits scored
//! by AIC, one parallel worker per subset size, and the final selection.

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod report;
