//! Best-subset search.
//!
//! Responsibilities:
//!
//! - enumerate feature subsets of each size (`subsets`)
//! - fit one subset by OLS and score it by AIC (`fitter`)
//! - search every subset of one size (`worker`)
//! - fan out sizes in parallel and select the overall best (`selection`)

pub mod fitter;
pub mod selection;
pub mod subsets;
pub mod worker;

pub use fitter::*;
pub use selection::*;
pub use subsets::*;
pub use worker::*;
