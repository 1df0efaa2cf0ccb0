//! Numerical building blocks: least squares and information criteria.

pub mod criteria;
pub mod ols;

pub use criteria::*;
pub use ols::*;
