//! Command line interface.

pub mod build;
pub mod coefficients;
pub mod run;
pub mod simulate;
pub mod utils;
