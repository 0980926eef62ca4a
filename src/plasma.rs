//! Plasma physics of ion species.

pub mod ionization;

/// Floating-point precision to use for plasma physics.
#[allow(non_camel_case_types)]
pub type fpl = f64;
