//! The `fieldion` crate provides tunneling field ionization of ion macro-particles for particle-in-cell codes.
#[cfg(feature = "cli")]
pub mod cli;
pub mod constants;
pub mod error;
pub mod field;
pub mod geometry;
pub mod grid;
pub mod io;
pub mod num;
pub mod particles;
pub mod plasma;
pub mod projection;
pub mod random;
pub mod simulation;
pub mod units;
