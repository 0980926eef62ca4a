//! Physical and mathematical constants.

/// Floating-point precision to use for constants.
#[allow(non_camel_case_types)]
pub type fcn = f64;

// Mathematical constants

pub const PI: fcn = std::f64::consts::PI;

// Physical constants

/// Speed of light in vacuum [m/s].
pub const CLIGHT: fcn = 299_792_458.0;
/// Electron rest energy [eV].
pub const MC2_ELECTRON_EV: fcn = 510.998e3;
/// Hartree energy, the atomic unit of energy [eV].
pub const HARTREE_EV: fcn = 27.2116;
/// Atomic mass unit in units of the electron mass.
pub const AMU_TO_ELECTRON_MASS: fcn = 1822.888_486;

// Unit conversion factors

/// Conversion factor from electron volts to atomic units of energy.
pub const EV_TO_AU: fcn = 1.0 / HARTREE_EV;
/// Conversion factor from atomic units of energy to electron rest energies.
pub const AU_TO_MEC2: fcn = HARTREE_EV / MC2_ELECTRON_EV;
/// `hbar/(m_e c^2 alpha^3)` [s]. Multiplied with the reference angular frequency
/// this converts an electric field in units of `m_e c omega_r / e` to atomic units.
pub const FIELD_TO_AU_PER_REFERENCE_FREQUENCY: fcn = 3.314_742_578e-15;
/// `alpha^2 m_e c^2 / hbar` [rad/s], the atomic unit of angular frequency.
/// Divided by the reference angular frequency this converts a rate in atomic
/// units to units of the reference frequency.
pub const AU_ANGULAR_FREQUENCY: fcn = 4.134_137_172e16;
