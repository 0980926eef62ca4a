//! Conversion between the normalized simulation units and atomic units.
//!
//! Simulation quantities are normalized to a reference angular frequency
//! `omega_r`: time is measured in `1/omega_r`, electric fields in
//! `m_e c omega_r / e` and energies in `m_e c^2`. The tunneling rate is
//! evaluated in atomic units.

use crate::{
    constants::{
        AU_ANGULAR_FREQUENCY, AU_TO_MEC2, CLIGHT, EV_TO_AU, FIELD_TO_AU_PER_REFERENCE_FREQUENCY, PI,
    },
    error::require,
};
use std::io;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Floating-point precision to use for units.
#[allow(non_camel_case_types)]
pub type fun = f64;

/// Conversion factors between normalized simulation units and atomic units.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct AtomicUnitConversion {
    /// Electron volts to atomic units of energy.
    pub ev_to_au: fun,
    /// Normalized electric field to atomic units of field strength.
    pub ec_to_au: fun,
    /// Atomic units of frequency to normalized frequency.
    pub au_to_w0: fun,
    /// Atomic units of energy to normalized energy.
    pub au_to_mec2: fun,
}

impl AtomicUnitConversion {
    /// Creates the conversion factors for a simulation normalized to the given
    /// reference angular frequency [rad/s].
    pub fn for_reference_angular_frequency(reference_angular_frequency: fun) -> io::Result<Self> {
        require(
            reference_angular_frequency.is_finite() && reference_angular_frequency > 0.0,
            format!(
                "Reference angular frequency must be finite and positive, got {}",
                reference_angular_frequency
            ),
        )?;
        Ok(Self {
            ev_to_au: EV_TO_AU,
            ec_to_au: FIELD_TO_AU_PER_REFERENCE_FREQUENCY * reference_angular_frequency,
            au_to_w0: AU_ANGULAR_FREQUENCY / reference_angular_frequency,
            au_to_mec2: AU_TO_MEC2,
        })
    }

    /// Creates the conversion factors for a simulation normalized to the angular
    /// frequency of light with the given wavelength [m].
    pub fn for_reference_wavelength(reference_wavelength: fun) -> io::Result<Self> {
        require(
            reference_wavelength.is_finite() && reference_wavelength > 0.0,
            format!(
                "Reference wavelength must be finite and positive, got {}",
                reference_wavelength
            ),
        )?;
        Self::for_reference_angular_frequency(2.0 * PI * CLIGHT / reference_wavelength)
    }

    /// Converts an energy in electron volts to atomic units.
    pub fn ev_to_au(&self, energy: fun) -> fun {
        energy * self.ev_to_au
    }
}
