//! Ionization properties of an ion species.

use super::{super::fpl, tables::ElementData};
use crate::{
    constants::AMU_TO_ELECTRON_MASS,
    error::{invalid_input, require},
    units::AtomicUnitConversion,
};
use std::io;

#[cfg(feature = "serialization")]
use serde::Serialize;

/// Ionization potentials and azimuthal quantum numbers of every charge
/// state of an ion species, together with the ion mass.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct IonizationProfile {
    /// Ionization potential for each charge state [atomic units].
    potentials: Vec<fpl>,
    azimuthal_quantum_numbers: Vec<u32>,
    /// Ion mass [electron masses].
    ion_mass: fpl,
}

impl IonizationProfile {
    /// Creates a new profile from potentials in atomic units.
    ///
    /// Fails if the arrays are empty or of different length, if any potential
    /// is not finite and positive, or if the ion mass is not finite and positive.
    pub fn new(
        potentials: Vec<fpl>,
        azimuthal_quantum_numbers: Vec<u32>,
        ion_mass: fpl,
    ) -> io::Result<Self> {
        require(
            !potentials.is_empty(),
            "Atomic number must be at least one",
        )?;
        require(
            potentials.len() == azimuthal_quantum_numbers.len(),
            format!(
                "Got {} ionization potentials but {} azimuthal quantum numbers",
                potentials.len(),
                azimuthal_quantum_numbers.len()
            ),
        )?;
        if let Some((charge_state, potential)) = potentials
            .iter()
            .enumerate()
            .find(|&(_, &potential)| !(potential.is_finite() && potential > 0.0))
        {
            return Err(invalid_input(format!(
                "Ionization potential for charge state {} must be finite and positive, got {}",
                charge_state, potential
            )));
        }
        require(
            ion_mass.is_finite() && ion_mass > 0.0,
            format!("Ion mass must be finite and positive, got {}", ion_mass),
        )?;
        Ok(Self {
            potentials,
            azimuthal_quantum_numbers,
            ion_mass,
        })
    }

    /// Creates a new profile from ionization energies in electron volts.
    pub fn from_ionization_energies(
        ionization_energies: &[fpl],
        azimuthal_quantum_numbers: &[u32],
        ion_mass: fpl,
        conversion: &AtomicUnitConversion,
    ) -> io::Result<Self> {
        Self::new(
            ionization_energies
                .iter()
                .map(|&energy| conversion.ev_to_au(energy))
                .collect(),
            azimuthal_quantum_numbers.to_vec(),
            ion_mass,
        )
    }

    /// Creates the profile of the given element, with the ion mass taken as
    /// the standard atomic weight.
    pub fn for_element(element: &ElementData, conversion: &AtomicUnitConversion) -> io::Result<Self> {
        Self::from_ionization_energies(
            element.ionization_energies,
            element.azimuthal_quantum_numbers,
            element.atomic_mass * AMU_TO_ELECTRON_MASS,
            conversion,
        )
    }

    /// Returns the atomic number, i.e. the charge of the fully stripped ion.
    pub fn atomic_number(&self) -> usize {
        self.potentials.len()
    }

    /// Returns the ionization potential of the given charge state [atomic units].
    pub fn potential(&self, charge_state: usize) -> fpl {
        self.potentials[charge_state]
    }

    /// Returns the ionization potentials of all charge states [atomic units].
    pub fn potentials(&self) -> &[fpl] {
        &self.potentials
    }

    pub fn azimuthal_quantum_number(&self, charge_state: usize) -> u32 {
        self.azimuthal_quantum_numbers[charge_state]
    }

    pub fn azimuthal_quantum_numbers(&self) -> &[u32] {
        &self.azimuthal_quantum_numbers
    }

    /// Returns the ion mass [electron masses].
    pub fn ion_mass(&self) -> fpl {
        self.ion_mass
    }

    /// Returns the electron to ion mass ratio.
    pub fn inverse_mass(&self) -> fpl {
        1.0 / self.ion_mass
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plasma::ionization::tables::find_element;
    use approx::assert_relative_eq;

    #[test]
    fn element_profile_is_in_atomic_units() {
        let conversion = AtomicUnitConversion::for_reference_wavelength(0.8e-6).unwrap();
        let profile =
            IonizationProfile::for_element(find_element("H").unwrap(), &conversion).unwrap();
        assert_eq!(profile.atomic_number(), 1);
        assert_relative_eq!(profile.potential(0), 13.598_434 / 27.2116);
        assert_relative_eq!(profile.inverse_mass(), 1.0 / (1.008 * AMU_TO_ELECTRON_MASS));
    }

    #[test]
    fn invalid_species_data_is_rejected() {
        let kind = |result: io::Result<IonizationProfile>| result.unwrap_err().kind();
        assert_eq!(
            kind(IonizationProfile::new(Vec::new(), Vec::new(), 1.0)),
            io::ErrorKind::InvalidInput
        );
        assert_eq!(
            kind(IonizationProfile::new(vec![0.5, 1.0], vec![0], 1.0)),
            io::ErrorKind::InvalidInput
        );
        assert_eq!(
            kind(IonizationProfile::new(vec![0.5, 0.0], vec![0, 0], 1.0)),
            io::ErrorKind::InvalidInput
        );
        assert_eq!(
            kind(IonizationProfile::new(vec![0.5, -1.0], vec![0, 0], 1.0)),
            io::ErrorKind::InvalidInput
        );
        assert_eq!(
            kind(IonizationProfile::new(vec![0.5], vec![0], 0.0)),
            io::ErrorKind::InvalidInput
        );
    }
}
