//! Coefficients of the tunneling ionization rate.

use super::{super::fpl, profile::IonizationProfile};
use crate::error::{invalid_input, require};
use special::Gamma;
use std::io;

#[cfg(feature = "serialization")]
use serde::Serialize;

const ONE_THIRD: fpl = 1.0 / 3.0;

/// Precomputed coefficients of the tunneling rate for every charge state of
/// a species.
///
/// With `E` the field strength and `delta = gamma[Z]/E`, both in atomic units,
/// the rate of ionization from charge state `Z` is
/// `beta[Z]*exp(-delta/3 + alpha[Z]*ln(delta))`, in units of the reference
/// frequency.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct RateCoefficientTable {
    alpha: Vec<fpl>,
    beta: Vec<fpl>,
    gamma: Vec<fpl>,
}

impl RateCoefficientTable {
    /// Computes the coefficients from the ionization potentials [atomic units]
    /// and azimuthal quantum numbers of each charge state, using the given
    /// factor for converting atomic frequencies to the reference frequency.
    pub fn new(
        potentials: &[fpl],
        azimuthal_quantum_numbers: &[u32],
        au_to_w0: fpl,
    ) -> io::Result<Self> {
        require(!potentials.is_empty(), "Atomic number must be at least one")?;
        require(
            potentials.len() == azimuthal_quantum_numbers.len(),
            "Number of potentials and azimuthal quantum numbers differ",
        )?;
        require(
            au_to_w0.is_finite() && au_to_w0 > 0.0,
            format!("Invalid frequency conversion factor {}", au_to_w0),
        )?;

        let atomic_number = potentials.len();
        let mut alpha = Vec::with_capacity(atomic_number);
        let mut beta = Vec::with_capacity(atomic_number);
        let mut gamma = Vec::with_capacity(atomic_number);

        for (charge_state, (&potential, &azimuthal_quantum_number)) in potentials
            .iter()
            .zip(azimuthal_quantum_numbers.iter())
            .enumerate()
        {
            if !(potential.is_finite() && potential > 0.0) {
                return Err(invalid_input(format!(
                    "Invalid ionization potential {} for charge state {}",
                    potential, charge_state
                )));
            }
            let cst = ((charge_state + 1) as fpl) * fpl::sqrt(2.0 / potential);
            let alpha_z = cst - 1.0;
            alpha.push(alpha_z);
            beta.push(
                fpl::powf(2.0, alpha_z) * (8.0 * (azimuthal_quantum_number as fpl) + 4.0)
                    / (cst * Gamma::gamma(cst))
                    * potential
                    * au_to_w0,
            );
            gamma.push(2.0 * fpl::powf(2.0 * potential, 1.5));
        }

        Ok(Self { alpha, beta, gamma })
    }

    /// Computes the coefficients for the given species profile.
    pub fn for_profile(profile: &IonizationProfile, au_to_w0: fpl) -> io::Result<Self> {
        Self::new(
            profile.potentials(),
            profile.azimuthal_quantum_numbers(),
            au_to_w0,
        )
    }

    /// Returns the number of charge states covered by the table.
    pub fn atomic_number(&self) -> usize {
        self.alpha.len()
    }

    pub fn alpha(&self, charge_state: usize) -> fpl {
        self.alpha[charge_state]
    }

    pub fn beta(&self, charge_state: usize) -> fpl {
        self.beta[charge_state]
    }

    pub fn gamma(&self, charge_state: usize) -> fpl {
        self.gamma[charge_state]
    }

    /// Evaluates the tunneling ionization rate of the given charge state for
    /// a field with the given inverse strength [inverse atomic units].
    #[inline]
    pub fn rate(&self, charge_state: usize, inverse_field_strength: fpl) -> fpl {
        let delta = self.gamma[charge_state] * inverse_field_strength;
        self.beta[charge_state]
            * fpl::exp(-delta * ONE_THIRD + self.alpha[charge_state] * fpl::ln(delta))
    }

    /// Returns the field strength [atomic units] above which the rate of the
    /// given charge state stops increasing with field strength, or infinity
    /// if it increases for all field strengths.
    pub fn peak_rate_field_strength(&self, charge_state: usize) -> fpl {
        let alpha = self.alpha[charge_state];
        if alpha > 0.0 {
            self.gamma[charge_state] / (3.0 * alpha)
        } else {
            fpl::INFINITY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    const CARBON_POTENTIALS: [fpl; 6] = [
        0.413_80, 0.896_06, 1.759_83, 2.370_07, 14.408_7, 18.006_6,
    ];
    const CARBON_AZIMUTHAL: [u32; 6] = [1, 1, 0, 0, 0, 0];
    const AU_TO_W0: fpl = 17.5;

    #[test]
    fn coefficients_follow_closed_form_expressions() {
        let table =
            RateCoefficientTable::new(&CARBON_POTENTIALS, &CARBON_AZIMUTHAL, AU_TO_W0).unwrap();
        assert_eq!(table.atomic_number(), 6);

        for (z, &potential) in CARBON_POTENTIALS.iter().enumerate() {
            let cst = (z as fpl + 1.0) * (2.0 / potential).sqrt();
            assert_relative_eq!(table.alpha(z), cst - 1.0, max_relative = 1e-14);
            assert!(table.beta(z) > 0.0);
            assert!(table.gamma(z) > 0.0);
            assert_relative_eq!(
                table.gamma(z),
                2.0 * (2.0 * potential).powf(1.5),
                max_relative = 1e-14
            );
        }
    }

    #[test]
    fn hydrogen_ground_state_coefficients_match_hand_calculation() {
        // With a potential of 1/2 atomic unit, cst = 2 and Gamma(2) = 1
        let table = RateCoefficientTable::new(&[0.5], &[0], 1.0).unwrap();
        assert_abs_diff_eq!(table.alpha(0), 1.0, epsilon = 1e-14);
        assert_abs_diff_eq!(table.beta(0), 2.0 * 4.0 / 2.0 * 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(table.gamma(0), 2.0, epsilon = 1e-14);
        assert_abs_diff_eq!(
            table.rate(0, 1.0 / 0.1),
            2.0 * fpl::exp(-20.0 / 3.0) * 20.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn construction_is_deterministic() {
        let first =
            RateCoefficientTable::new(&CARBON_POTENTIALS, &CARBON_AZIMUTHAL, AU_TO_W0).unwrap();
        let second =
            RateCoefficientTable::new(&CARBON_POTENTIALS, &CARBON_AZIMUTHAL, AU_TO_W0).unwrap();
        for z in 0..6 {
            assert_eq!(first.alpha(z).to_bits(), second.alpha(z).to_bits());
            assert_eq!(first.beta(z).to_bits(), second.beta(z).to_bits());
            assert_eq!(first.gamma(z).to_bits(), second.gamma(z).to_bits());
        }
    }

    #[test]
    fn rate_increases_with_field_strength_in_tunneling_regime() {
        let table =
            RateCoefficientTable::new(&CARBON_POTENTIALS, &CARBON_AZIMUTHAL, AU_TO_W0).unwrap();
        for z in 0..6 {
            let max_field = fpl::min(table.peak_rate_field_strength(z), 100.0);
            let mut previous_rate = 0.0;
            for i in 1..=200 {
                let field_strength = max_field * (i as fpl) / 200.0;
                let rate = table.rate(z, 1.0 / field_strength);
                assert!(
                    rate > previous_rate || (rate == 0.0 && previous_rate == 0.0),
                    "Rate for Z = {} not increasing at E = {}",
                    z,
                    field_strength
                );
                previous_rate = rate;
            }
            assert!(previous_rate > 0.0);
        }
    }

    #[test]
    fn invalid_species_data_is_rejected() {
        assert!(RateCoefficientTable::new(&[], &[], AU_TO_W0).is_err());
        assert!(RateCoefficientTable::new(&[0.5, 0.0], &[0, 0], AU_TO_W0).is_err());
        assert!(RateCoefficientTable::new(&[0.5, -2.0], &[0, 0], AU_TO_W0).is_err());
        assert!(RateCoefficientTable::new(&[0.5, fpl::NAN], &[0, 0], AU_TO_W0).is_err());
        assert!(RateCoefficientTable::new(&[0.5], &[0, 1], AU_TO_W0).is_err());
        assert!(RateCoefficientTable::new(&[0.5], &[0], 0.0).is_err());
    }
}
