//! Tunneling ionization of ions in strong electric fields.

use super::{
    super::fpl, profile::IonizationProfile, rate::RateCoefficientTable, Ionization,
    IonizationStatistics,
};
use crate::{
    error::require,
    field::{ffl, LocalFields},
    geometry::Vec3,
    particles::{ParticleView, Particles, ELECTRON_CHARGE},
    projection::CurrentProjector,
    random::{split_rng_streams, uniform_draw},
    units::AtomicUnitConversion,
};
use rand::Rng;
use rayon::prelude::*;
use std::{io, ops::Range};

/// Number of ions handled by each worker stream in parallel ionization.
///
/// The chunking does not depend on the number of threads, so a seeded
/// generator gives the same result regardless of thread count.
pub const PARALLEL_CHUNK_SIZE: usize = 1024;

/// Outcome of sampling the ionization of a single ion over one time step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IonizationEvent {
    /// Number of electrons liberated during the step.
    pub n_ionizations: usize,
    /// Sum of the ionization potentials of the traversed charge states
    /// [atomic units].
    pub total_ionization_potential: fpl,
}

/// Working memory for sampling ionization events.
///
/// One scratch buffer is needed per worker. It holds no information between
/// particles.
#[derive(Clone, Debug)]
pub struct IonizationScratch {
    rates: Vec<fpl>,
    denominators: Vec<fpl>,
}

impl IonizationScratch {
    fn new(atomic_number: usize) -> Self {
        Self {
            rates: vec![0.0; atomic_number],
            denominators: vec![0.0; atomic_number],
        }
    }
}

/// Result of processing a single ion that was not skipped.
#[derive(Clone, Copy, Debug, PartialEq)]
struct ProcessedIon {
    event: IonizationEvent,
    current: Vec3<ffl>,
}

/// Output of one parallel worker.
#[derive(Debug)]
struct ChunkOutput {
    currents: Vec<(usize, Vec3<ffl>)>,
    electrons: Particles,
    statistics: IonizationStatistics,
}

/// Tunneling ionization model, allowing multiple sequential ionizations of
/// the same ion within a single time step.
///
/// The rates follow the ADK tunneling law. The number of ionizations is found
/// from a single random draw per ion by accumulating the probability of
/// passing through successive charge states, in the decoupled form of
/// Nuter et al. (2011), Phys. Plasmas 18, 033107.
#[derive(Clone, Debug)]
pub struct TunnelIonization {
    profile: IonizationProfile,
    coefficients: RateCoefficientTable,
    ec_to_au: fpl,
    current_factor: fpl,
    dt: fpl,
}

impl TunnelIonization {
    /// Creates a new tunneling ionization model for the given species and
    /// time step [normalized].
    pub fn new(
        profile: IonizationProfile,
        conversion: &AtomicUnitConversion,
        dt: fpl,
    ) -> io::Result<Self> {
        require(
            dt.is_finite() && dt > 0.0,
            format!("Time step must be finite and positive, got {}", dt),
        )?;
        let coefficients = RateCoefficientTable::for_profile(&profile, conversion.au_to_w0)?;
        Ok(Self {
            profile,
            coefficients,
            ec_to_au: conversion.ec_to_au,
            current_factor: conversion.au_to_mec2 * conversion.ec_to_au * conversion.ec_to_au
                / dt,
            dt,
        })
    }

    pub fn profile(&self) -> &IonizationProfile {
        &self.profile
    }

    pub fn coefficients(&self) -> &RateCoefficientTable {
        &self.coefficients
    }

    pub fn dt(&self) -> fpl {
        self.dt
    }

    /// Creates working memory for calls to `sample_event`.
    pub fn create_scratch(&self) -> IonizationScratch {
        IonizationScratch::new(self.profile.atomic_number())
    }

    /// Computes the magnitude of the given field in atomic units.
    pub fn field_strength_in_atomic_units(&self, field: &LocalFields) -> fpl {
        self.ec_to_au * field.length()
    }

    /// Determines how many electrons an ion in the given charge state loses
    /// during one time step, given the inverse field strength [inverse atomic
    /// units] and a uniform random draw in `[0, 1)`.
    ///
    /// # Panics
    ///
    /// If the ion is fully stripped, or if the scratch buffer was created for
    /// a species with lower atomic number.
    pub fn sample_event(
        &self,
        charge_state: usize,
        inverse_field_strength: fpl,
        random_draw: fpl,
        scratch: &mut IonizationScratch,
    ) -> IonizationEvent {
        let atomic_number = self.profile.atomic_number();
        assert!(
            charge_state < atomic_number,
            "Cannot ionize a fully stripped ion"
        );
        let IonizationScratch {
            rates,
            denominators,
        } = scratch;
        let dt = self.dt;

        rates[charge_state] = self.coefficients.rate(charge_state, inverse_field_strength);

        let mut event = IonizationEvent::default();

        if charge_state + 1 == atomic_number {
            if random_draw < 1.0 - fpl::exp(-rates[charge_state] * dt) {
                event.n_ionizations = 1;
                event.total_ionization_potential = self.profile.potential(charge_state);
            }
            return event;
        }

        let max_partial_ionizations = atomic_number - (charge_state + 1);

        let mut rate_product = 1.0;
        let mut cumulative_probability = fpl::exp(-rates[charge_state] * dt);
        denominators[0] = 1.0;

        let mut n_ionizations = 0;
        while cumulative_probability < random_draw && n_ionizations < max_partial_ionizations {
            let new_charge_state = charge_state + 1 + n_ionizations;
            let new_rate = self.coefficients.rate(new_charge_state, inverse_field_strength);
            rates[new_charge_state] = new_rate;

            // Uses the rate of the state being left, not the one just computed
            rate_product *= rates[charge_state + n_ionizations];

            let mut denominator_sum = 0.0;
            let mut probability_sum = 0.0;
            for (denominator, &rate) in denominators[..=n_ionizations]
                .iter_mut()
                .zip(rates[charge_state..=charge_state + n_ionizations].iter())
            {
                *denominator /= new_rate - rate;
                denominator_sum += *denominator;
                probability_sum += fpl::exp(-rate * dt) * *denominator;
            }
            denominators[n_ionizations + 1] = -denominator_sum;
            probability_sum += denominators[n_ionizations + 1] * fpl::exp(-new_rate * dt);

            cumulative_probability += probability_sum * rate_product;

            event.total_ionization_potential +=
                self.profile.potential(charge_state + n_ionizations);
            n_ionizations += 1;
        }

        if n_ionizations == max_partial_ionizations && 1.0 - cumulative_probability > random_draw {
            event.total_ionization_potential += self.profile.potential(atomic_number - 1);
            n_ionizations += 1;
        }

        event.n_ionizations = n_ionizations;
        event
    }

    /// Computes the ionization current [normalized] associated with the
    /// given total ionization potential spent in the given field.
    pub fn ionization_current(
        &self,
        field: &LocalFields,
        field_strength: fpl,
        total_ionization_potential: fpl,
    ) -> Vec3<ffl> {
        let factor = self.current_factor / (field_strength * field_strength)
            * total_ionization_potential;
        field * factor
    }

    /// Samples the ionization of a single ion and updates its charge.
    ///
    /// Returns `None` if the ion is fully stripped or sees no field, in which
    /// case no random number is drawn.
    fn process_ion<R: Rng + ?Sized>(
        &self,
        charge: &mut i32,
        field: &LocalFields,
        rng: &mut R,
        scratch: &mut IonizationScratch,
    ) -> Option<ProcessedIon> {
        let charge_state = match usize::try_from(*charge) {
            Ok(charge_state) if charge_state < self.profile.atomic_number() => charge_state,
            _ => return None,
        };
        let field_strength = self.field_strength_in_atomic_units(field);
        if field_strength == 0.0 {
            return None;
        }

        let random_draw = uniform_draw(rng);
        let event = self.sample_event(charge_state, 1.0 / field_strength, random_draw, scratch);

        *charge += event.n_ionizations as i32;

        Some(ProcessedIon {
            event,
            current: self.ionization_current(
                field,
                field_strength,
                event.total_ionization_potential,
            ),
        })
    }

    /// Adds a single electron macro-particle representing all electrons
    /// liberated from the given ion.
    fn spawn_electron(
        &self,
        ions: &ParticleView,
        idx: usize,
        n_ionizations: usize,
        electrons: &mut Particles,
    ) {
        let n_dims = ions.n_dims();
        let position = ions.position_coords(idx);
        electrons.create_particle(
            &position[..n_dims],
            &(ions.momentum(idx) * self.profile.inverse_mass()),
            (n_ionizations as fpl) * ions.weight(idx),
            ELECTRON_CHARGE,
        );
    }

    fn ionize_chunk<R: Rng + ?Sized>(
        &self,
        charges: &mut [i32],
        start_idx: usize,
        ions: &ParticleView,
        fields: &[LocalFields],
        rng: &mut R,
    ) -> ChunkOutput {
        let mut scratch = self.create_scratch();
        let mut output = ChunkOutput {
            currents: Vec::new(),
            electrons: Particles::new(ions.n_dims()),
            statistics: IonizationStatistics::default(),
        };
        for (offset, charge) in charges.iter_mut().enumerate() {
            let idx = start_idx + offset;
            if let Some(processed) = self.process_ion(charge, &fields[idx], rng, &mut scratch) {
                output.currents.push((idx, processed.current));
                let n_ionizations = processed.event.n_ionizations;
                if n_ionizations > 0 {
                    self.spawn_electron(ions, idx, n_ionizations, &mut output.electrons);
                }
                output.statistics.record(n_ionizations, ions.weight(idx));
            }
        }
        output
    }
}

fn deposit_ion_current<P: CurrentProjector>(
    projector: &mut P,
    ions: &ParticleView,
    idx: usize,
    current: &Vec3<ffl>,
) {
    let position = ions.position_coords(idx);
    projector.deposit_current(&position[..ions.n_dims()], ions.weight(idx), current);
}

fn check_batch(
    ions: &Particles,
    range: &Range<usize>,
    fields: &[LocalFields],
    new_electrons: &Particles,
) {
    assert!(
        range.start <= range.end,
        "Particle range {:?} is reversed",
        range
    );
    assert!(
        range.end <= ions.len() && range.end <= fields.len(),
        "Particle range {:?} exceeds number of ions ({}) or field samples ({})",
        range,
        ions.len(),
        fields.len()
    );
    assert_eq!(
        ions.n_dims(),
        new_electrons.n_dims(),
        "Ions and new electrons must have the same dimensionality"
    );
}

impl Ionization for TunnelIonization {
    fn ionize<R, P>(
        &self,
        ions: &mut Particles,
        range: Range<usize>,
        fields: &[LocalFields],
        projector: &mut P,
        rng: &mut R,
        new_electrons: &mut Particles,
    ) -> IonizationStatistics
    where
        R: Rng + ?Sized,
        P: CurrentProjector,
    {
        check_batch(ions, &range, fields, new_electrons);
        let (charges, view) = ions.charges_with_view_mut();

        let mut scratch = self.create_scratch();
        let mut statistics = IonizationStatistics::default();

        for idx in range {
            if let Some(processed) =
                self.process_ion(&mut charges[idx], &fields[idx], rng, &mut scratch)
            {
                deposit_ion_current(projector, &view, idx, &processed.current);
                let n_ionizations = processed.event.n_ionizations;
                if n_ionizations > 0 {
                    self.spawn_electron(&view, idx, n_ionizations, new_electrons);
                }
                statistics.record(n_ionizations, view.weight(idx));
            }
        }
        statistics
    }

    fn par_ionize<R, P>(
        &self,
        ions: &mut Particles,
        range: Range<usize>,
        fields: &[LocalFields],
        projector: &mut P,
        rng: &mut R,
        new_electrons: &mut Particles,
    ) -> IonizationStatistics
    where
        R: Rng + ?Sized,
        P: CurrentProjector,
    {
        check_batch(ions, &range, fields, new_electrons);
        let (charges, view) = ions.charges_with_view_mut();

        let n_chunks = (range.len() + PARALLEL_CHUNK_SIZE - 1) / PARALLEL_CHUNK_SIZE;
        let streams = split_rng_streams(rng, n_chunks);

        let outputs: Vec<ChunkOutput> = charges[range.clone()]
            .par_chunks_mut(PARALLEL_CHUNK_SIZE)
            .zip(streams.into_par_iter())
            .enumerate()
            .map(|(chunk_idx, (charge_chunk, mut stream))| {
                self.ionize_chunk(
                    charge_chunk,
                    range.start + chunk_idx * PARALLEL_CHUNK_SIZE,
                    &view,
                    fields,
                    &mut stream,
                )
            })
            .collect();

        let mut statistics = IonizationStatistics::default();
        for mut output in outputs {
            for (idx, current) in &output.currents {
                deposit_ion_current(projector, &view, *idx, current);
            }
            new_electrons.append(&mut output.electrons);
            statistics += output.statistics;
        }
        statistics
    }
}
