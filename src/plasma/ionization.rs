//! Ionization of ion macro-particles by the local electric field.

pub mod profile;
pub mod rate;
pub mod tables;
pub mod tunnel;

use self::{profile::IonizationProfile, tunnel::TunnelIonization};
use super::fpl;
use crate::{
    error::invalid_input,
    field::LocalFields,
    particles::Particles,
    projection::CurrentProjector,
    units::AtomicUnitConversion,
};
use rand::Rng;
use std::{
    fmt, io,
    ops::{AddAssign, Range},
    str::FromStr,
};

#[cfg(feature = "serialization")]
use serde::Serialize;

/// Summary of the ionization performed on a batch of ions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct IonizationStatistics {
    /// Number of ions that were not skipped.
    pub n_processed_ions: usize,
    /// Number of ions that lost at least one electron.
    pub n_ionized_ions: usize,
    /// Number of charge state transitions summed over all ions.
    pub n_liberated_electrons: usize,
    /// Total weight of the spawned electron macro-particles.
    pub liberated_electron_weight: fpl,
}

impl IonizationStatistics {
    /// Records the outcome for a processed ion with the given weight.
    pub fn record(&mut self, n_ionizations: usize, weight: fpl) {
        self.n_processed_ions += 1;
        if n_ionizations > 0 {
            self.n_ionized_ions += 1;
            self.n_liberated_electrons += n_ionizations;
            self.liberated_electron_weight += (n_ionizations as fpl) * weight;
        }
    }
}

impl AddAssign for IonizationStatistics {
    fn add_assign(&mut self, other: Self) {
        self.n_processed_ions += other.n_processed_ions;
        self.n_ionized_ions += other.n_ionized_ions;
        self.n_liberated_electrons += other.n_liberated_electrons;
        self.liberated_electron_weight += other.liberated_electron_weight;
    }
}

/// Defines the properties of an ionization model that can be applied to a
/// batch of ion macro-particles each time step.
pub trait Ionization {
    /// Ionizes the ions with indices in the given range, using the field
    /// sample with the same index in `fields`.
    ///
    /// Charges of ionized ions are increased in place, one electron
    /// macro-particle per ionized ion is appended to `new_electrons`, and the
    /// ionization current of every processed ion is handed to the projector.
    /// One number is drawn from `rng` for each processed ion, in index order.
    ///
    /// # Panics
    ///
    /// If the range exceeds the number of ions or field samples, or if
    /// `new_electrons` has a different dimensionality than `ions`.
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
        P: CurrentProjector;

    /// Like `ionize`, but processes chunks of the range in parallel, each
    /// with an independent random stream seeded from `rng`.
    ///
    /// Currents are deposited and electrons appended in index order after
    /// all chunks have been processed.
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
        P: CurrentProjector;
}

/// Ionization model that leaves all ions untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoIonization;

impl Ionization for NoIonization {
    fn ionize<R, P>(
        &self,
        _ions: &mut Particles,
        _range: Range<usize>,
        _fields: &[LocalFields],
        _projector: &mut P,
        _rng: &mut R,
        _new_electrons: &mut Particles,
    ) -> IonizationStatistics
    where
        R: Rng + ?Sized,
        P: CurrentProjector,
    {
        IonizationStatistics::default()
    }

    fn par_ionize<R, P>(
        &self,
        _ions: &mut Particles,
        _range: Range<usize>,
        _fields: &[LocalFields],
        _projector: &mut P,
        _rng: &mut R,
        _new_electrons: &mut Particles,
    ) -> IonizationStatistics
    where
        R: Rng + ?Sized,
        P: CurrentProjector,
    {
        IonizationStatistics::default()
    }
}

/// Available ionization models.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub enum IonizationModelType {
    None,
    Tunnel,
}

impl IonizationModelType {
    pub const NAMES: [&'static str; 2] = ["none", "tunnel"];

    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Tunnel => "tunnel",
        }
    }
}

impl FromStr for IonizationModelType {
    type Err = io::Error;

    fn from_str(name: &str) -> io::Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "tunnel" => Ok(Self::Tunnel),
            _ => Err(invalid_input(format!(
                "Invalid ionization model {}, must be one of {}",
                name,
                Self::NAMES.join(", ")
            ))),
        }
    }
}

impl fmt::Display for IonizationModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Ionization model selected for an ion species.
#[derive(Clone, Debug)]
pub enum SpeciesIonization {
    None(NoIonization),
    Tunnel(TunnelIonization),
}

impl SpeciesIonization {
    /// Creates the ionization model of the given type for a species with the
    /// given profile and time step [normalized].
    pub fn new(
        model_type: IonizationModelType,
        profile: IonizationProfile,
        conversion: &AtomicUnitConversion,
        dt: fpl,
    ) -> io::Result<Self> {
        Ok(match model_type {
            IonizationModelType::None => Self::None(NoIonization),
            IonizationModelType::Tunnel => {
                Self::Tunnel(TunnelIonization::new(profile, conversion, dt)?)
            }
        })
    }

    pub fn model_type(&self) -> IonizationModelType {
        match self {
            Self::None(_) => IonizationModelType::None,
            Self::Tunnel(_) => IonizationModelType::Tunnel,
        }
    }
}

impl Ionization for SpeciesIonization {
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
        match self {
            Self::None(model) => model.ionize(ions, range, fields, projector, rng, new_electrons),
            Self::Tunnel(model) => {
                model.ionize(ions, range, fields, projector, rng, new_electrons)
            }
        }
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
        match self {
            Self::None(model) => {
                model.par_ionize(ions, range, fields, projector, rng, new_electrons)
            }
            Self::Tunnel(model) => {
                model.par_ionize(ions, range, fields, projector, rng, new_electrons)
            }
        }
    }
}
