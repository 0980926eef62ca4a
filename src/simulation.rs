//! Time stepping of an ensemble of ions exposed to a uniform oscillating
//! electric field.

use crate::{
    error::require,
    field::{ffl, CurrentDensity, LocalFields},
    geometry::Vec3,
    grid::{fgr, RegularGrid},
    io::Verbosity,
    particles::Particles,
    plasma::{
        fpl,
        ionization::{
            profile::IonizationProfile, tables::find_element, Ionization, IonizationModelType,
            IonizationStatistics, SpeciesIonization,
        },
    },
    projection::LinearProjector,
    random::create_rng,
    units::{fun, AtomicUnitConversion},
};
use rand::rngs::StdRng;
use std::io;

#[cfg(feature = "serialization")]
use serde::Serialize;

#[cfg(feature = "json")]
use crate::io::utils::save_data_as_json;
#[cfg(feature = "json")]
use std::path::Path;

/// Configuration parameters for ionization simulations.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct IonizationSimulationConfig {
    /// Chemical symbol or name of the ion species.
    pub element: String,
    /// Ionization model to apply.
    pub model_type: IonizationModelType,
    /// Charge state of all ions at the start of the simulation.
    pub initial_charge_state: usize,
    /// Number of ion macro-particles.
    pub n_ions: usize,
    /// Statistical weight of each ion macro-particle.
    pub ion_weight: fpl,
    /// Amplitude of the electric field [normalized].
    pub field_amplitude: ffl,
    /// Angular frequency of the electric field [normalized]. Zero gives a
    /// static field.
    pub field_angular_frequency: ffl,
    /// Duration of each time step [normalized].
    pub dt: fpl,
    /// Number of time steps to perform.
    pub n_steps: usize,
    /// Wavelength corresponding to the reference frequency [m].
    pub reference_wavelength: fun,
    /// Number of grid cells along the domain.
    pub n_grid_cells: usize,
    /// Length of the domain [normalized].
    pub domain_length: fgr,
    /// Seed for the random number generator. Uses system entropy if absent.
    pub seed: Option<u64>,
    /// Whether to process the ions in parallel.
    pub parallel: bool,
}

impl IonizationSimulationConfig {
    pub const DEFAULT_ELEMENT: &'static str = "C";
    pub const DEFAULT_MODEL_TYPE: IonizationModelType = IonizationModelType::Tunnel;
    pub const DEFAULT_INITIAL_CHARGE_STATE: usize = 0;
    pub const DEFAULT_N_IONS: usize = 10_000;
    pub const DEFAULT_ION_WEIGHT: fpl = 1.0;
    pub const DEFAULT_FIELD_AMPLITUDE: ffl = 0.05;
    pub const DEFAULT_FIELD_ANGULAR_FREQUENCY: ffl = 1.0;
    pub const DEFAULT_DT: fpl = 0.05;
    pub const DEFAULT_N_STEPS: usize = 400;
    pub const DEFAULT_REFERENCE_WAVELENGTH: fun = 0.8e-6; // [m]
    pub const DEFAULT_N_GRID_CELLS: usize = 64;
    pub const DEFAULT_DOMAIN_LENGTH: fgr = 10.0;
    pub const DEFAULT_PARALLEL: bool = true;

    /// Returns an error if any of the configuration parameter values are
    /// invalid.
    pub fn validate(&self) -> io::Result<()> {
        require(self.n_ions > 0, "Number of ions must be larger than zero")?;
        require(
            self.ion_weight.is_finite() && self.ion_weight > 0.0,
            "Ion weight must be finite and larger than zero",
        )?;
        require(
            self.field_amplitude.is_finite(),
            "Field amplitude must be finite",
        )?;
        require(
            self.field_angular_frequency.is_finite() && self.field_angular_frequency >= 0.0,
            "Field angular frequency must be finite and larger than or equal to zero",
        )?;
        require(
            self.dt.is_finite() && self.dt > 0.0,
            "Time step must be finite and larger than zero",
        )?;
        require(
            self.n_grid_cells > 0,
            "Number of grid cells must be larger than zero",
        )?;
        require(
            self.domain_length.is_finite() && self.domain_length > 0.0,
            "Domain length must be finite and larger than zero",
        )
    }
}

impl Default for IonizationSimulationConfig {
    fn default() -> Self {
        IonizationSimulationConfig {
            element: Self::DEFAULT_ELEMENT.to_string(),
            model_type: Self::DEFAULT_MODEL_TYPE,
            initial_charge_state: Self::DEFAULT_INITIAL_CHARGE_STATE,
            n_ions: Self::DEFAULT_N_IONS,
            ion_weight: Self::DEFAULT_ION_WEIGHT,
            field_amplitude: Self::DEFAULT_FIELD_AMPLITUDE,
            field_angular_frequency: Self::DEFAULT_FIELD_ANGULAR_FREQUENCY,
            dt: Self::DEFAULT_DT,
            n_steps: Self::DEFAULT_N_STEPS,
            reference_wavelength: Self::DEFAULT_REFERENCE_WAVELENGTH,
            n_grid_cells: Self::DEFAULT_N_GRID_CELLS,
            domain_length: Self::DEFAULT_DOMAIN_LENGTH,
            seed: None,
            parallel: Self::DEFAULT_PARALLEL,
        }
    }
}

/// Evolution of the charge state populations of an ion ensemble.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct ChargeStateHistory {
    element: String,
    atomic_number: usize,
    times: Vec<fpl>,
    charge_state_weights: Vec<Vec<fpl>>,
    electron_weights: Vec<fpl>,
    statistics: IonizationStatistics,
    deposited_current_totals: Vec3<ffl>,
}

impl ChargeStateHistory {
    fn new(element: String, atomic_number: usize) -> Self {
        Self {
            element,
            atomic_number,
            times: Vec::new(),
            charge_state_weights: Vec::new(),
            electron_weights: Vec::new(),
            statistics: IonizationStatistics::default(),
            deposited_current_totals: Vec3::zero(),
        }
    }

    fn record(&mut self, time: fpl, ions: &Particles, electrons: &Particles) {
        self.times.push(time);
        self.charge_state_weights
            .push(ions.weight_by_charge(self.atomic_number));
        self.electron_weights.push(electrons.total_weight());
    }

    pub fn element(&self) -> &str {
        &self.element
    }

    pub fn atomic_number(&self) -> usize {
        self.atomic_number
    }

    /// Returns the number of recorded states, including the initial state.
    pub fn n_records(&self) -> usize {
        self.times.len()
    }

    /// Returns the time of each record [normalized].
    pub fn times(&self) -> &[fpl] {
        &self.times
    }

    /// Returns the total ion weight in each charge state for the given record.
    pub fn charge_state_weights(&self, record_idx: usize) -> &[fpl] {
        &self.charge_state_weights[record_idx]
    }

    /// Returns the total ion weight in each charge state at the end.
    pub fn final_charge_state_weights(&self) -> &[fpl] {
        self.charge_state_weights
            .last()
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns the total weight of liberated electrons at each record.
    pub fn electron_weights(&self) -> &[fpl] {
        &self.electron_weights
    }

    /// Computes the weight-averaged charge state for the given record.
    pub fn mean_charge_state(&self, record_idx: usize) -> fpl {
        let weights = &self.charge_state_weights[record_idx];
        let total_weight: fpl = weights.iter().sum();
        if total_weight == 0.0 {
            return 0.0;
        }
        weights
            .iter()
            .enumerate()
            .map(|(charge_state, &weight)| (charge_state as fpl) * weight)
            .sum::<fpl>()
            / total_weight
    }

    /// Returns the accumulated ionization statistics.
    pub fn statistics(&self) -> &IonizationStatistics {
        &self.statistics
    }

    /// Returns the sum of all ionization current deposited on the grid.
    pub fn deposited_current_totals(&self) -> &Vec3<ffl> {
        &self.deposited_current_totals
    }

    /// Serializes the history into JSON format and saves at the given path.
    #[cfg(feature = "json")]
    pub fn save_as_json<P: AsRef<Path>>(&self, file_path: P) -> io::Result<()> {
        save_data_as_json(file_path, self)
    }
}

/// Ensemble of ions at rest on a one-dimensional domain, ionized by a uniform
/// electric field `E_x = a cos(w t)`.
#[derive(Debug)]
pub struct IonizationSimulator {
    config: IonizationSimulationConfig,
    ionization: SpeciesIonization,
    history: ChargeStateHistory,
    ions: Particles,
    electrons: Particles,
    grid: RegularGrid,
    step_currents: CurrentDensity,
    accumulated_currents: CurrentDensity,
    rng: StdRng,
    verbosity: Verbosity,
}

impl IonizationSimulator {
    /// Sets up a new simulation with the given configuration.
    pub fn new(config: IonizationSimulationConfig, verbosity: Verbosity) -> io::Result<Self> {
        config.validate()?;

        let element = find_element(&config.element)?;
        let conversion =
            AtomicUnitConversion::for_reference_wavelength(config.reference_wavelength)?;
        let profile = IonizationProfile::for_element(element, &conversion)?;
        let atomic_number = profile.atomic_number();
        require(
            config.initial_charge_state <= atomic_number,
            format!(
                "Initial charge state {} exceeds atomic number {} of {}",
                config.initial_charge_state, atomic_number, element.name
            ),
        )?;

        let ionization =
            SpeciesIonization::new(config.model_type, profile, &conversion, config.dt)?;

        let grid = RegularGrid::new(
            &[config.n_grid_cells + 1],
            &[0.0],
            &[config.domain_length],
        )?;
        let step_currents = CurrentDensity::zeros(&grid);
        let accumulated_currents = CurrentDensity::zeros(&grid);

        let mut ions = Particles::with_capacity(1, config.n_ions);
        let spacing = config.domain_length / (config.n_ions as fgr);
        for idx in 0..config.n_ions {
            ions.create_particle(
                &[((idx as fgr) + 0.5) * spacing],
                &Vec3::zero(),
                config.ion_weight,
                config.initial_charge_state as i32,
            );
        }

        if verbosity.print_messages() {
            println!(
                "Simulating {} ionization of {} {} ions over {} steps",
                config.model_type, config.n_ions, element.name, config.n_steps
            );
        }

        Ok(Self {
            rng: create_rng(config.seed),
            history: ChargeStateHistory::new(element.symbol.to_string(), atomic_number),
            ionization,
            ions,
            electrons: Particles::new(1),
            grid,
            step_currents,
            accumulated_currents,
            config,
            verbosity,
        })
    }

    /// Evaluates the uniform electric field at the given time.
    pub fn field_at(&self, time: fpl) -> LocalFields {
        Vec3::new(
            self.config.field_amplitude * ffl::cos(self.config.field_angular_frequency * time),
            0.0,
            0.0,
        )
    }

    /// Returns the ion macro-particles.
    pub fn ions(&self) -> &Particles {
        &self.ions
    }

    /// Returns all electron macro-particles created so far.
    pub fn electrons(&self) -> &Particles {
        &self.electrons
    }

    /// Returns the ionization current deposited during the last step.
    pub fn step_currents(&self) -> &CurrentDensity {
        &self.step_currents
    }

    /// Advances the ensemble by a single time step starting at the given time.
    pub fn step(&mut self, time: fpl) -> IonizationStatistics {
        let fields = vec![self.field_at(time); self.ions.len()];
        let mut new_electrons = Particles::new(self.ions.n_dims());
        let range = 0..self.ions.len();

        self.step_currents.reset();
        let statistics = {
            let mut projector = LinearProjector::new(&self.grid, &mut self.step_currents);
            if self.config.parallel {
                self.ionization.par_ionize(
                    &mut self.ions,
                    range,
                    &fields,
                    &mut projector,
                    &mut self.rng,
                    &mut new_electrons,
                )
            } else {
                self.ionization.ionize(
                    &mut self.ions,
                    range,
                    &fields,
                    &mut projector,
                    &mut self.rng,
                    &mut new_electrons,
                )
            }
        };
        self.accumulated_currents.accumulate(&self.step_currents);
        self.electrons.append(&mut new_electrons);
        statistics
    }

    /// Performs all time steps and returns the recorded charge state history.
    pub fn run(mut self) -> ChargeStateHistory {
        let progress_bar = self
            .verbosity
            .create_progress_bar(self.config.n_steps as u64, "Ionizing");

        self.history.record(0.0, &self.ions, &self.electrons);

        for step_idx in 0..self.config.n_steps {
            let time = (step_idx as fpl) * self.config.dt;
            let statistics = self.step(time);
            self.history.statistics += statistics;
            self.history
                .record(time + self.config.dt, &self.ions, &self.electrons);
            progress_bar.inc(1);
        }
        progress_bar.finish_and_clear();

        self.history.deposited_current_totals = self.accumulated_currents.totals();

        if self.verbosity.print_messages() {
            println!(
                "Mean charge state after {} steps: {:.3}",
                self.config.n_steps,
                self.history.mean_charge_state(self.history.n_records() - 1)
            );
        }
        self.history
    }
}
