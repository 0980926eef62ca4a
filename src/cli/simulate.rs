//! Command line interface for simulating ionization of an ion ensemble.

use super::utils::{
    create_verbosity_args, get_finite_float_value_from_parseable_argument_with_default,
    get_value_from_parseable_argument, parse_verbosity,
};
use crate::{
    exit_on_error,
    plasma::{fpl, ionization::IonizationModelType},
    simulation::{ChargeStateHistory, IonizationSimulationConfig, IonizationSimulator},
};
use clap::{Arg, ArgAction, ArgMatches, Command};

/// Creates a subcommand for simulating ionization in a uniform field.
pub fn create_simulate_subcommand() -> Command {
    let command = Command::new("simulate")
        .about("Simulate ionization of ions at rest in a uniform oscillating electric field")
        .long_about(
            "Simulate ionization of ions at rest in a uniform oscillating electric field.\n\
             The field is E_x = a*cos(w*t) in units normalized to the reference frequency.",
        )
        .arg(
            Arg::new("element")
                .short('e')
                .long("element")
                .value_name("ELEMENT")
                .help("Chemical symbol or name of the ion species [default: C]"),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("NAME")
                .help("Ionization model to use (none or tunnel) [default: tunnel]"),
        )
        .arg(
            Arg::new("initial-charge")
                .short('Z')
                .long("initial-charge")
                .value_name("VALUE")
                .help("Initial charge state of the ions [default: 0]"),
        )
        .arg(
            Arg::new("n-ions")
                .short('n')
                .long("n-ions")
                .value_name("NUMBER")
                .help("Number of ion macro-particles [default: 10000]"),
        )
        .arg(
            Arg::new("ion-weight")
                .long("ion-weight")
                .value_name("VALUE")
                .help("Statistical weight of each ion macro-particle [default: 1]"),
        )
        .arg(
            Arg::new("amplitude")
                .short('a')
                .long("amplitude")
                .value_name("VALUE")
                .help("Electric field amplitude [normalized] [default: 0.05]"),
        )
        .arg(
            Arg::new("frequency")
                .short('f')
                .long("frequency")
                .value_name("VALUE")
                .help("Angular frequency of the field [normalized], zero for static [default: 1]"),
        )
        .arg(
            Arg::new("dt")
                .long("dt")
                .value_name("VALUE")
                .help("Time step [normalized] [default: 0.05]"),
        )
        .arg(
            Arg::new("steps")
                .short('s')
                .long("steps")
                .value_name("NUMBER")
                .help("Number of time steps [default: 400]"),
        )
        .arg(
            Arg::new("reference-wavelength")
                .short('w')
                .long("reference-wavelength")
                .value_name("VALUE")
                .help("Wavelength [m] defining the reference frequency [default: 8e-7]"),
        )
        .arg(
            Arg::new("grid-cells")
                .long("grid-cells")
                .value_name("NUMBER")
                .help("Number of grid cells for current deposition [default: 64]"),
        )
        .arg(
            Arg::new("domain-length")
                .long("domain-length")
                .value_name("VALUE")
                .help("Length of the domain [normalized] [default: 10]"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("NUMBER")
                .help("Seed for the random number generator [default: from entropy]"),
        )
        .arg(
            Arg::new("serial")
                .long("serial")
                .action(ArgAction::SetTrue)
                .help("Process the ions on a single thread"),
        )
        .args(create_verbosity_args());

    #[cfg(feature = "json")]
    let command = command.arg(
        Arg::new("output-file")
            .short('o')
            .long("output-file")
            .value_name("OUTPUT_FILE")
            .help("Save the charge state history as JSON to the given path"),
    );

    command
}

/// Runs the actions for the `simulate` subcommand using the given arguments.
pub fn run_simulate_subcommand(arguments: &ArgMatches) {
    let config = configure_simulation_from_arguments(arguments);
    let verbosity = parse_verbosity(arguments);

    let simulator = exit_on_error!(
        IonizationSimulator::new(config, verbosity),
        "Error: Could not set up simulation: {}"
    );
    let history = simulator.run();

    print_summary(&history);

    #[cfg(feature = "json")]
    if let Some(output_file_path) = arguments.get_one::<String>("output-file") {
        exit_on_error!(
            history.save_as_json(output_file_path),
            "Error: Could not save charge state history: {}"
        );
    }
}

fn configure_simulation_from_arguments(arguments: &ArgMatches) -> IonizationSimulationConfig {
    let default = IonizationSimulationConfig::default();
    IonizationSimulationConfig {
        element: get_value_from_parseable_argument(arguments, "element")
            .unwrap_or(default.element),
        model_type: get_value_from_parseable_argument::<IonizationModelType>(arguments, "model")
            .unwrap_or(default.model_type),
        initial_charge_state: get_value_from_parseable_argument(arguments, "initial-charge")
            .unwrap_or(default.initial_charge_state),
        n_ions: get_value_from_parseable_argument(arguments, "n-ions").unwrap_or(default.n_ions),
        ion_weight: get_finite_float_value_from_parseable_argument_with_default(
            arguments,
            "ion-weight",
            default.ion_weight,
        ),
        field_amplitude: get_finite_float_value_from_parseable_argument_with_default(
            arguments,
            "amplitude",
            default.field_amplitude,
        ),
        field_angular_frequency: get_finite_float_value_from_parseable_argument_with_default(
            arguments,
            "frequency",
            default.field_angular_frequency,
        ),
        dt: get_finite_float_value_from_parseable_argument_with_default(
            arguments,
            "dt",
            default.dt,
        ),
        n_steps: get_value_from_parseable_argument(arguments, "steps").unwrap_or(default.n_steps),
        reference_wavelength: get_finite_float_value_from_parseable_argument_with_default(
            arguments,
            "reference-wavelength",
            default.reference_wavelength,
        ),
        n_grid_cells: get_value_from_parseable_argument(arguments, "grid-cells")
            .unwrap_or(default.n_grid_cells),
        domain_length: get_finite_float_value_from_parseable_argument_with_default(
            arguments,
            "domain-length",
            default.domain_length,
        ),
        seed: get_value_from_parseable_argument(arguments, "seed"),
        parallel: !arguments.get_flag("serial"),
    }
}

fn print_summary(history: &ChargeStateHistory) {
    let final_weights = history.final_charge_state_weights();
    let total_weight: fpl = final_weights.iter().sum();
    println!("Final charge state populations of {}:", history.element());
    for (charge_state, weight) in final_weights.iter().enumerate() {
        println!(
            "  Z = {:>2}: {:>8.4} %",
            charge_state,
            100.0 * weight / total_weight
        );
    }
    let statistics = history.statistics();
    println!(
        "Ionization events: {} ({} electrons, total electron weight {:.6e})",
        statistics.n_ionized_ions,
        statistics.n_liberated_electrons,
        statistics.liberated_electron_weight
    );
}
