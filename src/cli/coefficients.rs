//! Command line interface for printing tunneling rate coefficients.

use super::utils::get_finite_float_value_from_parseable_argument_with_default;
use crate::{
    exit_on_error, exit_on_false, exit_on_none,
    io::utils::write_text_file,
    plasma::{
        fpl,
        ionization::{
            profile::IonizationProfile,
            rate::RateCoefficientTable,
            tables::{find_element, ElementData},
        },
    },
    simulation::IonizationSimulationConfig,
    units::AtomicUnitConversion,
};
use clap::{Arg, ArgMatches, Command};
use std::fmt::Write;

/// Field strength [atomic units] at which rates are evaluated by default.
const DEFAULT_FIELD_STRENGTH: fpl = 0.1;

/// Creates a subcommand for printing rate coefficients.
pub fn create_coefficients_subcommand() -> Command {
    Command::new("coefficients")
        .about("Print tunneling rate coefficients for each charge state of an element")
        .arg(
            Arg::new("element")
                .value_name("ELEMENT")
                .required(true)
                .help("Chemical symbol or name of the element"),
        )
        .arg(
            Arg::new("field-strength")
                .short('E')
                .long("field-strength")
                .value_name("VALUE")
                .help("Field strength [atomic units] at which to evaluate the rates [default: 0.1]"),
        )
        .arg(
            Arg::new("reference-wavelength")
                .short('w')
                .long("reference-wavelength")
                .value_name("VALUE")
                .help("Wavelength [m] defining the reference frequency [default: 8e-7]"),
        )
        .arg(
            Arg::new("output-file")
                .short('o')
                .long("output-file")
                .value_name("OUTPUT_FILE")
                .help("Write the table to the given file instead of printing it"),
        )
}

/// Runs the actions for the `coefficients` subcommand using the given arguments.
pub fn run_coefficients_subcommand(arguments: &ArgMatches) {
    let element_name = exit_on_none!(
        arguments.get_one::<String>("element"),
        "Error: No element specified"
    );
    let element = exit_on_error!(find_element(element_name), "Error: {}");

    let field_strength = get_finite_float_value_from_parseable_argument_with_default(
        arguments,
        "field-strength",
        DEFAULT_FIELD_STRENGTH,
    );
    exit_on_false!(
        field_strength > 0.0,
        "Error: Field strength must be larger than zero"
    );
    let reference_wavelength = get_finite_float_value_from_parseable_argument_with_default(
        arguments,
        "reference-wavelength",
        IonizationSimulationConfig::DEFAULT_REFERENCE_WAVELENGTH,
    );

    let conversion = exit_on_error!(
        AtomicUnitConversion::for_reference_wavelength(reference_wavelength),
        "Error: Invalid reference wavelength: {}"
    );
    let profile = exit_on_error!(
        IonizationProfile::for_element(element, &conversion),
        "Error: Invalid ionization data: {}"
    );
    let coefficients = exit_on_error!(
        RateCoefficientTable::for_profile(&profile, conversion.au_to_w0),
        "Error: Could not compute rate coefficients: {}"
    );

    let table = format_coefficient_table(element, &profile, &coefficients, field_strength);

    match arguments.get_one::<String>("output-file") {
        Some(output_file_path) => exit_on_error!(
            write_text_file(&table, output_file_path),
            "Error: Could not write coefficient table: {}"
        ),
        None => print!("{}", table),
    }
}

fn format_coefficient_table(
    element: &ElementData,
    profile: &IonizationProfile,
    coefficients: &RateCoefficientTable,
    field_strength: fpl,
) -> String {
    let mut table = String::new();
    // Writing to a string cannot fail
    let _ = writeln!(
        table,
        "# {} ({}), rates at E = {} au in units of the reference frequency",
        element.name,
        element.symbol,
        field_strength
    );
    let _ = writeln!(
        table,
        "# {:>3} {:>12} {:>3} {:>12} {:>12} {:>12} {:>12}",
        "Z", "potential", "l", "alpha", "beta", "gamma", "rate"
    );
    for charge_state in 0..profile.atomic_number() {
        let _ = writeln!(
            table,
            "{:>5} {:>12.5e} {:>3} {:>12.5e} {:>12.5e} {:>12.5e} {:>12.5e}",
            charge_state,
            profile.potential(charge_state),
            profile.azimuthal_quantum_number(charge_state),
            coefficients.alpha(charge_state),
            coefficients.beta(charge_state),
            coefficients.gamma(charge_state),
            coefficients.rate(charge_state, 1.0 / field_strength)
        );
    }
    table
}
