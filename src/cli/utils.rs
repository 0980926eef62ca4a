//! Utilities for creating the command line interface.

use crate::{exit_on_error, exit_on_false, io::Verbosity, num::BFloat};
use clap::{Arg, ArgAction, ArgMatches};
use std::str::FromStr;

pub fn parse_value_string<T>(argument_name: &str, value_string: &str) -> T
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    exit_on_error!(
        value_string.parse(),
        "Error: Could not parse value for {0}: {1}",
        argument_name
    )
}

pub fn get_value_from_required_parseable_argument<T>(
    arguments: &ArgMatches,
    argument_name: &str,
) -> T
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    parse_value_string(
        argument_name,
        arguments
            .get_one::<String>(argument_name)
            .expect("No value for required argument"),
    )
}

pub fn get_value_from_parseable_argument<T>(
    arguments: &ArgMatches,
    argument_name: &str,
) -> Option<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Display,
{
    arguments
        .get_one::<String>(argument_name)
        .map(|value_string| parse_value_string(argument_name, value_string))
}

pub fn get_finite_float_value_from_parseable_argument_with_default<F>(
    arguments: &ArgMatches,
    argument_name: &str,
    default_value: F,
) -> F
where
    F: BFloat + FromStr,
    <F as FromStr>::Err: std::fmt::Display,
{
    let value =
        get_value_from_parseable_argument(arguments, argument_name).unwrap_or(default_value);
    verify_finite_float_value(argument_name, value);
    value
}

pub fn verify_finite_float_value<F: BFloat>(argument_name: &str, value: F) {
    exit_on_false!(
        value.is_finite(),
        "Error: Value for {} must be finite",
        argument_name
    );
}

/// Creates the `--verbose` and `--progress` flags.
pub fn create_verbosity_args() -> [Arg; 2] {
    [
        Arg::new("verbose")
            .short('v')
            .long("verbose")
            .action(ArgAction::SetTrue)
            .help("Print status messages"),
        Arg::new("progress")
            .short('p')
            .long("progress")
            .action(ArgAction::SetTrue)
            .help("Show progress bar"),
    ]
}

pub fn parse_verbosity(arguments: &ArgMatches) -> Verbosity {
    Verbosity::from_flags(arguments.get_flag("verbose"), arguments.get_flag("progress"))
}
