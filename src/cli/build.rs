//! Function for building the command line hierarchy.

use super::{
    coefficients::create_coefficients_subcommand, simulate::create_simulate_subcommand,
};
use clap::{self, Arg, ArgAction, Command};

/// Build the `fieldion` command line hierarchy.
pub fn build() -> Command {
    Command::new(clap::crate_name!())
        .version(clap::crate_version!())
        .about(clap::crate_description!())
        .disable_help_subcommand(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("timing")
                .short('t')
                .long("timing")
                .action(ArgAction::SetTrue)
                .help("Display elapsed time when done"),
        )
        .subcommand(create_coefficients_subcommand())
        .subcommand(create_simulate_subcommand())
}
