//! File input/output and status reporting.

pub mod utils;

use indicatif::{ProgressBar, ProgressStyle};

/// How much non-critical status information to print.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Messages,
    Progress,
}

impl Verbosity {
    /// Determines the verbosity from the given command line flags.
    pub fn from_flags(verbose: bool, show_progress: bool) -> Self {
        if show_progress {
            Self::Progress
        } else if verbose {
            Self::Messages
        } else {
            Self::Quiet
        }
    }

    /// Whether status messages should be printed.
    pub fn print_messages(&self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Whether progress bars should be shown.
    pub fn show_progress(&self) -> bool {
        matches!(self, Self::Progress)
    }

    /// Creates a progress bar for the given number of steps, hidden unless
    /// progress should be shown.
    pub fn create_progress_bar(&self, n_steps: u64, message: &'static str) -> ProgressBar {
        if !self.show_progress() {
            return ProgressBar::hidden();
        }
        let progress_bar = ProgressBar::new(n_steps);
        if let Ok(style) =
            ProgressStyle::with_template("{msg} [{elapsed_precise}] {wide_bar} {pos}/{len}")
        {
            progress_bar.set_style(style);
        }
        progress_bar.set_message(message);
        progress_bar
    }
}
