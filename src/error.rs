//! Error construction helpers and macros for terminating the command line
//! program on errors.

use std::{fmt, io};

/// Creates an error signalling an invalid configuration parameter.
pub fn invalid_input<M: fmt::Display>(message: M) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message.to_string())
}

/// Returns an `InvalidInput` error with the given message unless the condition holds.
pub fn require<M: fmt::Display>(condition: bool, message: M) -> io::Result<()> {
    if condition {
        Ok(())
    } else {
        Err(invalid_input(message))
    }
}

#[cfg(not(feature = "for-testing"))]
#[macro_export]
macro_rules! exit_with_error {
    ($($print_arg:tt)*) => {{
        eprintln!($($print_arg)*);
        quit::with_code(1);
    }};
}

#[cfg(feature = "for-testing")]
#[macro_export]
macro_rules! exit_with_error {
    ($($print_arg:tt)*) => {{
        panic!($($print_arg)*);
    }};
}

#[macro_export]
macro_rules! exit_on_error {
    ($result:expr, $($print_arg:tt)*) => {
        match $result {
            Ok(value) => value,
            Err(err) => {
                $crate::exit_with_error!($($print_arg)*, err)
            }
        }
    };
}

#[macro_export]
macro_rules! exit_on_false {
    ($logic:expr, $($print_arg:tt)*) => {
        if $logic {
            true
        } else {
            $crate::exit_with_error!($($print_arg)*)
        }
    };
}

#[macro_export]
macro_rules! exit_on_none {
    ($option:expr, $($print_arg:tt)*) => {
        $option.unwrap_or_else(|| $crate::exit_with_error!($($print_arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_requirement_gives_invalid_input() {
        assert!(require(true, "unused").is_ok());
        let err = require(1 > 2, format!("{} is not larger than {}", 1, 2)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert_eq!(err.to_string(), "1 is not larger than 2");
    }
}
