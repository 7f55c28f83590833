//! Error types for chernoff-rs.
//!
//! Every argument-validation failure in the numerical core is reported as
//! [`Error::InvalidArgument`] and aborts the offending call entirely; there is
//! no recoverable/fatal distinction inside the core. The `ensure!` and `fail!`
//! macros are shorthand for the common check-and-return patterns.

use thiserror::Error;

/// The top-level error type used throughout chernoff-rs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// An argument failed validation at the entry of a call.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// General runtime error.
    #[error("{0}")]
    Runtime(String),
}

/// Shorthand `Result` type used throughout chernoff-rs.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Validate an argument precondition.
///
/// Returns `Err(Error::InvalidArgument(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use ch_core::{ensure, errors::Error};
/// fn positive(x: f64) -> ch_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidArgument(
                format!($($msg)*)
            ));
        }
    };
}

/// Abort the current call with a runtime error.
///
/// Returns `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use ch_core::{fail, errors::Error};
/// fn always_err() -> ch_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_bounds(lo: f64, hi: f64) -> Result<()> {
        crate::ensure!(hi > lo, "upper bound ({hi}) must exceed lower bound ({lo})");
        Ok(())
    }

    #[test]
    fn ensure_passes_and_fails() {
        assert!(check_bounds(0.0, 1.0).is_ok());
        let err = check_bounds(1.0, 0.0).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(err.to_string().contains("upper bound"));
    }

    #[test]
    fn error_display() {
        let err = Error::InvalidArgument("grid must have at least 2 points".into());
        assert_eq!(
            err.to_string(),
            "invalid argument: grid must have at least 2 points"
        );
    }
}
