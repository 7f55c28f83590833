//! # ch-math
//!
//! Mathematical utilities for chernoff-rs: the discretized-function grid with
//! boundary-clamped linear interpolation, and the standard normal
//! distribution functions used by the closed-form reference formula.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Standard normal distribution functions.
pub mod distributions;

/// Uniformly sampled function representation with linear interpolation.
pub mod grid;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use distributions::{normal_cdf, normal_pdf};
pub use grid::DiscretizedFunction;
