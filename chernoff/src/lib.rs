//! # chernoff
//!
//! Approximates the evolution operator `e^{tL}` of a linear second-order
//! parabolic operator with the Chernoff product formula, specialised to
//! European option pricing under the Black-Scholes equation with optionally
//! state-dependent coefficients.
//!
//! This crate is a **façade** that re-exports the public items of the
//! underlying workspace crates. Application code should depend on this crate
//! rather than the individual `ch-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use chernoff::pricing::{constant_rate, constant_volatility, price_option, OptionType};
//!
//! let price = price_option(
//!     OptionType::Call,
//!     100.0,                      // spot
//!     100.0,                      // strike
//!     1.0,                        // maturity in years
//!     constant_volatility(0.20),
//!     constant_rate(0.05),
//!     200,                        // Chernoff iterations
//!     201,                        // mesh points
//! )
//! .unwrap();
//! assert!(price > 0.0);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use ch_core as core;

/// Discretized functions, interpolation, and math utilities.
pub use ch_math as math;

/// The Chernoff evolution engine.
pub use ch_methods as methods;

/// Coefficient mapping, payoffs, and pricing entry points.
pub use ch_pricing as pricing;
