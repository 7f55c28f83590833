//! # ch-methods
//!
//! Numerical approximation of the evolution operator `e^{tL}` of a linear
//! second-order parabolic operator
//! `L = a(x)·f''(x) + b(x)·f'(x) + c(x)·f(x)`
//! by the Chernoff product formula: a simple one-step operator `S(t/n)` is
//! composed `n` times, with accuracy improving as `n` grows.
//!
//! # Overview
//!
//! * [`EvolutionEngine`] — applies the Chernoff step over a uniform mesh,
//!   with a fixed-iteration mode and an adaptive error-controlled mode
//! * [`EvolutionResult`] — solution grid plus convergence diagnostics

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Chernoff product-formula evolution.
pub mod evolution;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use evolution::{EvolutionEngine, EvolutionResult, INITIAL_ADAPTIVE_STEPS};
