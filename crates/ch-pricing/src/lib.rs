//! # ch-pricing
//!
//! Maps financial parameters to the coefficients of the pricing operator and
//! exposes the two entry points callers use:
//! [`price_option`](model::price_option) (fixed iteration count) and
//! [`price_option_adaptive`](model::price_option_adaptive) (error-controlled).
//!
//! The governing equation is the Black-Scholes PDE
//! `∂V/∂t + ½σ(S)²S²·∂²V/∂S² + r(S)S·∂V/∂S − r(S)V = 0`,
//! expressed through the operator coefficients
//! `a(x) = ½σ(x)²x²`, `b(x) = r(x)x`, `c(x) = −r(x)`.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Closed-form Black-Scholes reference formula.
pub mod black_scholes;

/// Operator coefficients, volatility/rate builders, and pricing entry points.
pub mod model;

/// Option types and payoff functions.
pub mod payoff;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use black_scholes::black_scholes_price;
pub use model::{
    constant_rate, constant_volatility, diffusion_coefficient, discount_coefficient,
    drift_coefficient, local_volatility, price_option, price_option_adaptive, variable_rate,
    PricingResult,
};
pub use payoff::{DigitalPayoff, OptionType, Payoff, PlainVanillaPayoff};
