//! Black-Scholes operator coefficients and the pricing entry points.
//!
//! The Black-Scholes PDE
//! `∂V/∂t + ½σ(S)²S²·∂²V/∂S² + r(S)S·∂V/∂S − r(S)V = 0`
//! maps onto the evolution operator `L = a·∂² + b·∂ + c` through
//!
//! * `a(x) = ½·σ(x)²·x²`
//! * `b(x) = r(x)·x`
//! * `c(x) = −r(x)`
//!
//! Volatility and rate enter as arbitrary price-dependent functions, so both
//! constant-parameter and local-volatility / variable-rate models run through
//! the same path.

use crate::payoff::{OptionType, Payoff, PlainVanillaPayoff};
use ch_core::{ensure, errors::Result, Price, Rate, Real, Size, Time, Volatility};
use ch_methods::EvolutionEngine;
use serde::Serialize;

// ── Operator coefficients ────────────────────────────────────────────────────

/// Diffusion coefficient `a(x) = ½·σ(x)²·x²`.
pub fn diffusion_coefficient<'a>(
    volatility: &'a impl Fn(Real) -> Real,
) -> impl Fn(Real) -> Real + 'a {
    move |x| {
        let sigma = volatility(x);
        0.5 * sigma * sigma * x * x
    }
}

/// Drift coefficient `b(x) = r(x)·x`.
pub fn drift_coefficient<'a>(rate: &'a impl Fn(Real) -> Real) -> impl Fn(Real) -> Real + 'a {
    move |x| rate(x) * x
}

/// Reaction (discount) coefficient `c(x) = −r(x)`.
pub fn discount_coefficient<'a>(rate: &'a impl Fn(Real) -> Real) -> impl Fn(Real) -> Real + 'a {
    move |x| -rate(x)
}

// ── Volatility and rate builders ─────────────────────────────────────────────

/// Constant volatility `σ(x) = σ`.
pub fn constant_volatility(sigma: Volatility) -> impl Fn(Real) -> Real {
    move |_| sigma
}

/// Local volatility `σ(x) = σ₀ + σ₁·sin(x/S₀)`.
pub fn local_volatility(sigma0: Volatility, sigma1: Volatility, spot: Price) -> impl Fn(Real) -> Real {
    move |x| sigma0 + sigma1 * (x / spot).sin()
}

/// Constant interest rate `r(x) = r`.
pub fn constant_rate(rate: Rate) -> impl Fn(Real) -> Real {
    move |_| rate
}

/// Variable interest rate `r(x) = r₀ + r₁·(x/S₀ − 1)`.
pub fn variable_rate(r0: Rate, r1: Rate, spot: Price) -> impl Fn(Real) -> Real {
    move |x| r0 + r1 * (x / spot - 1.0)
}

// ── Pricing entry points ─────────────────────────────────────────────────────

/// Result of an adaptive pricing run.
#[derive(Debug, Clone, Serialize)]
pub struct PricingResult {
    /// Option price at the current spot.
    pub price: Price,
    /// Sup-norm difference between the last two refinements.
    pub estimated_error: Real,
    /// Iteration count whose result is reported.
    pub iterations: Size,
    /// Whether the tolerance was met within the iteration cap.
    pub converged: bool,
}

/// Mesh boundaries for a pricing run. The model is undefined at or below a
/// zero price, so the lower bound stays strictly positive.
fn mesh_bounds(spot: Price) -> (Real, Real) {
    ((0.2 * spot).max(0.01), 3.0 * spot)
}

/// Price a European option with a fixed Chernoff iteration count.
///
/// Builds the payoff and operator coefficients, evolves the payoff over the
/// time to maturity, and returns the interpolated value at `spot`.
///
/// # Errors
/// Returns `InvalidArgument` when `spot` or `strike` is non-positive, when
/// `steps` is zero, when `maturity` is negative, or when `grid_size < 2`.
#[allow(clippy::too_many_arguments)]
pub fn price_option(
    option_type: OptionType,
    spot: Price,
    strike: Price,
    maturity: Time,
    volatility: impl Fn(Real) -> Real,
    rate: impl Fn(Real) -> Real,
    steps: Size,
    grid_size: Size,
) -> Result<Price> {
    ensure!(spot > 0.0, "spot must be positive, got {spot}");
    ensure!(strike > 0.0, "strike must be positive, got {strike}");

    let (x_min, x_max) = mesh_bounds(spot);
    let payoff = PlainVanillaPayoff::new(option_type, strike);

    let engine = EvolutionEngine::new(
        diffusion_coefficient(&volatility),
        drift_coefficient(&rate),
        discount_coefficient(&rate),
        x_min,
        x_max,
        grid_size,
    );

    let solution = engine.evolve(&|x| payoff.value(x), maturity, steps)?;
    Ok(solution.evaluate(spot))
}

/// Price a European option with adaptive error control.
///
/// Identical setup to [`price_option`], delegating to the adaptive evolution:
/// the iteration count doubles until successive refinements agree within
/// `tolerance` or the cap is reached. Non-convergence is reported through
/// `converged = false`, not as an error.
///
/// # Errors
/// Returns `InvalidArgument` under the same conditions as [`price_option`],
/// or when `max_iterations` is below the initial iteration count.
#[allow(clippy::too_many_arguments)]
pub fn price_option_adaptive(
    option_type: OptionType,
    spot: Price,
    strike: Price,
    maturity: Time,
    volatility: impl Fn(Real) -> Real,
    rate: impl Fn(Real) -> Real,
    tolerance: Real,
    max_iterations: Size,
    grid_size: Size,
) -> Result<PricingResult> {
    ensure!(spot > 0.0, "spot must be positive, got {spot}");
    ensure!(strike > 0.0, "strike must be positive, got {strike}");

    let (x_min, x_max) = mesh_bounds(spot);
    let payoff = PlainVanillaPayoff::new(option_type, strike);

    let engine = EvolutionEngine::new(
        diffusion_coefficient(&volatility),
        drift_coefficient(&rate),
        discount_coefficient(&rate),
        x_min,
        x_max,
        grid_size,
    );

    let result = engine.evolve_adaptive(&|x| payoff.value(x), maturity, tolerance, max_iterations)?;

    Ok(PricingResult {
        price: result.solution.evaluate(spot),
        estimated_error: result.error_estimate,
        iterations: result.iterations,
        converged: result.converged,
    })
}
