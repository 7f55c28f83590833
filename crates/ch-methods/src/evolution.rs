//! Chernoff product-formula approximation of `e^{tL}`.
//!
//! The one-step operator translates the function along shifts derived from
//! the diffusion and drift coefficients and adds a reaction term:
//!
//! ```text
//! S(t)f(x) = ¼·f(x + 2√(|a(x)|·t)) + ¼·f(x − 2√(|a(x)|·t))
//!          + ½·f(x + 2·b(x)·t) + t·c(x)·f(x)
//! ```
//!
//! Composing `S(t/n)` with itself `n` times approximates `e^{tL}f`. Shifted
//! query points fall between mesh nodes and are read through the grid's
//! interpolated lookup.

use ch_core::{ensure, errors::Result, Real, Size, Time};
use ch_math::DiscretizedFunction;
use tracing::debug;

/// Iteration count the adaptive refinement starts from.
pub const INITIAL_ADAPTIVE_STEPS: Size = 100;

/// A coefficient or payoff function `R → R`.
pub type RealFn<'a> = Box<dyn Fn(Real) -> Real + 'a>;

/// Outcome of an adaptive evolution run.
///
/// Non-convergence is a normal outcome, not an error: `converged` is false
/// and `solution` holds the best available result together with its
/// empirical error estimate.
#[derive(Debug)]
pub struct EvolutionResult {
    /// The evolved function on the mesh.
    pub solution: DiscretizedFunction,
    /// Sup-norm difference between the last two refinements, or
    /// `f64::INFINITY` when only one refinement was evaluated.
    pub error_estimate: Real,
    /// The iteration count whose result is returned.
    pub iterations: Size,
    /// Whether the error estimate met the requested tolerance.
    pub converged: bool,
}

/// Approximates the evolution operator of
/// `L = a(x)·f''(x) + b(x)·f'(x) + c(x)·f(x)` on a uniform mesh.
///
/// Built once per pricing call; the coefficients and mesh parameters are
/// immutable for its lifetime.
pub struct EvolutionEngine<'a> {
    a: RealFn<'a>,
    b: RealFn<'a>,
    c: RealFn<'a>,
    x_min: Real,
    x_max: Real,
    grid_size: Size,
}

impl<'a> EvolutionEngine<'a> {
    /// Create an engine for the operator with diffusion `a`, drift `b`, and
    /// reaction `c` on `grid_size` mesh points over `[x_min, x_max]`.
    ///
    /// Mesh parameters are validated when the first evolution runs.
    pub fn new(
        a: impl Fn(Real) -> Real + 'a,
        b: impl Fn(Real) -> Real + 'a,
        c: impl Fn(Real) -> Real + 'a,
        x_min: Real,
        x_max: Real,
        grid_size: Size,
    ) -> Self {
        Self {
            a: Box::new(a),
            b: Box::new(b),
            c: Box::new(c),
            x_min,
            x_max,
            grid_size,
        }
    }

    /// Apply a single Chernoff step of length `dt`, reading from `current`
    /// and writing every mesh point of `next`.
    ///
    /// Transient negative diffusion values are clamped via `abs` before the
    /// square root.
    fn apply_step(&self, current: &DiscretizedFunction, next: &mut DiscretizedFunction, dt: Real) {
        next.initialize(|x| {
            let diffusion_shift = 2.0 * ((self.a)(x).abs() * dt).sqrt();
            let drift_shift = 2.0 * (self.b)(x) * dt;

            0.25 * current.evaluate(x + diffusion_shift)
                + 0.25 * current.evaluate(x - diffusion_shift)
                + 0.5 * current.evaluate(x + drift_shift)
                + dt * (self.c)(x) * current.evaluate(x)
        });
    }

    /// Approximate `e^{time·L}·payoff` with a fixed iteration count.
    ///
    /// Initializes a working mesh with `payoff` and applies the Chernoff step
    /// `steps` times with `dt = time/steps`, exchanging the two mesh buffers
    /// after each step. Identical inputs always produce identical output.
    ///
    /// # Errors
    /// Returns `InvalidArgument` when `steps` is zero, `time` is negative, or
    /// the mesh parameters are invalid.
    pub fn evolve(
        &self,
        payoff: &dyn Fn(Real) -> Real,
        time: Time,
        steps: Size,
    ) -> Result<DiscretizedFunction> {
        ensure!(steps > 0, "number of iterations must be positive");
        ensure!(time >= 0.0, "evolution time must be non-negative, got {time}");

        let dt = time / steps as Real;

        let mut current = DiscretizedFunction::new(self.x_min, self.x_max, self.grid_size)?;
        let mut next = current.clone();
        current.initialize(payoff);

        for _ in 0..steps {
            self.apply_step(&current, &mut next, dt);
            std::mem::swap(&mut current, &mut next);
        }

        Ok(current)
    }

    /// Approximate `e^{time·L}·payoff` with adaptive error control.
    ///
    /// Starting from [`INITIAL_ADAPTIVE_STEPS`], the iteration count is
    /// doubled until the sup-norm difference between successive refinements
    /// drops to `tolerance` or the next candidate would exceed
    /// `max_iterations`. The stopping decision is driven solely by that
    /// empirical difference; the theoretical bound is logged per refinement
    /// as a diagnostic only.
    ///
    /// On non-convergence the result carries `converged = false` and the
    /// last fully evaluated refinement together with its iteration count.
    ///
    /// # Errors
    /// Returns `InvalidArgument` when `time` is negative, the mesh parameters
    /// are invalid, or `max_iterations` is below the initial iteration count
    /// (in which case not even one refinement could be evaluated).
    pub fn evolve_adaptive(
        &self,
        payoff: &dyn Fn(Real) -> Real,
        time: Time,
        tolerance: Real,
        max_iterations: Size,
    ) -> Result<EvolutionResult> {
        ensure!(
            max_iterations >= INITIAL_ADAPTIVE_STEPS,
            "max_iterations ({max_iterations}) must be at least {INITIAL_ADAPTIVE_STEPS}"
        );

        let c_norm = self.reaction_norm_estimate()?;

        let mut n = INITIAL_ADAPTIVE_STEPS;
        let mut last = self.evolve(payoff, time, n)?;
        let mut last_n = n;
        let mut error = f64::INFINITY;

        n *= 2;
        while n <= max_iterations {
            let current = self.evolve(payoff, time, n)?;
            error = sup_norm_difference(&last, &current);

            let bound = time * time * (c_norm * time).exp() / n as Real;
            debug!(
                iterations = n,
                empirical_error = error,
                theoretical_bound = bound,
                "chernoff refinement"
            );

            if error <= tolerance {
                return Ok(EvolutionResult {
                    solution: current,
                    error_estimate: error,
                    iterations: n,
                    converged: true,
                });
            }

            last = current;
            last_n = n;
            n *= 2;
        }

        Ok(EvolutionResult {
            solution: last,
            error_estimate: error,
            iterations: last_n,
            converged: false,
        })
    }

    /// A priori error bound `t²·e^{‖c‖·t}/n` for an evolution over `time`
    /// with `steps` iterations, with `‖c‖` estimated as the largest `|c(x)|`
    /// over the mesh abscissas.
    ///
    /// Diagnostic only; the adaptive stopping rule does not consult it.
    pub fn theoretical_error_bound(&self, time: Time, steps: Size) -> Result<Real> {
        ensure!(steps > 0, "number of iterations must be positive");
        let c_norm = self.reaction_norm_estimate()?;
        Ok(time * time * (c_norm * time).exp() / steps as Real)
    }

    /// Largest `|c(x)|` over the mesh abscissas.
    fn reaction_norm_estimate(&self) -> Result<Real> {
        let mesh = DiscretizedFunction::new(self.x_min, self.x_max, self.grid_size)?;
        Ok(mesh
            .abscissas()
            .iter()
            .fold(0.0, |acc, &x| acc.max((self.c)(x).abs())))
    }
}

/// Sup-norm of the pointwise difference between two grids, sampled at the
/// abscissas of the first.
fn sup_norm_difference(lhs: &DiscretizedFunction, rhs: &DiscretizedFunction) -> Real {
    lhs.abscissas()
        .iter()
        .fold(0.0, |acc, &x| acc.max((lhs.evaluate(x) - rhs.evaluate(x)).abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pure_discounting_engine(rate: Real) -> EvolutionEngine<'static> {
        EvolutionEngine::new(|_| 0.0, |_| 0.0, move |_| -rate, 0.0, 10.0, 101)
    }

    #[test]
    fn evolve_rejects_invalid_arguments() {
        let engine = pure_discounting_engine(0.05);
        assert!(engine.evolve(&|x| x, 1.0, 0).is_err());
        assert!(engine.evolve(&|x| x, -1.0, 10).is_err());

        let bad_mesh = EvolutionEngine::new(|_| 0.0, |_| 0.0, |_| 0.0, 5.0, 1.0, 101);
        assert!(bad_mesh.evolve(&|x| x, 1.0, 10).is_err());
    }

    #[test]
    fn zero_operator_preserves_the_function() {
        // With a = b = c = 0 the step reduces to ¼f + ¼f + ½f = f.
        let engine = EvolutionEngine::new(|_| 0.0, |_| 0.0, |_| 0.0, 0.0, 1.0, 51);
        let evolved = engine.evolve(&|x| 3.0 * x + 1.0, 2.0, 25).unwrap();
        for (&x, &v) in evolved.abscissas().iter().zip(evolved.values()) {
            assert!((v - (3.0 * x + 1.0)).abs() < 1e-12, "x = {x}, v = {v}");
        }
    }

    #[test]
    fn zero_time_returns_the_payoff() {
        let engine = pure_discounting_engine(0.05);
        let evolved = engine.evolve(&|x| x * x, 0.0, 10).unwrap();
        for (&x, &v) in evolved.abscissas().iter().zip(evolved.values()) {
            assert!((v - x * x).abs() < 1e-12);
        }
    }

    #[test]
    fn pure_reaction_term_discounts_exponentially() {
        // a = b = 0, c = -r evolves f ↦ (1 - r·dt)^n · f → e^{-rT}·f.
        let rate = 0.05;
        let engine = pure_discounting_engine(rate);
        let evolved = engine.evolve(&|_| 1.0, 1.0, 2000).unwrap();
        let expected = (-rate * 1.0_f64).exp();
        for &v in evolved.values() {
            approx::assert_abs_diff_eq!(v, expected, epsilon = 1e-4);
        }
    }

    #[test]
    fn fixed_evolution_is_deterministic() {
        let engine = EvolutionEngine::new(
            |x| 0.02 * x * x,
            |x| 0.05 * x,
            |_| -0.05,
            1.0,
            10.0,
            201,
        );
        let first = engine.evolve(&|x| (x - 5.0).max(0.0), 1.0, 100).unwrap();
        let second = engine.evolve(&|x| (x - 5.0).max(0.0), 1.0, 100).unwrap();
        assert_eq!(first.values(), second.values());
    }

    #[test]
    fn adaptive_rejects_cap_below_initial_count() {
        let engine = pure_discounting_engine(0.05);
        assert!(engine
            .evolve_adaptive(&|_| 1.0, 1.0, 1e-6, INITIAL_ADAPTIVE_STEPS - 1)
            .is_err());
    }

    #[test]
    fn adaptive_converges_on_smooth_problem() {
        let engine = pure_discounting_engine(0.05);
        let result = engine
            .evolve_adaptive(&|_| 1.0, 1.0, 1e-6, 100_000)
            .unwrap();
        assert!(result.converged);
        assert!(result.error_estimate <= 1e-6);
        assert!(result.iterations >= 2 * INITIAL_ADAPTIVE_STEPS);
        // Reported count is the one whose solution is returned.
        let same = engine.evolve(&|_| 1.0, 1.0, result.iterations).unwrap();
        assert_eq!(result.solution.values(), same.values());
    }

    #[test]
    fn adaptive_reports_last_evaluated_count_on_failure() {
        // Cap below the first doubling: exactly one refinement runs, no
        // difference can be formed, and the estimate stays infinite.
        let engine = pure_discounting_engine(0.05);
        let result = engine
            .evolve_adaptive(&|_| 1.0, 1.0, 1e-12, 150)
            .unwrap();
        assert!(!result.converged);
        assert_eq!(result.iterations, INITIAL_ADAPTIVE_STEPS);
        assert!(result.error_estimate.is_infinite());
    }

    #[test]
    fn adaptive_non_convergence_keeps_best_result() {
        // An unreachable tolerance exhausts the cap; the result must match
        // the fixed evolution at the reported iteration count.
        let engine = pure_discounting_engine(0.05);
        let result = engine.evolve_adaptive(&|_| 1.0, 1.0, 0.0, 1000).unwrap();
        assert!(!result.converged);
        assert_eq!(result.iterations, 800);
        assert!(result.error_estimate.is_finite());
        let same = engine.evolve(&|_| 1.0, 1.0, 800).unwrap();
        assert_eq!(result.solution.values(), same.values());
    }

    #[test]
    fn theoretical_bound_decreases_with_iterations() {
        let engine = pure_discounting_engine(0.05);
        let coarse = engine.theoretical_error_bound(1.0, 100).unwrap();
        let fine = engine.theoretical_error_bound(1.0, 200).unwrap();
        assert!(coarse > 0.0);
        assert!(fine < coarse);
        assert!((coarse / fine - 2.0).abs() < 1e-12);
    }
}
