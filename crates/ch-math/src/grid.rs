//! Discretized function representation on a uniform 1-D mesh.
//!
//! A [`DiscretizedFunction`] stores a function sampled at equally spaced
//! abscissas and evaluates it anywhere in between by linear interpolation.
//! Queries outside the mesh clamp to the boundary samples rather than
//! extrapolating. The evolution engine keeps exactly two of these alive per
//! run and exchanges them by move after every step.

use ch_core::{ensure, errors::Result, Real, Size};

/// A function sampled on a uniform mesh over `[x_min, x_max]`.
///
/// The abscissas are strictly increasing and fixed at construction; only
/// [`initialize`](DiscretizedFunction::initialize) and
/// [`set_values`](DiscretizedFunction::set_values) mutate the sample values,
/// and the sample array always has the same length as the mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscretizedFunction {
    xs: Vec<Real>,
    values: Vec<Real>,
    x_min: Real,
    x_max: Real,
    dx: Real,
}

impl DiscretizedFunction {
    /// Create a mesh of `n` equally spaced points on `[x_min, x_max]`, with
    /// all sample values set to zero.
    ///
    /// # Errors
    /// Returns `InvalidArgument` when `n < 2` or `x_max <= x_min`.
    pub fn new(x_min: Real, x_max: Real, n: Size) -> Result<Self> {
        ensure!(n >= 2, "grid must have at least 2 points, got {n}");
        ensure!(
            x_max > x_min,
            "x_max ({x_max}) must be greater than x_min ({x_min})"
        );

        let dx = (x_max - x_min) / (n - 1) as Real;
        let xs: Vec<Real> = (0..n).map(|i| x_min + i as Real * dx).collect();

        Ok(Self {
            xs,
            values: vec![0.0; n],
            x_min,
            x_max,
            dx,
        })
    }

    /// Sample `f` at every abscissa, overwriting the stored values.
    pub fn initialize(&mut self, f: impl Fn(Real) -> Real) {
        for (v, &x) in self.values.iter_mut().zip(&self.xs) {
            *v = f(x);
        }
    }

    /// Evaluate the function at `x` by linear interpolation.
    ///
    /// Queries at or beyond the mesh boundaries return the boundary sample
    /// (clamp, not extrapolation). Exact mesh hits return the stored value.
    pub fn evaluate(&self, x: Real) -> Real {
        let n = self.xs.len();
        // Clamp against the stored abscissas; the last one can differ from
        // x_max by a rounding ulp.
        if x <= self.xs[0] {
            return self.values[0];
        }
        if x >= self.xs[n - 1] {
            return self.values[n - 1];
        }

        // Index of the first abscissa strictly above x; x is bracketed by
        // [xs[i], xs[i+1]] with i in [0, n-2].
        let i = self.xs.partition_point(|&xi| xi <= x) - 1;

        let x0 = self.xs[i];
        let x1 = self.xs[i + 1];
        let f0 = self.values[i];
        let f1 = self.values[i + 1];

        let alpha = (x - x0) / (x1 - x0);
        f0 + alpha * (f1 - f0)
    }

    /// Replace the sample array wholesale.
    ///
    /// # Errors
    /// Returns `InvalidArgument` when `values` does not match the mesh length.
    pub fn set_values(&mut self, values: &[Real]) -> Result<()> {
        ensure!(
            values.len() == self.values.len(),
            "value array length ({}) must match grid size ({})",
            values.len(),
            self.values.len()
        );
        self.values.copy_from_slice(values);
        Ok(())
    }

    /// Sup-norm of the stored samples.
    pub fn max_abs_value(&self) -> Real {
        self.values.iter().fold(0.0, |acc, v| acc.max(v.abs()))
    }

    /// The mesh abscissas.
    pub fn abscissas(&self) -> &[Real] {
        &self.xs
    }

    /// The stored sample values.
    pub fn values(&self) -> &[Real] {
        &self.values
    }

    /// Number of mesh points.
    pub fn len(&self) -> Size {
        self.xs.len()
    }

    /// Always false; construction requires at least 2 points.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Lower mesh boundary.
    pub fn x_min(&self) -> Real {
        self.x_min
    }

    /// Upper mesh boundary.
    pub fn x_max(&self) -> Real {
        self.x_max
    }

    /// Mesh spacing.
    pub fn dx(&self) -> Real {
        self.dx
    }
}
