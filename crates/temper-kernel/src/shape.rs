//! Shape function value tables.

use crate::error::KernelError;

/// Values of `n_fns` shape functions at `n_qp` quadrature points.
///
/// Stored function-major: `values[i * n_qp + qp]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeTable {
    n_fns: usize,
    n_qp: usize,
    values: Vec<f64>,
}

impl ShapeTable {
    /// Wrap precomputed values, function-major.
    pub fn new(n_fns: usize, n_qp: usize, values: Vec<f64>) -> Result<Self, KernelError> {
        let expected = n_fns * n_qp;
        if values.len() != expected {
            return Err(KernelError::ShapeMismatch {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self {
            n_fns,
            n_qp,
            values,
        })
    }

    /// Tabulate `f(i, qp)`.
    pub fn from_fn(n_fns: usize, n_qp: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut values = Vec::with_capacity(n_fns * n_qp);
        for i in 0..n_fns {
            for qp in 0..n_qp {
                values.push(f(i, qp));
            }
        }
        Self {
            n_fns,
            n_qp,
            values,
        }
    }

    /// Every function equal to `value` at every point.
    pub fn constant(n_fns: usize, n_qp: usize, value: f64) -> Self {
        Self {
            n_fns,
            n_qp,
            values: vec![value; n_fns * n_qp],
        }
    }

    /// Number of shape functions.
    pub fn n_fns(&self) -> usize {
        self.n_fns
    }

    /// Number of quadrature points.
    pub fn n_qp(&self) -> usize {
        self.n_qp
    }

    /// Value of function `i` at point `qp`.
    #[inline]
    pub fn value(&self, i: usize, qp: usize) -> f64 {
        self.values[i * self.n_qp + qp]
    }

    /// All quadrature point values of function `i`.
    pub fn function(&self, i: usize) -> &[f64] {
        &self.values[i * self.n_qp..(i + 1) * self.n_qp]
    }
}
