//! Per-element inputs shared by every kernel on the element.

use temper_core::LayoutId;
use temper_material::{PropertyBuffers, PropertySlot};

use crate::error::KernelError;
use crate::shape::ShapeTable;

/// Test and trial functions, quadrature weights and evaluated material
/// properties for one element.
///
/// Construction checks that every input agrees on the quadrature point
/// count, so kernels can index all of them with the same `qp`.
#[derive(Debug, Clone, Copy)]
pub struct KernelContext<'a> {
    test: &'a ShapeTable,
    phi: &'a ShapeTable,
    jxw: &'a [f64],
    props: &'a PropertyBuffers,
}

impl<'a> KernelContext<'a> {
    /// Bundle the element inputs.
    pub fn new(
        test: &'a ShapeTable,
        phi: &'a ShapeTable,
        jxw: &'a [f64],
        props: &'a PropertyBuffers,
    ) -> Result<Self, KernelError> {
        let expected = test.n_qp();
        for (what, actual) in [
            ("trial functions", phi.n_qp()),
            ("JxW", jxw.len()),
            ("property buffers", props.n_qp()),
        ] {
            if actual != expected {
                return Err(KernelError::QuadratureMismatch {
                    what,
                    expected,
                    actual,
                });
            }
        }
        Ok(Self {
            test,
            phi,
            jxw,
            props,
        })
    }

    /// Number of quadrature points.
    pub fn n_qp(&self) -> usize {
        self.test.n_qp()
    }

    /// Number of test functions.
    pub fn n_test(&self) -> usize {
        self.test.n_fns()
    }

    /// Number of trial functions.
    pub fn n_trial(&self) -> usize {
        self.phi.n_fns()
    }

    /// Test function `i` at `qp`.
    #[inline]
    pub fn test(&self, i: usize, qp: usize) -> f64 {
        self.test.value(i, qp)
    }

    /// Trial function `j` at `qp`.
    #[inline]
    pub fn phi(&self, j: usize, qp: usize) -> f64 {
        self.phi.value(j, qp)
    }

    /// Quadrature weight times Jacobian determinant at `qp`.
    #[inline]
    pub fn jxw(&self, qp: usize) -> f64 {
        self.jxw[qp]
    }

    /// Layout the property buffers were allocated for.
    pub fn layout_id(&self) -> LayoutId {
        self.props.layout_id()
    }

    /// Evaluated values of a resolved property slot.
    #[inline]
    pub fn property(&self, slot: PropertySlot) -> &'a [f64] {
        self.props.get(slot)
    }
}
