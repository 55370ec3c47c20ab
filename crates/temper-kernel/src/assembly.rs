//! Element-level integration of kernel contributions.
//!
//! [`ElementAssembler`] sums a kernel's quadrature point integrands
//! weighted by `JxW` into a local residual vector and local Jacobian
//! blocks. Scattering into the global system is the caller's job.

use temper_core::VarId;

use crate::context::KernelContext;
use crate::error::KernelError;
use crate::kernel::Kernel;

/// Dense row-major local matrix, rows are test functions and columns
/// trial functions.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl LocalMatrix {
    /// A zero matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Entry `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.cols + j]
    }

    #[inline]
    fn add(&mut self, i: usize, j: usize, value: f64) {
        self.data[i * self.cols + j] += value;
    }

    /// Row-major entries.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

/// Integrates one kernel over one element.
///
/// Every entry point first runs [`Kernel::check_context`], so a kernel
/// set up on one region's layout fails loudly when handed another
/// region's buffers.
pub struct ElementAssembler<'k, K: Kernel + ?Sized> {
    kernel: &'k K,
}

impl<'k, K: Kernel + ?Sized> ElementAssembler<'k, K> {
    /// Assemble with `kernel`.
    pub fn new(kernel: &'k K) -> Self {
        Self { kernel }
    }

    /// Local residual, one entry per test function.
    pub fn residual(&self, ctx: &KernelContext<'_>) -> Result<Vec<f64>, KernelError> {
        self.kernel.check_context(ctx)?;
        let mut local = vec![0.0; ctx.n_test()];
        for qp in 0..ctx.n_qp() {
            let jxw = ctx.jxw(qp);
            for (i, r) in local.iter_mut().enumerate() {
                *r += jxw * self.kernel.qp_residual(ctx, i, qp);
            }
        }
        Ok(local)
    }

    /// Local Jacobian block with respect to the kernel's own variable.
    pub fn jacobian(&self, ctx: &KernelContext<'_>) -> Result<LocalMatrix, KernelError> {
        self.kernel.check_context(ctx)?;
        let mut local = LocalMatrix::zeros(ctx.n_test(), ctx.n_trial());
        for qp in 0..ctx.n_qp() {
            let jxw = ctx.jxw(qp);
            for i in 0..ctx.n_test() {
                for j in 0..ctx.n_trial() {
                    local.add(i, j, jxw * self.kernel.qp_jacobian(ctx, i, j, qp));
                }
            }
        }
        Ok(local)
    }

    /// Local Jacobian block with respect to the global variable `jvar`.
    ///
    /// `jvar` is mapped to its local coupling index once, before the
    /// quadrature loop. Fails with [`KernelError::UnmappedVariable`] if
    /// the kernel is not coupled to it.
    pub fn off_diag_jacobian(
        &self,
        ctx: &KernelContext<'_>,
        jvar: VarId,
    ) -> Result<LocalMatrix, KernelError> {
        self.kernel.check_context(ctx)?;
        let cvar = self.kernel.map_jvar(jvar)?;
        Ok(self.integrate_coupled(ctx, cvar))
    }

    /// Off-diagonal blocks for every coupled variable other than the
    /// kernel's own, in coupling order.
    pub fn coupled_jacobians(
        &self,
        ctx: &KernelContext<'_>,
    ) -> Result<Vec<(VarId, LocalMatrix)>, KernelError> {
        self.kernel.check_context(ctx)?;
        let own = self.kernel.variable();
        let coupled = self.kernel.jvar_map().coupled();
        Ok(coupled
            .iter()
            .enumerate()
            .filter(|&(_, &jvar)| jvar != own)
            .map(|(cvar, &jvar)| (jvar, self.integrate_coupled(ctx, cvar)))
            .collect())
    }

    fn integrate_coupled(&self, ctx: &KernelContext<'_>, cvar: usize) -> LocalMatrix {
        let mut local = LocalMatrix::zeros(ctx.n_test(), ctx.n_trial());
        for qp in 0..ctx.n_qp() {
            let jxw = ctx.jxw(qp);
            for i in 0..ctx.n_test() {
                for j in 0..ctx.n_trial() {
                    local.add(
                        i,
                        j,
                        jxw * self.kernel.qp_off_diag_jacobian(ctx, cvar, i, j, qp),
                    );
                }
            }
        }
        local
    }
}
