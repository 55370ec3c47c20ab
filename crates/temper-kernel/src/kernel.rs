//! The [`Kernel`] trait.

use temper_core::{LayoutId, VarId};

use crate::context::KernelContext;
use crate::error::KernelError;
use crate::jvar::JvarMap;

/// One weak-form contribution for one nonlinear variable.
///
/// # Contract
///
/// - Every name lookup and every validation happens when the kernel is
///   built. The `qp_*` methods only index data and never fail.
/// - A kernel reading material properties reports the layout it resolved
///   against through [`layout_id`](Kernel::layout_id). Call
///   [`check_context`](Kernel::check_context) once per element before the
///   `qp_*` methods; [`ElementAssembler`](crate::ElementAssembler) does.
/// - `i` indexes test functions, `j` trial functions, `qp` quadrature
///   points of the [`KernelContext`].
/// - `cvar` is a local coupling index; map a global variable to it with
///   [`map_jvar`](Kernel::map_jvar) once per block, not per point.
pub trait Kernel {
    /// Human-readable name for diagnostics.
    fn name(&self) -> &str;

    /// The variable whose residual this kernel contributes to.
    fn variable(&self) -> VarId;

    /// Global to local coupling index map.
    fn jvar_map(&self) -> &JvarMap;

    /// Residual integrand for test function `i` at `qp`.
    fn qp_residual(&self, ctx: &KernelContext<'_>, i: usize, qp: usize) -> f64;

    /// Jacobian integrand with respect to [`variable`](Kernel::variable).
    fn qp_jacobian(&self, ctx: &KernelContext<'_>, i: usize, j: usize, qp: usize) -> f64;

    /// Jacobian integrand with respect to coupled variable `cvar`.
    fn qp_off_diag_jacobian(
        &self,
        ctx: &KernelContext<'_>,
        cvar: usize,
        i: usize,
        j: usize,
        qp: usize,
    ) -> f64;

    /// Layout this kernel's property slots index into, if it reads any.
    fn layout_id(&self) -> Option<LayoutId> {
        None
    }

    /// Reject an element context whose property buffers come from a
    /// different layout than [`layout_id`](Kernel::layout_id).
    fn check_context(&self, ctx: &KernelContext<'_>) -> Result<(), KernelError> {
        match self.layout_id() {
            Some(expected) if expected != ctx.layout_id() => Err(KernelError::LayoutMismatch {
                kernel: self.name().to_string(),
                expected,
                actual: ctx.layout_id(),
            }),
            _ => Ok(()),
        }
    }

    /// Local coupling index of the global variable `jvar`.
    fn map_jvar(&self, jvar: VarId) -> Result<usize, KernelError> {
        self.jvar_map().map(jvar)
    }
}
