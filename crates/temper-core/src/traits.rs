//! Narrow traits through which the finite-element side feeds materials.

/// Read-only access to coupled variable values at the quadrature points
/// of the element currently being evaluated.
///
/// Implemented by the FE assembly subsystem. Returns `None` if the
/// variable is not coupled into the current evaluation.
pub trait VariableValues {
    /// Values of `var` at every quadrature point of the current element.
    fn values(&self, var: &str) -> Option<&[f64]>;
}
