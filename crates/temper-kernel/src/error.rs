//! Kernel setup and assembly errors.

use std::error::Error;
use std::fmt;

use temper_core::{LayoutId, ResolveError, VarId};

/// Errors detected by
/// [`CoupledMaterialDerivativeParams::validate`](crate::CoupledMaterialDerivativeParams::validate).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required name parameter is empty.
    EmptyName {
        /// Which parameter was empty.
        field: &'static str,
    },
    /// The kernel variable appears in its own `args`.
    SelfCoupling {
        /// The kernel variable.
        variable: String,
    },
    /// A variable is listed more than once in `args`.
    DuplicateArg {
        /// The repeated variable.
        variable: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName { field } => write!(f, "parameter '{field}' must not be empty"),
            Self::SelfCoupling { variable } => {
                write!(f, "kernel variable '{variable}' must not be listed in args")
            }
            Self::DuplicateArg { variable } => {
                write!(f, "variable '{variable}' is listed in args more than once")
            }
        }
    }
}

impl Error for ConfigError {}

/// Errors raised while setting up or assembling a kernel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KernelError {
    /// Parameter validation failed.
    Config(ConfigError),
    /// A property or derivative could not be resolved, or the coupling
    /// list is incomplete.
    Resolve(ResolveError),
    /// A variable name has no entry in the variable table.
    UnknownVariable {
        /// The unknown name.
        variable: String,
    },
    /// An off-diagonal block was requested for a variable the kernel is
    /// not coupled to.
    UnmappedVariable {
        /// The global variable index.
        jvar: VarId,
    },
    /// A shape table's value count does not match its dimensions.
    ShapeMismatch {
        /// `n_fns * n_qp`.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },
    /// Two element inputs disagree on the quadrature point count.
    QuadratureMismatch {
        /// Which input disagreed.
        what: &'static str,
        /// Quadrature point count of the test functions.
        expected: usize,
        /// Quadrature point count of `what`.
        actual: usize,
    },
    /// The element's property buffers come from a different layout than
    /// the one the kernel resolved its slots against.
    LayoutMismatch {
        /// Kernel name.
        kernel: String,
        /// Layout the kernel was set up with.
        expected: LayoutId,
        /// Layout of the supplied buffers.
        actual: LayoutId,
    },
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid parameters: {e}"),
            Self::Resolve(e) => write!(f, "{e}"),
            Self::UnknownVariable { variable } => write!(f, "unknown variable '{variable}'"),
            Self::UnmappedVariable { jvar } => {
                write!(f, "variable {jvar} is not coupled to this kernel")
            }
            Self::ShapeMismatch { expected, actual } => {
                write!(f, "shape table needs {expected} values, got {actual}")
            }
            Self::QuadratureMismatch {
                what,
                expected,
                actual,
            } => write!(
                f,
                "{what} has {actual} quadrature points, test functions have {expected}"
            ),
            Self::LayoutMismatch {
                kernel,
                expected,
                actual,
            } => write!(
                f,
                "kernel '{kernel}' was set up against layout {expected}, \
                 got property buffers from layout {actual}"
            ),
        }
    }
}

impl Error for KernelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Resolve(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for KernelError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<ResolveError> for KernelError {
    fn from(e: ResolveError) -> Self {
        Self::Resolve(e)
    }
}
