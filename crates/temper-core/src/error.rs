//! Error types for the Temper material framework.
//!
//! Organized by phase: material evaluation, warehouse lifecycle, and
//! setup-time property/derivative resolution. Resolution errors are
//! always raised before the first quadrature loop runs.

use std::error::Error;
use std::fmt;

use crate::id::LayoutId;
use crate::region::Region;

/// Errors raised by an individual material.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MaterialError {
    /// The material's computation failed.
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
    /// A coupled variable the material reads was not supplied.
    MissingVariable {
        /// Name of the variable.
        variable: String,
    },
    /// The material wrote an output index it never declared.
    UndeclaredOutput {
        /// The offending output index.
        index: usize,
        /// Number of outputs the material declares.
        declared: usize,
    },
    /// Stateful storage could not be accessed or advanced.
    StateUnavailable {
        /// Description of the state problem.
        reason: String,
    },
}

impl fmt::Display for MaterialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExecutionFailed { reason } => write!(f, "execution failed: {reason}"),
            Self::MissingVariable { variable } => {
                write!(f, "coupled variable '{variable}' not available")
            }
            Self::UndeclaredOutput { index, declared } => {
                write!(
                    f,
                    "output index {index} is not declared (material declares {declared} outputs)"
                )
            }
            Self::StateUnavailable { reason } => write!(f, "state unavailable: {reason}"),
        }
    }
}

impl Error for MaterialError {}

/// Errors from the region-indexed material warehouse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// A strict lookup asked for a region with no registered materials.
    UnknownRegion {
        /// The region that was queried.
        region: Region,
    },
    /// A material failed while advancing its old/current state.
    ///
    /// The broadcast stops at the failing material; the step driver must
    /// not proceed with partially advanced state.
    StateAdvance {
        /// Name of the failing material.
        material: String,
        /// Number of materials advanced before the failure.
        advanced: usize,
        /// The underlying material error.
        reason: MaterialError,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRegion { region } => {
                write!(f, "no materials registered on {region}")
            }
            Self::StateAdvance {
                material,
                advanced,
                reason,
            } => {
                write!(
                    f,
                    "state advance failed in material '{material}' \
                     after {advanced} materials advanced: {reason}"
                )
            }
        }
    }
}

impl Error for RegistryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StateAdvance { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// Setup-time failures resolving properties and derivatives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveError {
    /// No material on the region declares the property.
    MissingProperty {
        /// Name of the property.
        property: String,
        /// Region that was searched.
        region: Region,
    },
    /// The property exists but the requested derivative was never declared.
    MissingDerivative {
        /// Name of the property.
        property: String,
        /// Differentiation variables of the requested derivative.
        variables: Vec<String>,
        /// Canonical derivative name, e.g. `d^2F/dudv`.
        derivative: String,
        /// Region that was searched.
        region: Region,
    },
    /// The property depends on a variable the consumer does not couple.
    IncompleteCoupling {
        /// Name of the property.
        property: String,
        /// The dependency missing from the coupling list.
        variable: String,
        /// Region the property was resolved on.
        region: Region,
    },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingProperty { property, region } => {
                write!(f, "material property '{property}' is not declared on {region}")
            }
            Self::MissingDerivative {
                property,
                variables,
                derivative,
                region,
            } => {
                write!(
                    f,
                    "derivative '{derivative}' of material property '{property}' \
                     with respect to [{}] is not declared on {region}",
                    variables.join(", ")
                )
            }
            Self::IncompleteCoupling {
                property,
                variable,
                region,
            } => {
                write!(
                    f,
                    "material property '{property}' on {region} depends on '{variable}', \
                     which is not in the coupled variable list"
                )
            }
        }
    }
}

impl Error for ResolveError {}

/// Errors from a per-element material evaluation pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvaluationError {
    /// A material returned an error while computing a quadrature point.
    MaterialFailed {
        /// Name of the failing material.
        material: String,
        /// Quadrature point index at which it failed.
        qp: usize,
        /// The underlying material error.
        reason: MaterialError,
    },
    /// The buffers were built for a different layout than the one supplied.
    LayoutMismatch {
        /// Layout the buffers were allocated for.
        buffers: LayoutId,
        /// Layout supplied to the evaluation.
        layout: LayoutId,
    },
}

impl fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaterialFailed {
                material,
                qp,
                reason,
            } => write!(f, "material '{material}' failed at qp {qp}: {reason}"),
            Self::LayoutMismatch { buffers, layout } => {
                write!(
                    f,
                    "property buffers belong to layout {buffers}, not layout {layout}"
                )
            }
        }
    }
}

impl Error for EvaluationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MaterialFailed { reason, .. } => Some(reason),
            _ => None,
        }
    }
}
