//! Derivative-driven residual and Jacobian kernels.
//!
//! A [`Kernel`] contributes one weak-form term for one nonlinear
//! variable. It resolves every material property slot it needs when it
//! is constructed and afterwards only indexes [`PropertyBuffers`]
//! through a [`KernelContext`], so the per-quadrature-point entry points
//! cannot fail.
//!
//! [`CoupledMaterialDerivative`] is the reference kernel: given a
//! free energy `F` and a coupled variable `v` it assembles
//! `(dF/dv, test)` and its exact Jacobian with respect to the kernel
//! variable and every coupled variable. [`ElementAssembler`] integrates
//! any kernel over one element.
//!
//! [`PropertyBuffers`]: temper_material::PropertyBuffers

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod assembly;
pub mod context;
pub mod coupled_material_derivative;
pub mod error;
pub mod jvar;
pub mod kernel;
pub mod params;
pub mod shape;

pub use assembly::{ElementAssembler, LocalMatrix};
pub use context::KernelContext;
pub use coupled_material_derivative::CoupledMaterialDerivative;
pub use error::{ConfigError, KernelError};
pub use jvar::JvarMap;
pub use kernel::Kernel;
pub use params::CoupledMaterialDerivativeParams;
pub use shape::ShapeTable;
