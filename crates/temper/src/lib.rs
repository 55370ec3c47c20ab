//! Temper: material property storage and derivative-driven kernels for
//! finite-element multiphysics.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Temper sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use temper::prelude::*;
//! use temper::materials::PolynomialMaterial;
//!
//! // F(u, v, w) = u*v + w^2
//! let f = PolynomialMaterial::builder()
//!     .name("free_energy")
//!     .args(["u", "v", "w"])
//!     .term(1.0, &[("u", 1), ("v", 1)])
//!     .term(1.0, &[("w", 2)])
//!     .build()
//!     .unwrap();
//!
//! let block = Region::Block(SubdomainId(0));
//! let mut warehouse = MaterialWarehouse::new();
//! warehouse.add_material(block, MaterialHandle::new(f));
//! let layout = warehouse.layout(block);
//!
//! let variables: VariableTable = ["u", "v", "w"].into_iter().collect();
//! let params = CoupledMaterialDerivativeParams::new("u", "v").with_args(["w"]);
//! let kernel = CoupledMaterialDerivative::new("dFdv", &params, &variables, &layout).unwrap();
//!
//! // One quadrature point, unit test/trial functions and weight.
//! struct Values;
//! impl VariableValues for Values {
//!     fn values(&self, var: &str) -> Option<&[f64]> {
//!         match var {
//!             "u" => Some(&[2.0] as &[f64]),
//!             "v" => Some(&[3.0] as &[f64]),
//!             "w" => Some(&[5.0] as &[f64]),
//!             _ => None,
//!         }
//!     }
//! }
//! let mut buffers = PropertyBuffers::new(&layout);
//! evaluate_materials(&layout, ElementId(0), 1, &Values, &mut buffers).unwrap();
//!
//! let ones = ShapeTable::constant(1, 1, 1.0);
//! let ctx = KernelContext::new(&ones, &ones, &[1.0], &buffers).unwrap();
//! kernel.check_context(&ctx).unwrap();
//! assert_eq!(kernel.qp_residual(&ctx, 0, 0), 2.0);
//! assert_eq!(kernel.qp_jacobian(&ctx, 0, 0, 0), 1.0);
//! let w = kernel.map_jvar(VarId(2)).unwrap();
//! assert_eq!(kernel.qp_off_diag_jacobian(&ctx, w, 0, 0, 0), 0.0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `temper-core` | IDs, regions, property keys, errors |
//! | [`material`] | `temper-material` | `Material` trait, warehouse, layouts, resolution |
//! | [`materials`] | `temper-materials` | Reference materials |
//! | [`kernel`] | `temper-kernel` | Kernels, shape tables, element assembly |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, IDs and errors (`temper-core`).
pub use temper_core as types;

/// Material trait, warehouse and derivative resolution (`temper-material`).
pub use temper_material as material;

/// Reference materials (`temper-materials`).
///
/// [`materials::PolynomialMaterial`], [`materials::ConstantMaterial`]
/// and [`materials::HistoryMaterial`].
pub use temper_materials as materials;

/// Kernels and element assembly (`temper-kernel`).
pub use temper_kernel as kernel;

/// Common imports for typical Temper usage.
pub mod prelude {
    // Core types
    pub use temper_core::{
        BoundaryId, ElementId, PropertyKey, Region, RegionKind, SubdomainId, VarId,
        VariableTable, VariableValues,
    };

    // Errors
    pub use temper_core::{EvaluationError, MaterialError, RegistryError, ResolveError};

    // Materials
    pub use temper_material::{
        evaluate_materials, DerivativeResolver, Material, MaterialHandle, MaterialWarehouse,
        PropertyBuffers, PropertyLayout, PropertyWriter, QpContext,
    };

    // Kernels
    pub use temper_kernel::{
        CoupledMaterialDerivative, CoupledMaterialDerivativeParams, ElementAssembler, Kernel,
        KernelContext, KernelError, ShapeTable,
    };
}
