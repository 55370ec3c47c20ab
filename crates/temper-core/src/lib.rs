//! Core types and traits for the Temper material framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the identifiers shared by every other crate in the workspace: region
//! and variable IDs, property/derivative keys, error types, and the
//! narrow traits through which the finite-element side supplies
//! variable values.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod property;
pub mod region;
pub mod traits;
pub mod variable;

pub use error::{EvaluationError, MaterialError, RegistryError, ResolveError};
pub use id::{BoundaryId, ElementId, LayoutId, MaterialId, SubdomainId, VarId};
pub use property::PropertyKey;
pub use region::{Region, RegionKind};
pub use traits::VariableValues;
pub use variable::VariableTable;
