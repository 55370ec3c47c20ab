//! Material trait, region-indexed warehouse and derivative resolution.
//!
//! The pieces fit together in two phases:
//!
//! ```text
//! setup:  MaterialWarehouse::add_material(region, handle)
//!         PropertyLayout::build(region, warehouse.materials(region))
//!         consumer resolves PropertySlots through DerivativeResolver
//! assembly (per element):
//!         evaluate_materials(&layout, element, n_qp, vars, &mut buffers)
//!         consumer reads buffers.get(slot)[qp]
//! step end:
//!         MaterialWarehouse::advance_state()
//! ```
//!
//! All name lookups happen at setup. The per-element path indexes
//! pre-resolved slots and cannot fail on a missing name.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffers;
pub mod layout;
pub mod material;
pub mod resolve;
pub mod state;
pub mod warehouse;

pub use buffers::{evaluate_materials, PropertyBuffers, PropertyWriter};
pub use layout::{PropertyLayout, PropertySlot};
pub use material::{Material, MaterialHandle, QpContext};
pub use resolve::DerivativeResolver;
pub use state::StatefulStore;
pub use warehouse::{ActiveMaterials, MaterialWarehouse};
