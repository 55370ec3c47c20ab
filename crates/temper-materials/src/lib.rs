//! Reference materials for the Temper framework.
//!
//! - [`PolynomialMaterial`]: a polynomial free energy in named variables
//!   that declares its value and all first and second derivatives.
//! - [`ConstantMaterial`]: constant coefficients whose derivatives vanish
//!   by contract.
//! - [`HistoryMaterial`]: a stateful running maximum with old-state output.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod constant;
pub mod history;
pub mod polynomial;

pub use constant::ConstantMaterial;
pub use history::HistoryMaterial;
pub use polynomial::PolynomialMaterial;
