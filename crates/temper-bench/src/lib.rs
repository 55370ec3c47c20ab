//! Benchmark profiles for the Temper material framework.
//!
//! - [`multiphase_profile`]: a warehouse with a polynomial free energy
//!   in `n_vars` variables plus a constant mobility on one block.
//! - [`lagrange_1d`]: linear Lagrange shape functions with a Gauss rule.
//! - [`uniform_values`]: constant variable values for every argument.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use temper_core::{Region, SubdomainId, VariableTable};
use temper_kernel::ShapeTable;
use temper_material::{MaterialHandle, MaterialWarehouse};
use temper_materials::{ConstantMaterial, PolynomialMaterial};

/// Region every profile registers on.
pub const BENCH_BLOCK: Region = Region::Block(SubdomainId(0));

/// Names `c0, c1, ..` of the profile variables.
pub fn variable_names(n_vars: usize) -> Vec<String> {
    (0..n_vars).map(|i| format!("c{i}")).collect()
}

/// Build a warehouse holding `F = sum_i c_i^2 c_{i+1} + c_i^4 / 4` and a
/// constant `L`, with the matching variable table.
///
/// The free energy couples neighbouring variables so every first and
/// second derivative slot is exercised.
pub fn multiphase_profile(n_vars: usize) -> Result<(MaterialWarehouse, VariableTable), String> {
    let names = variable_names(n_vars);
    let mut builder = PolynomialMaterial::builder()
        .name("free_energy")
        .args(names.iter().cloned());
    for i in 0..n_vars {
        builder = builder.term(0.25, &[(names[i].as_str(), 4)]);
        if i + 1 < n_vars {
            builder = builder.term(1.0, &[(names[i].as_str(), 2), (names[i + 1].as_str(), 1)]);
        }
    }

    let mut warehouse = MaterialWarehouse::new();
    warehouse.add_material(
        BENCH_BLOCK,
        MaterialHandle::new(ConstantMaterial::new("mobility").with("L", 1.0)),
    );
    warehouse.add_material(BENCH_BLOCK, MaterialHandle::new(builder.build()?));
    Ok((warehouse, names.into_iter().collect()))
}

/// Linear Lagrange shape functions on `[0, 1]` at a two-point Gauss
/// rule, and the matching `JxW`.
pub fn lagrange_1d() -> (ShapeTable, Vec<f64>) {
    let g = 0.5 / 3f64.sqrt();
    let xs = [0.5 - g, 0.5 + g];
    (
        ShapeTable::from_fn(2, 2, |i, qp| if i == 0 { 1.0 - xs[qp] } else { xs[qp] }),
        vec![0.5, 0.5],
    )
}

/// `(name, value)` pairs assigning `0.1 * (i + 1)` to variable `i`.
pub fn uniform_values(n_vars: usize) -> Vec<(String, f64)> {
    variable_names(n_vars)
        .into_iter()
        .enumerate()
        .map(|(i, name)| (name, 0.1 * (i + 1) as f64))
        .collect()
}
