//! Assemble `(dF/dv, test)` for a two-phase free energy on one element.
//!
//! Run with `cargo run -p temper-kernel --example quickstart`.

use std::error::Error;

use temper_core::{ElementId, Region, SubdomainId, VariableTable};
use temper_kernel::{
    CoupledMaterialDerivative, CoupledMaterialDerivativeParams, ElementAssembler, KernelContext,
    ShapeTable,
};
use temper_material::{evaluate_materials, MaterialHandle, MaterialWarehouse, PropertyBuffers};
use temper_materials::{ConstantMaterial, PolynomialMaterial};
use temper_test_utils::MockVariableValues;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let block = Region::Block(SubdomainId(0));
    let variables: VariableTable = ["c", "eta"].into_iter().collect();

    // F(c, eta) = c^2 eta^2 - c eta + eta^4 / 4
    let f = PolynomialMaterial::builder()
        .name("free_energy")
        .args(["c", "eta"])
        .term(1.0, &[("c", 2), ("eta", 2)])
        .term(-1.0, &[("c", 1), ("eta", 1)])
        .term(0.25, &[("eta", 4)])
        .build()?;

    let mut warehouse = MaterialWarehouse::new();
    let mobility = ConstantMaterial::new("mobility").with("L", 5.0);
    warehouse.add_material(block, MaterialHandle::new(mobility));
    warehouse.add_material(block, MaterialHandle::new(f));

    let layout = warehouse.layout(block);
    let params = CoupledMaterialDerivativeParams::new("c", "eta");
    let kernel = CoupledMaterialDerivative::new("dFdeta", &params, &variables, &layout)?;

    // Linear Lagrange on [0, 1] with a two-point Gauss rule.
    let g = 0.5 / 3f64.sqrt();
    let xs = [0.5 - g, 0.5 + g];
    let shape = ShapeTable::from_fn(2, 2, |i, qp| {
        if i == 0 {
            1.0 - xs[qp]
        } else {
            xs[qp]
        }
    });
    let jxw = [0.5, 0.5];

    let values = MockVariableValues::new()
        .with("c", vec![0.2, 0.4])
        .with("eta", vec![0.9, 0.7]);
    let mut buffers = PropertyBuffers::new(&layout);
    evaluate_materials(&layout, ElementId(0), 2, &values, &mut buffers)?;

    let ctx = KernelContext::new(&shape, &shape, &jxw, &buffers)?;
    let assembler = ElementAssembler::new(&kernel);
    println!("residual      = {:?}", assembler.residual(&ctx)?);
    println!("jacobian (c)  = {:?}", assembler.jacobian(&ctx)?.as_slice());
    for (jvar, block) in assembler.coupled_jacobians(&ctx)? {
        println!("jacobian ({jvar}) = {:?}", block.as_slice());
    }

    warehouse.advance_state()?;
    Ok(())
}
