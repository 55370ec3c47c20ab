//! End-to-end: warehouse, layout, evaluation and element assembly of
//! a coupled material derivative kernel.

use proptest::prelude::*;
use temper_core::{ElementId, Region, SubdomainId, VarId, VariableTable};
use temper_kernel::{
    CoupledMaterialDerivative, CoupledMaterialDerivativeParams, ElementAssembler, Kernel,
    KernelContext, KernelError, ShapeTable,
};
use temper_material::{
    evaluate_materials, MaterialHandle, MaterialWarehouse, PropertyBuffers, PropertyLayout,
};
use temper_materials::{ConstantMaterial, PolynomialMaterial};
use temper_test_utils::MockVariableValues;

const BLOCK: Region = Region::Block(SubdomainId(1));

/// F(u, v, w) = u^2 v + v w^2 + u^3
fn free_energy() -> PolynomialMaterial {
    PolynomialMaterial::builder()
        .name("free_energy")
        .args(["u", "v", "w"])
        .term(1.0, &[("u", 2), ("v", 1)])
        .term(1.0, &[("v", 1), ("w", 2)])
        .term(1.0, &[("u", 3)])
        .build()
        .unwrap()
}

fn warehouse() -> MaterialWarehouse {
    let mut wh = MaterialWarehouse::new();
    wh.add_material(
        BLOCK,
        MaterialHandle::new(ConstantMaterial::new("coeffs").with("L", 1.0)),
    );
    wh.add_material(BLOCK, MaterialHandle::new(free_energy()));
    wh
}

fn variables() -> VariableTable {
    ["u", "v", "w"].into_iter().collect()
}

/// Linear Lagrange on [0, 1], two-point Gauss rule.
fn linear_element() -> (ShapeTable, Vec<f64>) {
    let g = 0.5 / 3f64.sqrt();
    let xs = [0.5 - g, 0.5 + g];
    (
        ShapeTable::from_fn(2, 2, |i, qp| if i == 0 { 1.0 - xs[qp] } else { xs[qp] }),
        vec![0.5, 0.5],
    )
}

fn evaluate(layout: &PropertyLayout, values: [f64; 3]) -> PropertyBuffers {
    let [u, v, w] = values;
    let vars = MockVariableValues::uniform([("u", u), ("v", v), ("w", w)], 2);
    let mut buffers = PropertyBuffers::new(layout);
    evaluate_materials(layout, ElementId(0), 2, &vars, &mut buffers).unwrap();
    buffers
}

fn residual_at(
    layout: &PropertyLayout,
    kernel: &CoupledMaterialDerivative,
    values: [f64; 3],
) -> Vec<f64> {
    let (shape, jxw) = linear_element();
    let buffers = evaluate(layout, values);
    let ctx = KernelContext::new(&shape, &shape, &jxw, &buffers).unwrap();
    ElementAssembler::new(kernel).residual(&ctx).unwrap()
}

#[test]
fn residual_integrates_dfdv() {
    let wh = warehouse();
    let layout = wh.layout(BLOCK);
    let params = CoupledMaterialDerivativeParams::new("u", "v").with_args(["w"]);
    let kernel = CoupledMaterialDerivative::new("dFdv", &params, &variables(), &layout).unwrap();

    // dF/dv = u^2 + w^2 = 4 + 9
    let r = residual_at(&layout, &kernel, [2.0, 7.0, 3.0]);
    assert!((r[0] - 6.5).abs() < 1e-12);
    assert!((r[1] - 6.5).abs() < 1e-12);
}

#[test]
fn kernel_works_through_a_trait_object() {
    let wh = warehouse();
    let layout = wh.layout(BLOCK);
    let params = CoupledMaterialDerivativeParams::new("u", "v").with_args(["w"]);
    let kernel = CoupledMaterialDerivative::new("dFdv", &params, &variables(), &layout).unwrap();
    let dynamic: &dyn Kernel = &kernel;

    assert_eq!(dynamic.name(), "dFdv");
    assert_eq!(dynamic.variable(), VarId(0));
    assert_eq!(dynamic.jvar_map().coupled(), [VarId(1), VarId(2)]);
    assert_eq!(dynamic.layout_id(), Some(layout.id()));
}

#[test]
fn buffers_from_another_layout_are_rejected() {
    // The kernel's layout has F in slot 0; the other one puts L first,
    // so the same slot index names a different property there.
    let own = PropertyLayout::build(BLOCK, &[MaterialHandle::new(free_energy())]);
    let params = CoupledMaterialDerivativeParams::new("u", "v").with_args(["w"]);
    let kernel = CoupledMaterialDerivative::new("dFdv", &params, &variables(), &own).unwrap();

    let other = warehouse().layout(BLOCK);
    let buffers = evaluate(&other, [2.0, 3.0, 5.0]);
    let (shape, jxw) = linear_element();
    let ctx = KernelContext::new(&shape, &shape, &jxw, &buffers).unwrap();

    let expected = KernelError::LayoutMismatch {
        kernel: "dFdv".into(),
        expected: own.id(),
        actual: other.id(),
    };
    assert_eq!(kernel.check_context(&ctx), Err(expected.clone()));
    let assembler = ElementAssembler::new(&kernel);
    assert_eq!(assembler.residual(&ctx), Err(expected.clone()));
    assert_eq!(assembler.jacobian(&ctx), Err(expected.clone()));
    assert_eq!(assembler.off_diag_jacobian(&ctx, VarId(2)), Err(expected.clone()));
    assert_eq!(assembler.coupled_jacobians(&ctx), Err(expected));
}

proptest! {
    /// Assembled Jacobian blocks agree with central differences of the
    /// assembled residual. Linear shape functions sum to one, so a
    /// uniform perturbation of a variable by h changes residual row i
    /// by h times the row sum of the matching block.
    #[test]
    fn jacobian_matches_finite_differences(
        u in -2.0f64..2.0,
        v in -2.0f64..2.0,
        w in -2.0f64..2.0,
    ) {
        let wh = warehouse();
        let layout = wh.layout(BLOCK);
        let vars = variables();
        let params = CoupledMaterialDerivativeParams::new("u", "v").with_args(["w"]);
        let kernel = CoupledMaterialDerivative::new("dFdv", &params, &vars, &layout).unwrap();

        let (shape, jxw) = linear_element();
        let buffers = evaluate(&layout, [u, v, w]);
        let ctx = KernelContext::new(&shape, &shape, &jxw, &buffers).unwrap();
        let assembler = ElementAssembler::new(&kernel);

        let h = 1e-5;
        let base = [u, v, w];
        for (var, block) in [
            (0usize, assembler.jacobian(&ctx).unwrap()),
            (1, assembler.off_diag_jacobian(&ctx, VarId(1)).unwrap()),
            (2, assembler.off_diag_jacobian(&ctx, VarId(2)).unwrap()),
        ] {
            let mut plus = base;
            let mut minus = base;
            plus[var] += h;
            minus[var] -= h;
            let rp = residual_at(&layout, &kernel, plus);
            let rm = residual_at(&layout, &kernel, minus);
            for i in 0..2 {
                let fd = (rp[i] - rm[i]) / (2.0 * h);
                let row_sum: f64 = (0..2).map(|j| block.get(i, j)).sum();
                prop_assert!(
                    (fd - row_sum).abs() < 1e-6,
                    "var {} row {}: fd {} vs {}",
                    var,
                    i,
                    fd,
                    row_sum
                );
            }
        }
    }
}
