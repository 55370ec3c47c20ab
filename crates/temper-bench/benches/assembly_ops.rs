//! Criterion micro-benchmarks for element assembly of a coupled
//! material derivative kernel.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use temper_bench::{lagrange_1d, multiphase_profile, uniform_values, variable_names, BENCH_BLOCK};
use temper_core::{ElementId, VarId};
use temper_kernel::{
    CoupledMaterialDerivative, CoupledMaterialDerivativeParams, ElementAssembler, KernelContext,
};
use temper_material::{evaluate_materials, PropertyBuffers};
use temper_test_utils::MockVariableValues;

fn bench_assembly(c: &mut Criterion) {
    let n_vars = 4;
    let (warehouse, variables) = multiphase_profile(n_vars).unwrap();
    let layout = warehouse.layout(BENCH_BLOCK);
    let names = variable_names(n_vars);
    let params = CoupledMaterialDerivativeParams::new(names[0].as_str(), names[1].as_str())
        .with_args(names[2..].iter().cloned());
    let kernel = CoupledMaterialDerivative::new("dFdc1", &params, &variables, &layout).unwrap();

    let (shape, jxw) = lagrange_1d();
    let mut values = MockVariableValues::new();
    for (name, value) in uniform_values(n_vars) {
        values.set(name, vec![value; 2]);
    }
    let mut buffers = PropertyBuffers::new(&layout);
    evaluate_materials(&layout, ElementId(0), 2, &values, &mut buffers).unwrap();
    let ctx = KernelContext::new(&shape, &shape, &jxw, &buffers).unwrap();
    let assembler = ElementAssembler::new(&kernel);

    let mut group = c.benchmark_group("assembly");
    group.bench_function("residual", |b| {
        b.iter(|| black_box(assembler.residual(&ctx).unwrap()));
    });
    group.bench_function("jacobian", |b| {
        b.iter(|| black_box(assembler.jacobian(&ctx).unwrap()));
    });
    group.bench_function("off_diag_jacobian", |b| {
        b.iter(|| black_box(assembler.off_diag_jacobian(&ctx, VarId(2)).unwrap()));
    });
    group.bench_function("coupled_jacobians", |b| {
        b.iter(|| black_box(assembler.coupled_jacobians(&ctx).unwrap()));
    });
    group.finish();
}

fn bench_kernel_setup(c: &mut Criterion) {
    let (warehouse, variables) = multiphase_profile(8).unwrap();
    let layout = warehouse.layout(BENCH_BLOCK);
    let names = variable_names(8);
    let params = CoupledMaterialDerivativeParams::new(names[0].as_str(), names[1].as_str())
        .with_args(names[2..].iter().cloned());
    c.bench_function("kernel_setup_8vars", |b| {
        b.iter(|| {
            black_box(
                CoupledMaterialDerivative::new("dFdc1", &params, &variables, &layout).unwrap(),
            )
        });
    });
}

criterion_group!(benches, bench_assembly, bench_kernel_setup);
criterion_main!(benches);
