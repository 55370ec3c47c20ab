//! Criterion micro-benchmarks for layout construction and material evaluation.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use temper_bench::{multiphase_profile, uniform_values, BENCH_BLOCK};
use temper_core::ElementId;
use temper_material::{evaluate_materials, PropertyBuffers};
use temper_test_utils::MockVariableValues;

fn mock_values(n_vars: usize, n_qp: usize) -> MockVariableValues {
    let mut values = MockVariableValues::new();
    for (name, value) in uniform_values(n_vars) {
        values.set(name, vec![value; n_qp]);
    }
    values
}

fn bench_layout_build(c: &mut Criterion) {
    let (warehouse, _) = multiphase_profile(4).unwrap();
    c.bench_function("layout_build_4vars", |b| {
        b.iter(|| black_box(warehouse.layout(BENCH_BLOCK)));
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_materials");
    for n_vars in [2usize, 4, 8] {
        let (warehouse, _) = multiphase_profile(n_vars).unwrap();
        let layout = warehouse.layout(BENCH_BLOCK);
        let values = mock_values(n_vars, 8);
        let mut buffers = PropertyBuffers::new(&layout);
        group.bench_function(format!("{n_vars}vars_8qp"), |b| {
            b.iter(|| {
                evaluate_materials(&layout, ElementId(0), 8, &values, &mut buffers).unwrap();
                black_box(buffers.n_qp());
            });
        });
    }
    group.finish();
}

fn bench_advance_state(c: &mut Criterion) {
    let (warehouse, _) = multiphase_profile(4).unwrap();
    c.bench_function("advance_state", |b| {
        b.iter(|| black_box(warehouse.advance_state().unwrap()));
    });
}

criterion_group!(benches, bench_layout_build, bench_evaluate, bench_advance_state);
criterion_main!(benches);
