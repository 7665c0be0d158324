//! Benchmarks for gymfis inference operations

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use gymfis::{GymMachine, Inputs, MfFamily};

fn nominal_inputs() -> Inputs {
    Inputs {
        force: 250.0,
        speed: 0.7,
        phase: 50.0,
        fatigue: 20.0,
        mode: 2.0,
    }
}

fn compute_benchmark(c: &mut Criterion) {
    let machine = GymMachine::production().unwrap();
    let inputs = nominal_inputs();

    c.bench_function("compute_production", |b| {
        b.iter(|| black_box(machine.compute(black_box(&inputs))));
    });
}

fn family_benchmark(c: &mut Criterion) {
    let inputs = nominal_inputs();
    let mut group = c.benchmark_group("compute_by_family");

    for family in MfFamily::ALL {
        let machine = GymMachine::with_family(family).unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(family.name()),
            &inputs,
            |b, inputs| {
                b.iter(|| black_box(machine.compute(black_box(inputs))));
            },
        );
    }

    group.finish();
}

fn construction_benchmark(c: &mut Criterion) {
    c.bench_function("build_production_machine", |b| {
        b.iter(|| black_box(GymMachine::production().unwrap()));
    });

    c.bench_function("build_gaussian_machine", |b| {
        b.iter(|| black_box(GymMachine::with_family(MfFamily::Gaussian).unwrap()));
    });
}

criterion_group!(
    benches,
    compute_benchmark,
    family_benchmark,
    construction_benchmark
);
criterion_main!(benches);
