//! Performance benchmarks for sample evaluation.
//!
//! Run with: cargo bench --bench evaluate_benchmark

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use fabric_grading::catalog::StaticCatalog;
use fabric_grading::model::{DefectObservation, DefectPosition, InspectionSample};
use fabric_grading::quality::{evaluate, GradingEngine, QualityThresholds};
use std::hint::black_box;

const DEFECT_TYPES: &[&str] = &["hole", "slub", "knot", "broken_end", "oil_stain", "float", "smudge"];
const POSITIONS: &[DefectPosition] = &[
    DefectPosition::LeftEdge,
    DefectPosition::Center,
    DefectPosition::RightEdge,
    DefectPosition::FullWidth,
];

/// Generate a sample with the specified number of observations.
fn generate_sample(batch: usize, observations: usize) -> InspectionSample {
    let mut sample = InspectionSample::new(format!("B-{batch}"), "SO-1", "Denim")
        .with_measurements(1000.0, 150.0, 32.5);

    for i in 0..observations {
        let obs = DefectObservation::new(
            format!("obs-{i}"),
            DEFECT_TYPES[i % DEFECT_TYPES.len()],
            POSITIONS[i % POSITIONS.len()],
        )
        .with_size(1.0 + (i % 7) as f64, 2.0 + (i % 5) as f64)
        .at_offset(i as f64 * 0.5);
        sample = sample.with_observation(obs);
    }

    sample
}

fn bench_evaluate(c: &mut Criterion) {
    let thresholds = QualityThresholds::default();
    let catalog = StaticCatalog::standard();
    let mut group = c.benchmark_group("evaluate");

    for size in [10, 100, 1000] {
        let sample = generate_sample(0, size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &sample, |b, sample| {
            b.iter(|| black_box(evaluate(black_box(sample), &thresholds, &catalog)));
        });
    }

    group.finish();
}

fn bench_evaluate_batch(c: &mut Criterion) {
    let engine = GradingEngine::new(QualityThresholds::default(), StaticCatalog::standard());
    let samples: Vec<_> = (0..500).map(|i| generate_sample(i, 50)).collect();

    c.bench_function("evaluate_batch_500x50", |b| {
        b.iter(|| black_box(engine.evaluate_batch(black_box(&samples), None)));
    });
}

criterion_group!(benches, bench_evaluate, bench_evaluate_batch);
criterion_main!(benches);
