//! Performance benchmarks for FastRangeMap
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fast_rangemap::{Execution, Interval, Pipeline, Stage};

/// Seven stages of disjoint translations with gaps between them
fn synthetic_pipeline(translations_per_stage: i64) -> Pipeline {
    let stages = (0..7)
        .map(|s| {
            let triples = (0..translations_per_stage).map(move |i| {
                let source_start = i * 1_000;
                let slot = (i * 7_919 + s * 104_729) % translations_per_stage;
                let destination_start = slot * 1_000 + 13;
                (destination_start, source_start, 700)
            });
            Stage::from_triples(format!("c{}", s), format!("c{}", s + 1), triples)
        })
        .collect();
    Pipeline::new(stages)
}

fn synthetic_seeds(count: i64, span: i64) -> Vec<Interval> {
    (0..count)
        .map(|i| Interval::from_start_len(i * 3_517 % (span * 1_000), 5_000))
        .collect()
}

/// Benchmark single stage splitting
fn bench_single_stage(c: &mut Criterion) {
    let pipeline = synthetic_pipeline(1_000);
    let stage = &pipeline.stages()[0];
    let seeds = synthetic_seeds(1_000, 1_000);

    c.bench_function("stage_map_1000_intervals", |b| {
        b.iter(|| black_box(stage.map_intervals(black_box(&seeds))))
    });
}

/// Benchmark full pipeline, sequential vs parallel
fn bench_pipeline(c: &mut Criterion) {
    let pipeline = synthetic_pipeline(1_000);
    let mut group = c.benchmark_group("pipeline_lowest");
    let pool = Execution::Parallel { threads: 4 }.build_pool().unwrap();

    for count in [100i64, 1_000, 10_000].iter() {
        let seeds = synthetic_seeds(*count, 1_000);
        group.throughput(Throughput::Elements(*count as u64));

        group.bench_with_input(BenchmarkId::new("sequential", count), &seeds, |b, seeds| {
            b.iter(|| black_box(pipeline.lowest_location(seeds, Execution::Sequential)))
        });
        group.bench_with_input(BenchmarkId::new("parallel_4", count), &seeds, |b, seeds| {
            b.iter(|| black_box(pipeline.lowest_location_in(seeds, pool.as_ref())))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_stage, bench_pipeline);
criterion_main!(benches);
