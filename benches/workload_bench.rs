// ABOUTME: Criterion benchmarks for workload analytics and impact simulation
// ABOUTME: Measures snapshot computation, what-if simulation, and proposal generation over long programs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forge Assist Contributors

//! Criterion benchmarks for the analytics path that runs after every
//! confirmed mutation.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use chrono::Weekday;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use forge_assist::intelligence::{
    AnalyticsSnapshot, ImpactSimulator, ProposalConfig, ProposalContext, ProposalGenerator,
    Trigger,
};
use forge_assist::models::{ChangeDescriptor, DaySlot, LoadSeries};

/// Program lengths in weeks
const PROGRAM_WEEKS: [usize; 3] = [4, 12, 52];

#[allow(clippy::cast_precision_loss)]
fn undulating_series(weeks: usize) -> LoadSeries {
    LoadSeries::new(
        (0..weeks * 7)
            .map(|day| match day % 7 {
                5 | 6 => 0.0,
                d => 250.0 + ((day * 37 + d * 11) % 200) as f64,
            })
            .collect(),
    )
}

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("analytics_snapshot");
    let history = undulating_series(4);

    for weeks in PROGRAM_WEEKS {
        let series = undulating_series(weeks);
        group.throughput(Throughput::Elements((weeks * 7) as u64));
        group.bench_with_input(BenchmarkId::new("compute", weeks), &series, |b, series| {
            b.iter(|| AnalyticsSnapshot::compute(black_box(&history), black_box(series)));
        });
    }
    group.finish();
}

fn bench_simulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("impact_simulation");
    let simulator = ImpactSimulator::new(undulating_series(4));

    for weeks in PROGRAM_WEEKS {
        let series = undulating_series(weeks);
        let changes: Vec<ChangeDescriptor> = (1..=weeks as u32)
            .map(|week| ChangeDescriptor::modify_day_load(DaySlot::new(week, Weekday::Mon), 300.0, 240.0))
            .collect();
        group.bench_with_input(BenchmarkId::new("simulate", weeks), &series, |b, series| {
            b.iter(|| simulator.simulate(black_box(&changes), black_box(series)));
        });
    }
    group.finish();
}

fn bench_proposals(c: &mut Criterion) {
    let mut group = c.benchmark_group("proposals");
    let generator = ProposalGenerator::new(
        ImpactSimulator::new(undulating_series(4)),
        ProposalConfig::default(),
    );

    for weeks in PROGRAM_WEEKS {
        let series = undulating_series(weeks);
        group.bench_with_input(BenchmarkId::new("high_acwr", weeks), &series, |b, series| {
            b.iter(|| generator.generate(&Trigger::HighAcwr, &ProposalContext::new(black_box(series))));
        });
        group.bench_with_input(BenchmarkId::new("phase_smoothing", weeks), &series, |b, series| {
            b.iter(|| {
                generator.propose_phase_optimizations("bench", 1, weeks as u32, black_box(series))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_snapshot, bench_simulation, bench_proposals);
criterion_main!(benches);
