//! Criterion benchmarks for planning and report assembly.
//! Inputs are synthetic snapshots from `pinplan::synth` with fixed replay tokens.
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use pinplan::planner::{plan, ExtraSide, FormationConfig, PinCount, Side};
use pinplan::report::assemble;
use pinplan::synth::{draw_snapshot, ReplayToken, SynthCfg};

fn bench_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan");
    let configs = [
        ("cross_2", FormationConfig::cross(PinCount::Two, 0, ExtraSide::Left)),
        ("cross_3", FormationConfig::cross(PinCount::Three, 0, ExtraSide::Right)),
        ("lateral_3", FormationConfig::one_sided(Side::Lateral, PinCount::Three, 0)),
    ];
    for (name, config) in configs {
        group.bench_with_input(BenchmarkId::new("formation", name), &config, |b, config| {
            b.iter_batched(
                || draw_snapshot(&SynthCfg::default(), ReplayToken::new(43, 0)),
                |snap| {
                    let _res = plan(&snap, config);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_report(c: &mut Criterion) {
    let snap = draw_snapshot(&SynthCfg::default(), ReplayToken::new(44, 0));
    c.bench_function("assemble_six_scenarios", |b| {
        b.iter(|| assemble(&snap, 0, ExtraSide::Left))
    });
}

criterion_group!(benches, bench_plan, bench_report);
criterion_main!(benches);
