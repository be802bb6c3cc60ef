use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bridge_core::calculations::{envelopes, failure_sweep_with_envelopes, find_fos};
use bridge_core::loads::LoadCase;
use bridge_core::materials::MaterialProperties;
use bridge_core::section::presets;

fn bench_envelopes(c: &mut Criterion) {
    let mut group = c.benchmark_group("envelopes");
    group.sample_size(10);
    for positions in [100, 1000] {
        group.bench_function(format!("{} train positions", positions), |b| {
            b.iter(|| envelopes(black_box(LoadCase::HeavyFreight), black_box(452.0), positions))
        });
    }
    group.finish();
}

fn bench_failure_sweep(c: &mut Criterion) {
    let geometry = presets::design0();
    let material = MaterialProperties::matboard();
    let env = envelopes(LoadCase::Locomotive, 452.0, 1000).unwrap();

    c.bench_function("failure sweep design0", |b| {
        b.iter(|| {
            failure_sweep_with_envelopes(
                black_box(&geometry),
                &env,
                LoadCase::Locomotive,
                452.0,
                &material,
            )
            .unwrap()
        })
    });
}

fn bench_single_station(c: &mut Criterion) {
    let geometry = presets::cigar();
    let material = MaterialProperties::matboard();
    c.bench_function("find_fos single station", |b| {
        b.iter(|| find_fos(625.0, &geometry, black_box(120.0), black_box(60_000.0), -2_000.0, &material))
    });
}

criterion_group!(benches, bench_envelopes, bench_failure_sweep, bench_single_station);
criterion_main!(benches);
