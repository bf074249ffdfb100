use std::{hint::black_box, time::Duration};

use criterion::{Criterion, criterion_group, criterion_main};

use shape_diff::{
    config::{Config, LogConfig, init_config},
    patch::Patch,
    util::test::create_test_lines,
};

fn criterion_benchmark(c: &mut Criterion) {
    init_config(Config {
        log_config: LogConfig::NoLog,
        threads: 16,
    });
    let mut lines = create_test_lines(114514, 2000);
    let old = lines.next().unwrap();
    let new = lines.next().unwrap();
    let patch = Patch::from_diff(&old, &new);

    c.bench_function("patch_from_diff", |b| {
        b.iter(|| black_box(Patch::from_diff(black_box(&old), black_box(&new))))
    });
    c.bench_function("patch_apply", |b| {
        b.iter(|| black_box(patch.apply_to(black_box(&old)).unwrap()))
    });
    c.bench_function("patch_restore", |b| {
        b.iter(|| black_box(patch.restore(black_box(&new)).unwrap()))
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(10))
        .sample_size(50)
        .warm_up_time(Duration::from_secs(3))
        .noise_threshold(0.1);
    targets = criterion_benchmark
}
criterion_main!(benches);
