use std::{hint::black_box, time::Duration};

use criterion::{Criterion, criterion_group, criterion_main};

use shape_diff::{
    DiffComparator,
    config::{Config, LogConfig, init_config},
    reflect_properties,
};

#[derive(Debug, Clone)]
struct Record {
    id: u64,
    name: String,
    score: f64,
    tags: Vec<String>,
    parent: Option<u64>,
}

reflect_properties!(Record { id, name, score, tags, parent });

fn record(i: u64) -> Record {
    Record {
        id: i,
        name: format!("record-{}", i % 7),
        score: (i % 13) as f64 / 2.0,
        tags: (0..(i % 5)).map(|t| format!("tag-{}", t)).collect(),
        parent: (i % 3 == 0).then_some(i / 3),
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    init_config(Config {
        log_config: LogConfig::NoLog,
        threads: 16,
    });
    let comparator = DiffComparator::<Record>::new();
    let pairs: Vec<(Record, Record)> = (0..10_000).map(|i| (record(i), record(i + 1))).collect();

    c.bench_function("diff_compare", |b| {
        b.iter(|| {
            for (first, last) in &pairs {
                black_box(comparator.diff_compare(black_box(first), black_box(last)).unwrap());
            }
        })
    });
    c.bench_function("diff_compare_all", |b| {
        b.iter(|| black_box(comparator.diff_compare_all(black_box(&pairs)).unwrap()))
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(10))
        .sample_size(30)
        .warm_up_time(Duration::from_secs(3))
        .noise_threshold(0.1);
    targets = criterion_benchmark
}
criterion_main!(benches);
