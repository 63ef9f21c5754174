//! Component benchmarks: classification and label merging throughput.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ndarray::Array2;

use multiclass::{type_of_target, unique_labels, Value};

fn int_labels(n: usize, n_classes: i64) -> Vec<i64> {
    (0..n as i64).map(|i| (i * 7919) % n_classes).collect()
}

fn bench_type_of_target(c: &mut Criterion) {
    let mut group = c.benchmark_group("component/type_of_target");

    for n in [100usize, 10_000, 1_000_000] {
        let labels = int_labels(n, 10);
        let dense = Value::from(ndarray::Array1::from_vec(labels.clone()));
        let nested = Value::from(labels);

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("array", n), &dense, |b, y| {
            b.iter(|| black_box(type_of_target(black_box(y))))
        });
        group.bench_with_input(BenchmarkId::new("sequence", n), &nested, |b, y| {
            b.iter(|| black_box(type_of_target(black_box(y))))
        });
    }

    group.finish();
}

fn bench_unique_labels(c: &mut Criterion) {
    let mut group = c.benchmark_group("component/unique_labels");

    for n in [100usize, 10_000, 1_000_000] {
        let y_true = Value::from(ndarray::Array1::from_vec(int_labels(n, 50)));
        let y_pred = Value::from(ndarray::Array1::from_vec(int_labels(n, 40)));

        group.throughput(Throughput::Elements(2 * n as u64));
        group.bench_with_input(BenchmarkId::new("multiclass", n), &(y_true, y_pred), |b, (t, p)| {
            b.iter(|| black_box(unique_labels([t, p])))
        });
    }

    let indicator = Value::from(Array2::<u64>::from_shape_fn((10_000, 32), |(i, j)| {
        ((i + j) % 2) as u64
    }));
    group.bench_function("indicator/10000x32", |b| {
        b.iter(|| black_box(unique_labels([black_box(&indicator)])))
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = bench_type_of_target, bench_unique_labels
}
criterion_main!(benches);
