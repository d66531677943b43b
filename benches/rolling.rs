use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ta_rolling::{Tracker, TrackerKind};

fn generate_sample_data(n: usize) -> Vec<f64> {
    (0..n).map(|i| 100.0 + (i as f64 * 0.01).sin() * 5.0).collect()
}

fn bench_update(c: &mut Criterion) {
    let data = generate_sample_data(10_000);
    let kinds = [
        TrackerKind::Sum,
        TrackerKind::Mean,
        TrackerKind::Max,
        TrackerKind::Min,
        TrackerKind::Delta,
        TrackerKind::PctChange,
        TrackerKind::Quantile(0.3),
        TrackerKind::StdDev,
        TrackerKind::Skew,
        TrackerKind::Kurt,
        TrackerKind::Wma,
    ];

    for &period in &[10, 100, 1000] {
        let mut group = c.benchmark_group(format!("update_{period}"));

        for kind in kinds {
            group.bench_function(kind.to_string(), |b| {
                b.iter(|| {
                    let mut tracker = Tracker::new(kind, period).unwrap();
                    for &v in &data {
                        black_box(tracker.update(black_box(v)).ok());
                    }
                })
            });
        }

        group.finish();
    }
}

criterion_group!(benches, bench_update);
criterion_main!(benches);
