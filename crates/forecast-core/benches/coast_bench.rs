use forecast_core::CoastValidator;
use criterion::{criterion_group, criterion_main, Criterion, black_box};

fn bench_validate(c: &mut Criterion) {
    let validator = CoastValidator::bundled().expect("bundled geometry loads");
    // beach, inland, near sea, far sea
    let probes = [(39.50, -0.33), (40.4168, -3.7038), (41.30, 2.30), (40.0, -20.0)];
    c.bench_function("validate_location", |b| {
        b.iter(|| {
            for &(lat, lng) in &probes {
                black_box(validator.validate(black_box(lat), black_box(lng)));
            }
        })
    });
}

criterion_group!(benches, bench_validate);
criterion_main!(benches);
