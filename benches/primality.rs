use criterion::{black_box, criterion_group, criterion_main, Criterion};
use prime_density::{is_prime, DensityEstimator, Polynomial, PrimeSieve};

pub fn bench_is_prime(c: &mut Criterion) {
    const N: u64 = 1_000_000;
    const STEP: usize = 101;
    let mut group = c.benchmark_group("is_prime");

    group.bench_function("trial division", |b| {
        b.iter(|| (1..N).step_by(STEP).filter(|&n| is_prime(n)).count())
    });
    group.bench_function("sieve", |b| {
        b.iter(|| PrimeSieve::new(black_box(N as usize)).count())
    });
    group.bench_function("large u64", |b| {
        // Near 2^40, about 2^20 trial divisions each
        b.iter(|| {
            (1_099_511_627_689u64..1_099_511_627_789)
                .filter(|&n| is_prime(black_box(n)))
                .count()
        })
    });

    group.finish();
}

pub fn bench_density(c: &mut Criterion) {
    let mut group = c.benchmark_group("density");

    for limit in [10_000u64, 100_000] {
        group.bench_function(format!("euler/{}", limit), |b| {
            let estimator = DensityEstimator::new(Polynomial::euler(), limit);
            b.iter(|| estimator.run())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_is_prime, bench_density);
criterion_main!(benches);
