use criterion::{criterion_group, criterion_main, Criterion};
use powchain_core::seal::seal;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn bench_seal(c: &mut Criterion) {
    c.bench_function("seal_difficulty_3", |b| {
        let mut rng = StdRng::seed_from_u64(42);
        let payload: Vec<u8> = (0..256).map(|_| rng.gen()).collect();
        let previous_hash: Vec<u8> = (0..32).map(|_| rng.gen()).collect();

        b.iter(|| {
            let _sealed = seal(payload.clone(), previous_hash.clone(), 3, 1_600_000_000);
        });
    });
}

criterion_group!(benches, bench_seal);
criterion_main!(benches);
