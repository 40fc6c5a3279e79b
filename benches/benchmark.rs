use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use hexshare::{ShareCombiner, ShareDealer};

fn benchmark_share(c: &mut Criterion) {
    // Many shares to stress the per-share evaluation loop
    let mut dealer = ShareDealer::builder(255, 3).build().unwrap();
    let secret = vec![0x55u8; 1024];
    c.bench_function("share 1024 bytes", |b| {
        b.iter(|| {
            let tokens = dealer.share(black_box(&secret)).unwrap();
            black_box(tokens);
        })
    });
}

fn benchmark_combine(c: &mut Criterion) {
    let mut dealer = ShareDealer::builder(5, 3).build().unwrap();
    let tokens = dealer.share(b"my secret data").unwrap();
    let combiner = ShareCombiner::new();
    c.bench_function("combine secret", |b| {
        b.iter(|| {
            let secret = combiner.combine(black_box(&tokens)).unwrap();
            black_box(secret);
        })
    });
}

fn benchmark_combine_wide(c: &mut Criterion) {
    // Threshold-many shares out of the maximum fan-out
    let mut dealer = ShareDealer::builder(255, 128).build().unwrap();
    let secret = vec![0xA7u8; 256];
    let tokens = dealer.share(&secret).unwrap();
    let combiner = ShareCombiner::new();
    c.bench_function("combine 128 of 255 shares", |b| {
        b.iter(|| {
            let secret = combiner.combine(black_box(&tokens[0..128])).unwrap();
            black_box(secret);
        })
    });
}

criterion_group!(
    benches,
    benchmark_share,
    benchmark_combine,
    benchmark_combine_wide
);
criterion_main!(benches);
