use bignum::{BigNum, RandomBigNum, Reduction};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn random_below(rng: &mut StdRng, m: &BigNum) -> BigNum {
    BigNum::random_range(rng, &BigNum::one(), m).unwrap()
}

fn bench_mul(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let mut group = c.benchmark_group("mul");
    for bits in [256u64, 1024, 4096] {
        let a = BigNum::random_bits(&mut rng, bits);
        let b = BigNum::random_bits(&mut rng, bits);
        group.bench_with_input(BenchmarkId::from_parameter(bits), &bits, |bencher, _| {
            bencher.iter(|| black_box(black_box(&a) * black_box(&b)))
        });
    }
    group.finish();
}

fn bench_red_mul(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let ctx = Reduction::named("k256").unwrap();
    let a = random_below(&mut rng, ctx.modulus()).to_red(&ctx).unwrap();
    let b = random_below(&mut rng, ctx.modulus()).to_red(&ctx).unwrap();
    c.bench_function("red_mul_k256", |bencher| {
        bencher.iter(|| black_box(black_box(&a).red_mul(black_box(&b)).unwrap()))
    });
}

fn bench_powm(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let p = Reduction::named("p25519").unwrap().modulus().clone();
    let x = random_below(&mut rng, &p);
    let e = random_below(&mut rng, &p);
    c.bench_function("powm_p25519", |bencher| {
        bencher.iter(|| black_box(black_box(&x).powm(black_box(&e), &p).unwrap()))
    });
}

fn bench_invert(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let p = Reduction::named("k256").unwrap().modulus().clone();
    let x = random_below(&mut rng, &p);
    c.bench_function("invert_k256", |bencher| {
        bencher.iter(|| black_box(black_box(&x).invert(&p).unwrap()))
    });
    c.bench_function("fermat_k256", |bencher| {
        bencher.iter(|| black_box(black_box(&x).fermat(&p).unwrap()))
    });
}

fn bench_sqrtm(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let mut group = c.benchmark_group("sqrtm");
    for name in ["k256", "p25519", "p224"] {
        let p = Reduction::named(name).unwrap().modulus().clone();
        let x = random_below(&mut rng, &p).sqr().unwrap().modulo(&p).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &name, |bencher, _| {
            bencher.iter(|| black_box(black_box(&x).sqrtm(&p).unwrap()))
        });
    }
    group.finish();
}

fn bench_is_prime(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let p = Reduction::named("k256").unwrap().modulus().clone();
    c.bench_function("is_prime_k256", |bencher| {
        bencher.iter(|| black_box(black_box(&p).is_prime(&mut rng, 20, 0).unwrap()))
    });
    c.bench_function("is_prime_lucas_k256", |bencher| {
        bencher.iter(|| black_box(black_box(&p).is_prime_lucas(0).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_mul,
    bench_red_mul,
    bench_powm,
    bench_invert,
    bench_sqrtm,
    bench_is_prime
);
criterion_main!(benches);
