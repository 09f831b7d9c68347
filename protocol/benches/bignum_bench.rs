// Big integer benchmarks.
//
// Covers multiplication across the native fast path and Karatsuba, long
// division, modular exponentiation and decimal parsing at growing sizes.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;

use ntb_protocol::bignum::BigInteger;

fn operands(digits: usize, seed: u64) -> (BigInteger, BigInteger) {
    let mut rng = StdRng::seed_from_u64(seed);
    (
        BigInteger::random_with_digits_from(&mut rng, digits).unwrap(),
        BigInteger::random_with_digits_from(&mut rng, digits).unwrap(),
    )
}

fn bench_multiply(c: &mut Criterion) {
    let mut group = c.benchmark_group("bignum/multiply");

    // 9 digits stays native; the rest recurse through Karatsuba.
    for digits in [9, 40, 200, 1_000] {
        let (a, b) = operands(digits, 1);
        group.throughput(Throughput::Elements(digits as u64));
        group.bench_with_input(BenchmarkId::from_parameter(digits), &(a, b), |bench, (a, b)| {
            bench.iter(|| a * b);
        });
    }

    group.finish();
}

fn bench_divide(c: &mut Criterion) {
    let mut group = c.benchmark_group("bignum/div_rem");

    // 18 digits takes the native path; wider dividends use long division.
    for digits in [18, 40, 200] {
        let (a, _) = operands(digits * 2, 2);
        let (b, _) = operands(digits, 3);
        group.bench_with_input(BenchmarkId::from_parameter(digits), &(a, b), |bench, (a, b)| {
            bench.iter(|| a.div_rem(b).unwrap());
        });
    }

    group.finish();
}

fn bench_mod_pow(c: &mut Criterion) {
    let (base, modulus) = operands(30, 4);
    let exponent = BigInteger::from(65_537u32);

    c.bench_function("bignum/mod_pow_65537", |b| {
        b.iter(|| base.mod_pow(&exponent, &modulus).unwrap());
    });
}

fn bench_parse(c: &mut Criterion) {
    let yocto = "123456789012345678901234567890123456789";

    c.bench_function("bignum/parse_39_digits", |b| {
        b.iter(|| yocto.parse::<BigInteger>().unwrap());
    });
}

criterion_group!(benches, bench_multiply, bench_divide, bench_mod_pow, bench_parse);
criterion_main!(benches);
