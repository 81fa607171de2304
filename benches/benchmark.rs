//! Benchmarks for the rule engine transforms.
//!
//! Measures obfuscation throughput, the scanning disentangler against the
//! indexed disentangler of a validated rule set, and how the scan scales
//! with rule-set size.

use charfuscator::{disentangle, obfuscate, ObfuscationOperationRule, Operation, RuleSet};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Secret used consistently across all benchmarks.
const BENCH_SECRET: &str = "leonardo da vinci was a renaissance polymath";

/// Builds the full-alphabet Caesar fixture with `extra` additional
/// digit-mapping rules appended, for rule-count scaling runs.
fn caesar_rules(extra: usize) -> RuleSet {
    let letters = ('a'..='z').map(|c| {
        let next = if c == 'z' {
            'a'
        } else {
            char::from(c as u8 + 1)
        };
        ObfuscationOperationRule::with_operation(c, next, Operation::UpperCase, [0])
    });
    let digits = (0..extra.min(10)).map(|d| {
        let c = char::from(b'0' + d as u8);
        ObfuscationOperationRule::new(c, char::from(b'0' + ((d as u8 + 1) % 10)))
    });
    RuleSet::new(letters.chain(digits)).expect("fixture is non-empty")
}

/// Benchmarks `obfuscate()` throughput over the full-alphabet fixture.
fn bench_obfuscate(c: &mut Criterion) {
    let rules = caesar_rules(0);

    let mut group = c.benchmark_group("obfuscate");
    group.throughput(Throughput::Bytes(BENCH_SECRET.len() as u64));

    group.bench_function("caesar_26_rules", |b| {
        b.iter(|| obfuscate(black_box(&rules), black_box(BENCH_SECRET)));
    });

    group.finish();
}

/// Benchmarks the scanning disentangler against the indexed one.
///
/// Both recover the same string; the validated rule set trades a one-time
/// reverse-index build for per-character lookups instead of rule scans.
fn bench_disentangle(c: &mut Criterion) {
    let rules = caesar_rules(0);
    let validated = caesar_rules(0).into_validated().expect("fixture validates");
    let obfuscated = obfuscate(&rules, BENCH_SECRET);

    let mut group = c.benchmark_group("disentangle");
    group.throughput(Throughput::Bytes(obfuscated.len() as u64));

    group.bench_function("scanning", |b| {
        b.iter(|| disentangle(black_box(&rules), black_box(&obfuscated)));
    });

    group.bench_function("indexed", |b| {
        b.iter(|| validated.disentangle(black_box(&obfuscated)));
    });

    group.finish();
}

/// Benchmarks scanning disentangle cost across rule-set sizes.
fn bench_disentangle_rule_scaling(c: &mut Criterion) {
    let extra_counts: &[usize] = &[0, 5, 10];

    let mut group = c.benchmark_group("disentangle_rule_scaling");
    group.throughput(Throughput::Bytes(BENCH_SECRET.len() as u64));

    for &extra in extra_counts {
        let rules = caesar_rules(extra);
        let obfuscated = obfuscate(&rules, BENCH_SECRET);

        group.bench_with_input(BenchmarkId::from_parameter(26 + extra), &extra, |b, _| {
            b.iter(|| disentangle(black_box(&rules), black_box(&obfuscated)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_obfuscate,
    bench_disentangle,
    bench_disentangle_rule_scaling,
);
criterion_main!(benches);
