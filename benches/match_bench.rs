use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use levenshtein_dfa::{build_with_realization, Casing, Realization};

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &realization in &[Realization::Implicit, Realization::Explicit, Realization::Table] {
        group.bench_with_input(BenchmarkId::new("k1", format!("{realization:?}")), &realization, |b, &r| {
            b.iter(|| build_with_realization("Levenshtein", 1, Casing::Cased, r).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("k2", format!("{realization:?}")), &realization, |b, &r| {
            b.iter(|| build_with_realization("Levenshtein", 2, Casing::Cased, r).unwrap());
        });
    }
    group.finish();
}

fn bench_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("match");
    for &realization in &[Realization::Implicit, Realization::Explicit, Realization::Table] {
        let dfa = build_with_realization("Levenshtein", 2, Casing::Cased, realization).unwrap();
        group.bench_with_input(BenchmarkId::new("exact", format!("{realization:?}")), &dfa, |b, dfa| {
            b.iter(|| dfa.match_str("Levenshtein"));
        });
        group.bench_with_input(BenchmarkId::new("near_miss", format!("{realization:?}")), &dfa, |b, dfa| {
            b.iter(|| dfa.match_str("Levenshtain"));
        });
        group.bench_with_input(BenchmarkId::new("mismatch_with_successor", format!("{realization:?}")), &dfa, |b, dfa| {
            let mut buf = Vec::with_capacity(32);
            b.iter(|| {
                buf.clear();
                dfa.match_str_with_successor("zzzzzzzzzzz", &mut buf)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_match);
criterion_main!(benches);
