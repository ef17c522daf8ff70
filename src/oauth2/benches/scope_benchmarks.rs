/// Benchmarks for scope deciders
///
/// Measures performance of:
/// - Decider construction
/// - Single-scope decisions
/// - Any-scope decisions
/// - Multi-factor composition

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use warden_authz::{AuthorizationDecider, MultiFactorBuilder, Principal, Supplied};
use warden_oauth2::ScopeDeciderFactory;

fn principal(scopes: usize) -> Supplied {
    let authorities: Vec<String> = (0..scopes)
        .map(|i| format!("SCOPE_resource{}:read", i))
        .chain(std::iter::once("FACTOR_PASSWORD".to_string()))
        .collect();
    Supplied::principal(Principal::new("user", "pass", authorities))
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("decider_construction");

    let plain = ScopeDeciderFactory::new();
    let multi_factor = ScopeDeciderFactory::with_factory(
        MultiFactorBuilder::new()
            .require_factor("FACTOR_PASSWORD")
            .build()
            .unwrap(),
    );

    group.bench_function("has_scope_default", |b| {
        b.iter(|| plain.has_scope(black_box("message:read")).unwrap());
    });

    group.bench_function("has_scope_multi_factor", |b| {
        b.iter(|| multi_factor.has_scope(black_box("message:read")).unwrap());
    });

    group.finish();
}

fn bench_decisions(c: &mut Criterion) {
    let mut group = c.benchmark_group("scope_decisions");

    let factory = ScopeDeciderFactory::with_factory(
        MultiFactorBuilder::new()
            .require_factor("FACTOR_PASSWORD")
            .build()
            .unwrap(),
    );

    for held in [1usize, 16, 256] {
        let supplier = principal(held);
        let single = factory.has_scope("resource0:read").unwrap();
        let any = factory
            .has_any_scope(["missing:a", "missing:b", "resource0:read"])
            .unwrap();

        group.bench_with_input(BenchmarkId::new("has_scope", held), &supplier, |b, s| {
            b.iter(|| single.decide(s, &()).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("has_any_scope", held), &supplier, |b, s| {
            b.iter(|| any.decide(s, &()).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_construction, bench_decisions);
criterion_main!(benches);
