use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;
use transfer_router::optimization::route_optimizer::{RouteOptimizer, TransferRequest};
use transfer_router::simulation::catalog_generator::{generate_random_catalog, CatalogConfig};

fn bench_catalog(c: &mut Criterion, name: &str, institutions: usize) {
    let config = CatalogConfig {
        institution_count: institutions,
        hub_count: (institutions / 4).max(4),
        seed: Some(1),
        ..Default::default()
    };
    let catalog = generate_random_catalog(&config).unwrap();
    let optimizer = RouteOptimizer::new(&catalog);
    let request = TransferRequest::new(
        "BANK-000",
        format!("BANK-{:03}", institutions - 1).as_str(),
        Decimal::from(250_000),
    );

    c.bench_function(name, |b| {
        b.iter(|| optimizer.find_best_route(black_box(&request)))
    });
}

fn bench_route_10_institutions(c: &mut Criterion) {
    bench_catalog(c, "route_10_institutions", 10);
}

fn bench_route_100_institutions(c: &mut Criterion) {
    bench_catalog(c, "route_100_institutions", 100);
}

fn bench_route_1000_institutions(c: &mut Criterion) {
    bench_catalog(c, "route_1000_institutions", 1000);
}

fn bench_build_graph_1000_institutions(c: &mut Criterion) {
    let config = CatalogConfig {
        institution_count: 1000,
        hub_count: 250,
        seed: Some(1),
        ..Default::default()
    };
    let catalog = generate_random_catalog(&config).unwrap();

    c.bench_function("build_optimizer_1000_institutions", |b| {
        b.iter(|| RouteOptimizer::new(black_box(&catalog)))
    });
}

criterion_group!(
    benches,
    bench_route_10_institutions,
    bench_route_100_institutions,
    bench_route_1000_institutions,
    bench_build_graph_1000_institutions
);
criterion_main!(benches);
