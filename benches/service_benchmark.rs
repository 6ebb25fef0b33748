//! Performance benchmarks for data-kit
//!
//! This benchmark suite measures:
//! - InMemory service operations (add, get_by_id, update, delete)
//! - Scanner cost across store sizes, with a second kind mixed in
//! - Fixture generation
//!
//! Run with: cargo bench
//! View results: open target/criterion/report/index.html

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use data_kit::fixture::{CustomerGenerator, FixtureGenerator, MockConfig};
use data_kit::models::{Customer, Product};
use data_kit::{DataService, Fixture, InMemoryDataService, MockedDataService};
use std::hint::black_box;

// ============================================================================
// Benchmark Fixtures
// ============================================================================

/// Service over a store holding `size` customers and `size` products,
/// interleaved.
fn populated(rt: &tokio::runtime::Runtime, size: usize) -> InMemoryDataService<Customer> {
    let customers = InMemoryDataService::<Customer>::new();
    let products = customers.for_kind::<Product>();

    rt.block_on(async {
        for i in 0..size {
            customers
                .add(Customer::new(format!("Customer {}", i), "c@x.cz"))
                .await
                .expect("Failed to add customer");
            products
                .add(Product::new(format!("Product {}", i), "", 1.0))
                .await
                .expect("Failed to add product");
        }
    });

    customers
}

// ============================================================================
// Group 1: InMemory Service Benchmarks
// ============================================================================

fn service_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("inmemory_service");

    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new().expect("Failed to create Tokio runtime");

    for size in [10usize, 100, 1_000].iter() {
        group
            .throughput(Throughput::Elements(*size as u64))
            .bench_with_input(BenchmarkId::new("get_all", size), size, |b, &size| {
                let service = populated(&rt, size);
                b.to_async(&rt).iter(|| async { service.get_all().await });
            });

        // Last customer sits at the end of the store
        group.bench_with_input(BenchmarkId::new("get_by_id", size), size, |b, &size| {
            let service = populated(&rt, size);
            let id = size as u32;
            b.to_async(&rt)
                .iter(|| async { service.get_by_id(black_box(id)).await });
        });

        group.bench_with_input(BenchmarkId::new("add_delete", size), size, |b, &size| {
            let service = populated(&rt, size);
            b.to_async(&rt).iter(|| async {
                let added = service
                    .add(Customer::new("Bench", "b@x.cz"))
                    .await
                    .expect("Failed to add");
                service.delete(black_box(added.id)).await
            });
        });

        group.bench_with_input(BenchmarkId::new("update", size), size, |b, &size| {
            let service = populated(&rt, size);
            let record = Customer {
                id: 1,
                name: "Renamed".to_string(),
                email: "r@x.cz".to_string(),
            };
            b.to_async(&rt)
                .iter(|| async { service.update(black_box(record.clone())).await });
        });
    }

    // Miss scans the whole store
    group.bench_function("get_by_id_miss", |b| {
        let service = populated(&rt, 1_000);
        b.to_async(&rt)
            .iter(|| async { service.get_by_id(black_box(0)).await });
    });

    group.finish();
}

// ============================================================================
// Group 2: Fixture Benchmarks
// ============================================================================

fn fixture_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixtures");

    group.bench_function("generate_customers_100", |b| {
        let mut generator = CustomerGenerator::seeded(1);
        b.iter(|| generator.generate(black_box(100)));
    });

    group.bench_function("generate_products_6", |b| {
        let config = MockConfig::default().with_seed(1);
        let mut generator = Product::generator(&config).expect("Failed to build generator");
        b.iter(|| generator.generate(black_box(6)));
    });

    group.bench_function("mocked_service_new", |b| {
        b.iter(MockedDataService::<Customer>::new);
    });

    group.finish();
}

// ============================================================================
// Benchmark Registration
// ============================================================================

criterion_group!(benches, service_benchmarks, fixture_benchmarks);
criterion_main!(benches);
