//! # SkillChain Registry Benchmarks
//!
//! | Area | Operation | Target |
//! |------|-----------|--------|
//! | Registry | submitProject | < 50µs |
//! | Registry | upvoteProject (fresh voter) | < 50µs |
//! | Registry | getProject | < 10µs |
//! | Catalog | explore over N projects | linear in N |
//! | Hashing | keccak256 of a document | ~memory bandwidth |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sc_01_project_registry::domain::NewProject;
use sc_01_project_registry::ports::ProjectRegistryApi;
use sc_01_project_registry::service::create_test_service;
use sc_02_project_catalog::prelude::ProjectCatalog;
use shared_types::{keccak256, Address};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::runtime::Runtime;

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("tokio runtime")
}

fn voter(n: u64) -> Address {
    let mut bytes = [0u8; 20];
    bytes[12..].copy_from_slice(&n.to_be_bytes());
    Address::new(bytes)
}

// ============================================================================
// Registry
// ============================================================================

fn bench_registry(c: &mut Criterion) {
    let rt = runtime();
    let registry = Arc::new(rt.block_on(create_test_service()).expect("deploy"));
    rt.block_on(async {
        for i in 0..1_000u64 {
            let project = NewProject::new(format!("p{i}"), "", ["rust", "developer"]);
            registry
                .submit_project(voter(i % 7 + 1), project)
                .await
                .expect("seed");
        }
    });

    let mut group = c.benchmark_group("sc-01-project-registry");

    group.bench_function("submit_project", |b| {
        b.to_async(&rt).iter(|| async {
            registry
                .submit_project(voter(1), NewProject::new("bench", "", ["rust"]))
                .await
                .expect("submit")
        })
    });

    let next_voter = AtomicU64::new(1_000_000);
    group.bench_function("upvote_project_fresh_voter", |b| {
        b.to_async(&rt).iter(|| async {
            let v = voter(next_voter.fetch_add(1, Ordering::Relaxed));
            registry.upvote_project(v, 1).await.expect("upvote")
        })
    });

    group.bench_function("get_project", |b| {
        b.to_async(&rt)
            .iter(|| async { black_box(registry.get_project(500).await.expect("read")) })
    });

    group.bench_function("get_projects_of", |b| {
        b.to_async(&rt)
            .iter(|| async { black_box(registry.get_projects_of(voter(3)).await) })
    });

    group.finish();
}

// ============================================================================
// Catalog
// ============================================================================

fn bench_catalog_explore(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("sc-02-project-catalog");

    for size in [10u64, 100, 1_000] {
        let registry = Arc::new(rt.block_on(create_test_service()).expect("deploy"));
        rt.block_on(async {
            for i in 0..size {
                let project = NewProject::new(format!("p{i}"), "", ["gaming"]);
                registry
                    .submit_project(voter(i % 5 + 1), project)
                    .await
                    .expect("seed");
            }
        });
        let catalog = ProjectCatalog::new(registry);

        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::new("explore", size), &size, |b, _| {
            b.to_async(&rt).iter(|| async { black_box(catalog.explore().await) })
        });
    }

    group.finish();
}

// ============================================================================
// Hashing
// ============================================================================

fn bench_document_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("document-hash");

    for size in [1_024usize, 64 * 1_024, 1_024 * 1_024] {
        let document = vec![0x5Au8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("keccak256", size), &document, |b, doc| {
            b.iter(|| keccak256(black_box(doc)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_registry, bench_catalog_explore, bench_document_hash);
criterion_main!(benches);
