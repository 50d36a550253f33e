//! Performance benchmarks for the DigiGold Reconciliation Engine.
//!
//! This benchmark suite verifies that the engine meets performance targets:
//! - 100-record reconciliation: < 1ms mean
//! - 1,000-record reconciliation: < 15ms mean
//! - 10,000-record reconciliation: < 200ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use digigold_recon::config::ReconcileSpec;
use digigold_recon::models::{RawRecord, SourceData};
use digigold_recon::reconciliation::reconcile;

/// Cycles through the interesting status combinations so every decision
/// rule gets exercised.
fn finfinity_status(i: usize) -> &'static str {
    match i % 5 {
        0 => "PAID",
        1 => "ACTIVE",
        2 => "PENDING",
        3 => "FAILED",
        _ => "EXPIRED",
    }
}

fn cashfree_status(i: usize) -> &'static str {
    match i % 4 {
        0 => "SUCCESS",
        1 => "FAILED",
        2 => "PENDING",
        _ => "USER_DROPPED",
    }
}

fn augmont_status(i: usize) -> &'static str {
    if i % 7 == 0 { "Cancelled" } else { "Not Cancelled" }
}

fn row(fields: &[(&str, String)]) -> RawRecord {
    fields
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// Creates the three datasets for a run of the given size. Roughly one in
/// ten records is missing from Cashfree and one in eight from Augmont.
fn create_datasets(record_count: usize) -> (SourceData, SourceData, SourceData) {
    let finfinity = SourceData::new(
        vec![
            "Order Id".to_string(),
            "Merchant Transaction ID".to_string(),
            "Order Status".to_string(),
        ],
        (0..record_count)
            .map(|i| {
                row(&[
                    ("Order Id", format!("ORD{:06}", i)),
                    ("Merchant Transaction ID", format!("TXN{:06}", i)),
                    ("Order Status", finfinity_status(i).to_string()),
                ])
            })
            .collect(),
    );

    let cashfree = SourceData::new(
        vec!["Order Id".to_string(), "Transaction Status".to_string()],
        (0..record_count)
            .filter(|i| i % 10 != 9)
            .map(|i| {
                row(&[
                    ("Order Id", format!("ord{:06}", i)),
                    ("Transaction Status", cashfree_status(i).to_string()),
                ])
            })
            .collect(),
    );

    let augmont = SourceData::new(
        vec![
            "Merchant Transaction Id".to_string(),
            "Transaction Status".to_string(),
        ],
        (0..record_count)
            .filter(|i| i % 8 != 7)
            .map(|i| {
                row(&[
                    ("Merchant Transaction Id", format!("txn{:06}", i)),
                    ("Transaction Status", augmont_status(i).to_string()),
                ])
            })
            .collect(),
    );

    (finfinity, cashfree, augmont)
}

/// Benchmark: small batch reconciliation.
///
/// Target: < 1ms mean
fn bench_100_records(c: &mut Criterion) {
    let (finfinity, cashfree, augmont) = create_datasets(100);
    let spec = ReconcileSpec::default();

    c.bench_function("reconcile_100", |b| {
        b.iter(|| {
            let report = reconcile(&finfinity, &cashfree, &augmont, &spec).unwrap();
            black_box(report)
        })
    });
}

/// Benchmark: typical daily batch.
///
/// Target: < 15ms mean
fn bench_1000_records(c: &mut Criterion) {
    let (finfinity, cashfree, augmont) = create_datasets(1_000);
    let spec = ReconcileSpec::default();

    c.bench_function("reconcile_1000", |b| {
        b.iter(|| {
            let report = reconcile(&finfinity, &cashfree, &augmont, &spec).unwrap();
            black_box(report)
        })
    });
}

/// Benchmark: various dataset sizes to understand scaling behavior.
fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    for record_count in [100usize, 1_000, 10_000] {
        let (finfinity, cashfree, augmont) = create_datasets(record_count);
        let spec = ReconcileSpec::default();

        group.throughput(Throughput::Elements(record_count as u64));
        if record_count >= 10_000 {
            group.sample_size(10);
        }
        group.bench_with_input(
            BenchmarkId::new("records", record_count),
            &record_count,
            |b, _| {
                b.iter(|| {
                    let report = reconcile(&finfinity, &cashfree, &augmont, &spec).unwrap();
                    black_box(report)
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_100_records, bench_1000_records, bench_scaling);
criterion_main!(benches);
