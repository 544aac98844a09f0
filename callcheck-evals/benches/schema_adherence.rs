//! Benchmarks for schema adherence checking
//!
//! This benchmark measures:
//! - Single-call validation against a schema
//! - Batch aggregation of all three metrics

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use callcheck_core::PredictionRecord;
use callcheck_evals::{check_call, MetricKind};
use serde_json::{json, Value as JsonValue};

fn schema() -> JsonValue {
    json!({
        "name": "book_flight",
        "parameters": {
            "properties": {
                "origin": {"type": "string"},
                "destination": {"type": "string"},
                "date": {"type": "string"},
                "passengers": {"type": "integer"},
                "max_price": {"type": ["number", "null"]}
            },
            "required": ["origin", "destination", "date"]
        }
    })
}

fn synthetic_batch(n: usize) -> Vec<PredictionRecord> {
    (0..n)
        .map(|i| {
            let gold = json!({
                "name": "book_flight",
                "arguments": {"origin": "SFO", "destination": "JFK", "date": "2026-03-15", "passengers": 1}
            });
            let parsed = match i % 4 {
                0 => gold.clone(),
                1 => json!({"name": "book_flight", "arguments": {"origin": "SFO", "date": "2026-03-15"}}),
                2 => json!({"name": "book_flight", "arguments": {"origin": "SFO", "destination": "JFK", "date": "2026-03-15", "passengers": "two"}}),
                _ => JsonValue::Null,
            };
            PredictionRecord::new(format!("ex-{i:06}"), gold)
                .with_tool_schema(schema())
                .with_parsed_output(parsed)
        })
        .collect()
}

fn bench_check_call(c: &mut Criterion) {
    let schema = schema();
    let passing = json!({
        "name": "book_flight",
        "arguments": {"origin": "SFO", "destination": "JFK", "date": "2026-03-15", "max_price": 420.5}
    });
    let failing = json!({
        "name": "book_flight",
        "arguments": {"origin": "SFO", "destination": "JFK", "date": "2026-03-15", "seat": "12A"}
    });

    let mut group = c.benchmark_group("check_call");
    group.bench_function("passing", |b| {
        b.iter(|| check_call(black_box(Some(&passing)), black_box(Some(&schema)), None))
    });
    group.bench_function("unknown_argument", |b| {
        b.iter(|| check_call(black_box(Some(&failing)), black_box(Some(&schema)), None))
    });
    group.finish();
}

fn bench_metrics(c: &mut Criterion) {
    let mut group = c.benchmark_group("metrics");
    for size in [100usize, 1_000, 10_000] {
        let batch = synthetic_batch(size);
        group.throughput(Throughput::Elements(size as u64));
        for metric in MetricKind::ALL {
            group.bench_with_input(BenchmarkId::new(metric.as_str(), size), &batch, |b, batch| {
                b.iter(|| metric.evaluate(black_box(batch)))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_check_call, bench_metrics);
criterion_main!(benches);
