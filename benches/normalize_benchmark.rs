//! Performance benchmarks for reply processing
//!
//! Measures normalization of event logs of growing size, SSE line decoding,
//! and presenter step generation.
//! Run with: cargo bench

use adk_chat::normalize::normalize;
use adk_chat::presenter::present;
use adk_chat::sse::parse_lines;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Value};

/// An event log with one tool round-trip and one text event per turn.
fn event_log(turns: usize) -> Value {
    let events: Vec<Value> = (0..turns)
        .flat_map(|i| {
            [
                json!({"content": {"role": "model", "parts": [
                    {"functionCall": {"name": "get_section_url", "args": {"section": format!("s{}", i)}}}
                ]}}),
                json!({"content": {"role": "user", "parts": [
                    {"functionResponse": {"name": "get_section_url", "response": {"url": format!("/s{}", i)}}}
                ]}}),
                json!({"content": {"role": "model", "parts": [
                    {"text": format!("Section {} lives at /s{}.", i, i)}
                ]}}),
            ]
        })
        .collect();
    Value::Array(events)
}

fn bench_normalize_event_log(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_event_log");

    for turns in [1, 10, 50, 200].iter() {
        let payload = event_log(*turns);
        group.throughput(Throughput::Elements((*turns * 3) as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_turns", turns)),
            &payload,
            |b, payload| b.iter(|| black_box(normalize(black_box(payload)))),
        );
    }

    group.finish();
}

fn bench_normalize_object_fallback(c: &mut Criterion) {
    let items: Vec<u32> = (0..50).collect();
    let payload = json!({
        "timestamp": "2024-01-01T00:00:00Z",
        "request_id": "abc",
        "data": {"items": items, "cursor": null},
        "status": "ok"
    });

    c.bench_function("normalize_object_fallback", |b| {
        b.iter(|| black_box(normalize(black_box(&payload))))
    });
}

fn bench_sse_lines(c: &mut Criterion) {
    let lines: Vec<String> = event_log(100)
        .as_array()
        .into_iter()
        .flatten()
        .flat_map(|event| [format!("data: {}", event), String::new()])
        .collect();

    c.bench_function("sse_parse_300_events", |b| {
        b.iter(|| parse_lines(black_box(lines.iter())).count())
    });
}

fn bench_present(c: &mut Criterion) {
    let mut group = c.benchmark_group("present");

    for words in [10, 100, 1000].iter() {
        let text = (0..*words)
            .map(|i| format!("word{}", i))
            .collect::<Vec<_>>()
            .join(" ");
        group.throughput(Throughput::Bytes(text.len() as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_words", words)),
            &text,
            |b, text| b.iter(|| black_box(present(black_box(text)))),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_normalize_event_log,
    bench_normalize_object_fallback,
    bench_sse_lines,
    bench_present
);
criterion_main!(benches);
