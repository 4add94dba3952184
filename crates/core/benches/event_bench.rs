//! 이벤트 스키마 벤치마크
//!
//! 디코딩, 검증, 직렬화 성능을 측정합니다.

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use streamwatch_core::event::{StatusEvent, decode, decode_bytes, validate};

const VALID: &str = r#"{"message":"Message 42: The process for Kenny is currently pending.","author":"Kenny","status":"pending","timestamp":"2024-01-01T00:00:42Z"}"#;
const WITH_EXTRAS: &str = r#"{"message":"urgent fix needed","author":"Ryan","status":"completed","timestamp":"2024-01-01T00:00:01Z","priority":1,"tags":["ops","db"],"meta":{"host":"n1"}}"#;
const MISSING: &str = r#"{"message":"m","author":"a","status":"s"}"#;

fn sample_event() -> StatusEvent {
    StatusEvent {
        message: "Message 42: The process for Kenny is currently pending.".to_owned(),
        author: "Kenny".to_owned(),
        status: "pending".to_owned(),
        timestamp: "2024-01-01T00:00:42Z".to_owned(),
    }
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("event_decode");
    group.throughput(Throughput::Elements(1));

    group.bench_function("decode_valid", |b| {
        b.iter(|| decode(black_box(VALID)).unwrap())
    });

    group.bench_function("decode_with_unknown_fields", |b| {
        b.iter(|| decode(black_box(WITH_EXTRAS)).unwrap())
    });

    group.bench_function("decode_bytes_valid", |b| {
        b.iter(|| decode_bytes(black_box(VALID.as_bytes())).unwrap())
    });

    group.bench_function("decode_malformed", |b| {
        b.iter(|| decode(black_box("{\"message\": ")).is_err())
    });

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let valid = decode(VALID).unwrap();
    let missing = decode(MISSING).unwrap();

    let mut group = c.benchmark_group("event_validate");
    group.throughput(Throughput::Elements(1));

    group.bench_function("validate_valid", |b| b.iter(|| validate(black_box(&valid))));
    group.bench_function("validate_missing", |b| {
        b.iter(|| validate(black_box(&missing)))
    });
    group.bench_function("check_valid", |b| {
        b.iter(|| black_box(valid.clone()).check().unwrap())
    });

    group.finish();
}

fn bench_serialize(c: &mut Criterion) {
    let event = sample_event();

    let mut group = c.benchmark_group("event_serialize");
    group.throughput(Throughput::Elements(1));

    group.bench_function("to_payload", |b| {
        b.iter(|| black_box(&event).to_payload().unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_decode, bench_validate, bench_serialize);
criterion_main!(benches);
