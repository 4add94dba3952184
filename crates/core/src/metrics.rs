//! 메트릭 상수 및 설명 등록
//!
//! 모든 Prometheus 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 각 크레이트는 이 상수를 사용하여 `metrics::counter!()`, `metrics::gauge!()`,
//! `metrics::histogram!()` 매크로를 호출합니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `streamwatch_`
//! - 구성 요소: `processor_`, `producer_`
//! - 접미어: `_total` (counter), `_seconds` (histogram), 없음 (gauge)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(streamwatch_core::metrics::PROCESSOR_EVENTS_PROCESSED_TOTAL).increment(1);
//! ```

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 스킵 사유 레이블 키 (encoding, malformed, validation, broker)
pub const LABEL_REASON: &str = "reason";

/// 알림 규칙 레이블 키 (completion, failure, urgency)
pub const LABEL_RULE: &str = "rule";

/// 심각도 레이블 키 (info, warning, error)
pub const LABEL_SEVERITY: &str = "severity";

// ─── Stream Processor 메트릭 ────────────────────────────────────────

/// Processor: 수신한 전체 레코드 수 (counter)
pub const PROCESSOR_RECORDS_RECEIVED_TOTAL: &str = "streamwatch_processor_records_received_total";

/// Processor: 검증을 통과해 처리된 이벤트 수 (counter)
pub const PROCESSOR_EVENTS_PROCESSED_TOTAL: &str = "streamwatch_processor_events_processed_total";

/// Processor: 스킵된 레코드 수 (counter, label: reason)
pub const PROCESSOR_RECORDS_SKIPPED_TOTAL: &str = "streamwatch_processor_records_skipped_total";

/// Processor: 생성된 알림 수 (counter, labels: rule, severity)
pub const PROCESSOR_ALERTS_EMITTED_TOTAL: &str = "streamwatch_processor_alerts_emitted_total";

/// Processor: 롤링 윈도우 현재 길이 (gauge)
pub const PROCESSOR_WINDOW_SIZE: &str = "streamwatch_processor_window_size";

/// Processor: 레코드 하나의 처리 시간 (histogram, 초)
pub const PROCESSOR_RECORD_DURATION_SECONDS: &str =
    "streamwatch_processor_record_duration_seconds";

// ─── Producer 메트릭 ────────────────────────────────────────────────

/// Producer: 발행된 이벤트 수 (counter)
pub const PRODUCER_EVENTS_PUBLISHED_TOTAL: &str = "streamwatch_producer_events_published_total";

/// Producer: 발행 실패 수 (counter)
pub const PRODUCER_PUBLISH_FAILURES_TOTAL: &str = "streamwatch_producer_publish_failures_total";

// ─── 히스토그램 버킷 정의 ────────────────────────────────────────────

/// 레코드 처리 시간 히스토그램 버킷 (초)
///
/// 10us ~ 100ms 범위. 처리 경로는 모두 메모리 내 동기 연산입니다.
pub const RECORD_DURATION_BUCKETS: [f64; 8] =
    [0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.1];

// ─── 설명 등록 함수 ─────────────────────────────────────────────────

/// 모든 메트릭의 설명(description)을 등록합니다.
///
/// 전역 레코더 설치 후 한 번만 호출해야 합니다.
/// `streamwatch` 바이너리가 메트릭 익스포터를 켤 때 호출합니다.
pub fn describe_all() {
    use metrics::{describe_counter, describe_gauge, describe_histogram};

    describe_counter!(
        PROCESSOR_RECORDS_RECEIVED_TOTAL,
        "Total number of raw records received from the subscription"
    );
    describe_counter!(
        PROCESSOR_EVENTS_PROCESSED_TOTAL,
        "Total number of valid events appended to the rolling window"
    );
    describe_counter!(
        PROCESSOR_RECORDS_SKIPPED_TOTAL,
        "Total number of records skipped, by reason"
    );
    describe_counter!(
        PROCESSOR_ALERTS_EMITTED_TOTAL,
        "Total number of alerts emitted, by rule"
    );
    describe_gauge!(
        PROCESSOR_WINDOW_SIZE,
        "Current number of messages held in the rolling window"
    );
    describe_histogram!(
        PROCESSOR_RECORD_DURATION_SECONDS,
        "Time to process a single record in seconds"
    );

    describe_counter!(
        PRODUCER_EVENTS_PUBLISHED_TOTAL,
        "Total number of events published to the topic"
    );
    describe_counter!(
        PRODUCER_PUBLISH_FAILURES_TOTAL,
        "Total number of failed publish attempts"
    );
}
