//! 프로듀서 통합 테스트
//!
//! 일시 정지된 tokio 시간 위에서 인메모리 브로커로 발행 간격, 종료, 실패 경로를 검증합니다.

use std::time::Duration;

use streamwatch_broker::{FaultPlan, MemoryBroker};
use streamwatch_core::event::{decode_bytes, validate};
use streamwatch_generator::{EventGenerator, EventProducer, GeneratorConfig, GeneratorError};
use tokio_util::sync::CancellationToken;

const TOPIC: &str = "unique_topic";

fn config(max_events: Option<u64>) -> GeneratorConfig {
    GeneratorConfig {
        max_events,
        ..GeneratorConfig::default()
    }
}

/// max_events개를 발행하고 모두 유효한 이벤트다
#[tokio::test(start_paused = true)]
async fn publishes_max_events_valid_records() {
    let broker = MemoryBroker::new();
    let producer = EventProducer::new(config(Some(3))).unwrap();

    let stats = producer
        .run(&broker, CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(stats.generated, 3);
    assert_eq!(stats.published, 3);
    assert_eq!(stats.failed, 0);

    let records = broker.records(TOPIC).await;
    assert_eq!(records.len(), 3);
    for (i, raw) in records.iter().enumerate() {
        let record = decode_bytes(raw).unwrap();
        assert!(validate(&record));
        let message = record.message.unwrap();
        assert!(message.starts_with(&format!("Message {}: ", i + 1)));
    }
}

/// 틱 간격만큼 시간이 흘러야 다음 이벤트가 발행된다
#[tokio::test(start_paused = true)]
async fn paces_publishing_by_interval() {
    let broker = MemoryBroker::new();
    let config = GeneratorConfig {
        interval: Duration::from_secs(2),
        ..config(Some(4))
    };
    let producer = EventProducer::new(config).unwrap();

    let start = tokio::time::Instant::now();
    producer.run(&broker, CancellationToken::new()).await.unwrap();

    // 첫 틱은 즉시, 이후 2초 간격
    assert_eq!(start.elapsed(), Duration::from_secs(6));
}

/// 종료 신호를 받으면 다음 틱 전에 멈춘다
#[tokio::test(start_paused = true)]
async fn cancellation_stops_production() {
    let broker = MemoryBroker::new();
    let producer = EventProducer::new(config(None)).unwrap();
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(2500)).await;
        trigger.cancel();
    });

    let stats = producer.run(&broker, cancel).await.unwrap();
    // t=0, t=1, t=2 에서 발행
    assert_eq!(stats.published, 3);
    assert_eq!(broker.records(TOPIC).await.len(), 3);
}

/// 간격 0이면 대기 없이 발행한다
#[tokio::test(start_paused = true)]
async fn zero_interval_publishes_without_waiting() {
    let broker = MemoryBroker::new();
    let config = GeneratorConfig {
        interval: Duration::ZERO,
        ..config(Some(10))
    };
    let start = tokio::time::Instant::now();
    let stats = EventProducer::new(config)
        .unwrap()
        .run(&broker, CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(stats.published, 10);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

/// 발행자 생성 실패는 치명적이다
#[tokio::test]
async fn producer_acquisition_failure_is_fatal() {
    let broker = MemoryBroker::with_faults(FaultPlan {
        reject_producers: true,
        ..FaultPlan::default()
    });
    let err = EventProducer::new(config(Some(1)))
        .unwrap()
        .run(&broker, CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        GeneratorError::ResourceAcquisition {
            resource: "publisher",
            ..
        }
    ));
}

/// 토픽 보장 실패는 치명적이며 아무것도 발행하지 않는다
#[tokio::test]
async fn topic_setup_failure_is_fatal() {
    let broker = MemoryBroker::with_faults(FaultPlan {
        reject_topics: true,
        ..FaultPlan::default()
    });
    let err = EventProducer::new(config(Some(1)))
        .unwrap()
        .run(&broker, CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        GeneratorError::ResourceAcquisition {
            resource: "topic",
            ..
        }
    ));
    assert!(broker.records(TOPIC).await.is_empty());
}

/// 브로커가 닫힌 뒤의 발행 실패는 집계되고 루프는 계속된다
#[tokio::test(start_paused = true)]
async fn publish_failures_are_counted() {
    let broker = MemoryBroker::new();
    let closer = broker.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(500)).await;
        closer.close();
    });

    let stats = EventProducer::new(config(Some(3)))
        .unwrap()
        .run(&broker, CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(stats.generated, 3);
    assert_eq!(stats.published, 1);
    assert_eq!(stats.failed, 2);
}

/// 고정 시드 생성기를 주입하면 발행 순서가 재현된다
#[tokio::test(start_paused = true)]
async fn seeded_generator_is_reproducible() {
    let mut runs = Vec::new();
    for _ in 0..2 {
        let broker = MemoryBroker::new();
        let generator = EventGenerator::with_seed(&GeneratorConfig::default(), 42).unwrap();
        EventProducer::with_generator(config(Some(5)), generator)
            .unwrap()
            .run(&broker, CancellationToken::new())
            .await
            .unwrap();
        let authors: Vec<_> = broker
            .records(TOPIC)
            .await
            .iter()
            .map(|raw| decode_bytes(raw).unwrap().author.unwrap())
            .collect();
        runs.push(authors);
    }
    assert_eq!(runs[0], runs[1]);
}
