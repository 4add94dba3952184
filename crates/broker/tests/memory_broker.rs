//! 인메모리 브로커 통합 테스트
//!
//! 발행자와 구독이 서로 다른 태스크에서 동작할 때의 순서 보장과 종료 동작을 검증합니다.

use std::time::Duration;

use bytes::Bytes;
use streamwatch_broker::{Broker, MemoryBroker, Publisher, Subscription, SubscriptionGuard};

/// 다른 태스크에서 발행한 레코드를 구독이 순서대로 받는다
#[tokio::test]
async fn cross_task_delivery_preserves_order() {
    let broker = MemoryBroker::new();
    broker.ensure_topic("unique_topic").await.unwrap();

    let mut guard = SubscriptionGuard::new(
        broker
            .connect_consumer("unique_topic", "default_group")
            .await
            .unwrap(),
    );

    let producer_side = broker.clone();
    let producer = tokio::spawn(async move {
        let publisher = producer_side.connect_producer().await.unwrap();
        for i in 0..50u32 {
            publisher
                .publish("unique_topic", None, Bytes::from(i.to_string()))
                .await
                .unwrap();
            if i % 10 == 0 {
                tokio::task::yield_now().await;
            }
        }
    });

    for expected in 0..50u32 {
        let record = tokio::time::timeout(Duration::from_secs(2), guard.next_record())
            .await
            .expect("record should arrive")
            .expect("stream should be open")
            .expect("record should be ok");
        assert_eq!(record.value, Bytes::from(expected.to_string()));
        assert_eq!(record.offset, i64::from(expected));
    }

    producer.await.unwrap();
    guard.close().unwrap();
    assert_eq!(broker.active_subscriptions(), 0);
}

/// 가드가 스코프를 벗어나면 구독이 해제된다
#[tokio::test]
async fn guard_releases_subscription_at_scope_end() {
    let broker = MemoryBroker::new();
    {
        let _guard = SubscriptionGuard::new(broker.connect_consumer("t", "g").await.unwrap());
        assert_eq!(broker.active_subscriptions(), 1);
    }
    assert_eq!(broker.active_subscriptions(), 0);
    assert_eq!(broker.subscription_releases(), 1);
}

/// 두 그룹이 같은 토픽의 모든 레코드를 각각 받는다
#[tokio::test]
async fn independent_groups_each_see_every_record() {
    let broker = MemoryBroker::new();
    let publisher = broker.connect_producer().await.unwrap();
    for payload in ["a", "b", "c"] {
        publisher
            .publish("t", Some("key"), Bytes::from_static(payload.as_bytes()))
            .await
            .unwrap();
    }

    for group in ["g1", "g2"] {
        let mut sub = broker.connect_consumer("t", group).await.unwrap();
        let mut seen = Vec::new();
        for _ in 0..3 {
            let record = sub.next_record().await.unwrap().unwrap();
            assert_eq!(record.key, Some(Bytes::from_static(b"key")));
            seen.push(record.value);
        }
        assert_eq!(
            seen,
            vec![
                Bytes::from_static(b"a"),
                Bytes::from_static(b"b"),
                Bytes::from_static(b"c"),
            ]
        );
    }
}
