//! 인메모리 브로커
//!
//! 토픽마다 추가 전용 로그를 두고, 컨슈머 그룹별로 커밋된 오프셋을 추적합니다.
//! 단일 파티션(0)만 존재하며, 모든 그룹은 모든 레코드를 봅니다.
//!
//! 테스트와 `demo` 명령에서 사용합니다. [`FaultPlan`]으로 시작 단계의
//! 실패(도달 불가, 토픽 생성 실패, 연결 실패)를 재현할 수 있습니다.
//!
//! 브로커를 [`close`](MemoryBroker::close)하면 대기 중인 모든 구독이 스트림 종료(`None`)를 받습니다.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::SystemTime;

use bytes::Bytes;
use tokio::sync::{Mutex, Notify};

use crate::client::{Broker, OffsetReset, Publisher, Subscription};
use crate::error::BrokerError;
use crate::record::{Delivery, Record};

const MEMORY_SERVERS: &str = "memory://local";

/// 시작 단계 실패 주입 설정
#[derive(Debug, Clone, Copy, Default)]
pub struct FaultPlan {
    /// `verify_reachable`이 실패
    pub unreachable: bool,
    /// `ensure_topic`이 실패
    pub reject_topics: bool,
    /// `connect_producer`가 실패
    pub reject_producers: bool,
    /// `connect_consumer`가 실패
    pub reject_consumers: bool,
}

#[derive(Debug, Clone)]
struct StoredRecord {
    key: Option<Bytes>,
    value: Bytes,
}

#[derive(Debug, Default)]
struct TopicLog {
    records: Vec<StoredRecord>,
    committed: HashMap<String, usize>,
}

#[derive(Debug, Default)]
struct Shared {
    topics: Mutex<HashMap<String, TopicLog>>,
    notify: Notify,
    closed: AtomicBool,
    active_subscriptions: AtomicUsize,
    subscription_releases: AtomicUsize,
    faults: FaultPlan,
    offset_reset: OffsetReset,
}

/// 프로세스 내 메시지 브로커
///
/// `Clone`은 같은 브로커를 가리키는 핸들을 복제합니다.
#[derive(Debug, Clone, Default)]
pub struct MemoryBroker {
    shared: Arc<Shared>,
}

impl MemoryBroker {
    /// 빈 브로커를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 실패 주입 설정과 함께 생성합니다.
    pub fn with_faults(faults: FaultPlan) -> Self {
        Self::build(faults, OffsetReset::default())
    }

    /// 커밋된 오프셋이 없는 그룹의 시작 위치를 지정하여 생성합니다.
    pub fn with_offset_reset(offset_reset: OffsetReset) -> Self {
        Self::build(FaultPlan::default(), offset_reset)
    }

    fn build(faults: FaultPlan, offset_reset: OffsetReset) -> Self {
        Self {
            shared: Arc::new(Shared {
                faults,
                offset_reset,
                ..Shared::default()
            }),
        }
    }

    /// 브로커를 닫습니다. 모든 구독의 스트림이 종료됩니다.
    pub fn close(&self) {
        self.shared.closed.store(true, Ordering::SeqCst);
        self.shared.notify.notify_waiters();
        tracing::debug!("memory broker closed");
    }

    /// 브로커가 닫혔는지 여부
    pub fn is_closed(&self) -> bool {
        self.shared.closed.load(Ordering::SeqCst)
    }

    /// 토픽 존재 여부
    pub async fn topic_exists(&self, topic: &str) -> bool {
        self.shared.topics.lock().await.contains_key(topic)
    }

    /// 토픽에 기록된 페이로드 목록 (오프셋 순)
    pub async fn records(&self, topic: &str) -> Vec<Bytes> {
        self.shared
            .topics
            .lock()
            .await
            .get(topic)
            .map(|log| log.records.iter().map(|r| r.value.clone()).collect())
            .unwrap_or_default()
    }

    /// 그룹이 커밋한 다음 읽을 오프셋
    pub async fn committed_offset(&self, topic: &str, group_id: &str) -> Option<usize> {
        self.shared
            .topics
            .lock()
            .await
            .get(topic)
            .and_then(|log| log.committed.get(group_id).copied())
    }

    /// 현재 열려 있는 구독 수
    pub fn active_subscriptions(&self) -> usize {
        self.shared.active_subscriptions.load(Ordering::SeqCst)
    }

    /// 지금까지 해제된 구독 수
    pub fn subscription_releases(&self) -> usize {
        self.shared.subscription_releases.load(Ordering::SeqCst)
    }

    fn ensure_open(&self) -> Result<(), BrokerError> {
        if self.is_closed() {
            return Err(BrokerError::Unreachable {
                servers: MEMORY_SERVERS.to_owned(),
                reason: "broker is closed".to_owned(),
            });
        }
        Ok(())
    }
}

impl Broker for MemoryBroker {
    type Publisher = MemoryPublisher;
    type Subscription = MemorySubscription;

    async fn verify_reachable(&self) -> Result<(), BrokerError> {
        if self.shared.faults.unreachable {
            return Err(BrokerError::Unreachable {
                servers: MEMORY_SERVERS.to_owned(),
                reason: "simulated outage".to_owned(),
            });
        }
        self.ensure_open()
    }

    async fn ensure_topic(&self, topic: &str) -> Result<(), BrokerError> {
        if self.shared.faults.reject_topics {
            return Err(BrokerError::TopicSetup {
                topic: topic.to_owned(),
                reason: "topic creation rejected".to_owned(),
            });
        }
        if topic.is_empty() {
            return Err(BrokerError::TopicSetup {
                topic: String::new(),
                reason: "topic name must not be empty".to_owned(),
            });
        }
        self.ensure_open()?;

        let mut topics = self.shared.topics.lock().await;
        if topics.contains_key(topic) {
            tracing::debug!(topic, "topic already exists");
        } else {
            topics.insert(topic.to_owned(), TopicLog::default());
            tracing::info!(topic, "topic created");
        }
        Ok(())
    }

    async fn connect_producer(&self) -> Result<MemoryPublisher, BrokerError> {
        if self.shared.faults.reject_producers {
            return Err(BrokerError::ProducerConnect(
                "producer creation rejected".to_owned(),
            ));
        }
        self.ensure_open()
            .map_err(|e| BrokerError::ProducerConnect(e.to_string()))?;

        Ok(MemoryPublisher {
            shared: Arc::clone(&self.shared),
            closed: false,
        })
    }

    async fn connect_consumer(
        &self,
        topic: &str,
        group_id: &str,
    ) -> Result<MemorySubscription, BrokerError> {
        let reject = |reason: String| BrokerError::ConsumerConnect {
            topic: topic.to_owned(),
            group_id: group_id.to_owned(),
            reason,
        };

        if self.shared.faults.reject_consumers {
            return Err(reject("subscription rejected".to_owned()));
        }
        if topic.is_empty() || group_id.is_empty() {
            return Err(reject("topic and group id must not be empty".to_owned()));
        }
        self.ensure_open().map_err(|e| reject(e.to_string()))?;

        let position = {
            let mut topics = self.shared.topics.lock().await;
            let log = topics.entry(topic.to_owned()).or_default();
            match log.committed.get(group_id) {
                Some(&committed) => committed,
                None => match self.shared.offset_reset {
                    OffsetReset::Earliest => 0,
                    OffsetReset::Latest => log.records.len(),
                },
            }
        };

        self.shared.active_subscriptions.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(topic, group_id, position, "memory subscription opened");

        Ok(MemorySubscription {
            shared: Arc::clone(&self.shared),
            topic: topic.to_owned(),
            group_id: group_id.to_owned(),
            position,
            closed: false,
        })
    }
}

/// 인메모리 발행자
#[derive(Debug)]
pub struct MemoryPublisher {
    shared: Arc<Shared>,
    closed: bool,
}

impl Publisher for MemoryPublisher {
    async fn publish(
        &self,
        topic: &str,
        key: Option<&str>,
        payload: Bytes,
    ) -> Result<Delivery, BrokerError> {
        if self.closed {
            return Err(BrokerError::Closed("publisher"));
        }
        if self.shared.closed.load(Ordering::SeqCst) {
            return Err(BrokerError::Publish {
                topic: topic.to_owned(),
                reason: "broker is closed".to_owned(),
            });
        }

        let offset = {
            let mut topics = self.shared.topics.lock().await;
            let log = topics.entry(topic.to_owned()).or_default();
            log.records.push(StoredRecord {
                key: key.map(|k| Bytes::copy_from_slice(k.as_bytes())),
                value: payload,
            });
            log.records.len() - 1
        };
        self.shared.notify.notify_waiters();

        Ok(Delivery {
            partition: 0,
            offset: i64::try_from(offset).unwrap_or(i64::MAX),
        })
    }

    async fn flush(&self) -> Result<(), BrokerError> {
        // 발행은 동기적으로 로그에 기록됨
        Ok(())
    }

    async fn close(&mut self) -> Result<(), BrokerError> {
        self.flush().await?;
        self.closed = true;
        Ok(())
    }
}

/// 인메모리 구독
///
/// 레코드를 반환할 때마다 해당 그룹의 오프셋을 커밋합니다.
#[derive(Debug)]
pub struct MemorySubscription {
    shared: Arc<Shared>,
    topic: String,
    group_id: String,
    position: usize,
    closed: bool,
}

impl MemorySubscription {
    /// 다음에 읽을 오프셋
    pub fn position(&self) -> usize {
        self.position
    }
}

impl Subscription for MemorySubscription {
    async fn next_record(&mut self) -> Option<Result<Record, BrokerError>> {
        loop {
            let notified = self.shared.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.closed || self.shared.closed.load(Ordering::SeqCst) {
                return None;
            }

            {
                let mut topics = self.shared.topics.lock().await;
                let log = topics.entry(self.topic.clone()).or_default();
                if let Some(stored) = log.records.get(self.position).cloned() {
                    let offset = self.position;
                    self.position += 1;
                    log.committed.insert(self.group_id.clone(), self.position);

                    return Some(Ok(Record {
                        topic: self.topic.clone(),
                        partition: 0,
                        offset: i64::try_from(offset).unwrap_or(i64::MAX),
                        key: stored.key,
                        value: stored.value,
                        received_at: SystemTime::now(),
                    }));
                }
            }

            notified.await;
        }
    }

    fn close(&mut self) -> Result<(), BrokerError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.shared.active_subscriptions.fetch_sub(1, Ordering::SeqCst);
        self.shared
            .subscription_releases
            .fetch_add(1, Ordering::SeqCst);
        tracing::debug!(
            topic = %self.topic,
            group_id = %self.group_id,
            "memory subscription released"
        );
        Ok(())
    }
}

impl Drop for MemorySubscription {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
