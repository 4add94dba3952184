//! Kafka backend built on librdkafka.
//!
//! - `verify_reachable`: metadata request through a short-lived `BaseConsumer`
//! - `ensure_topic`: `AdminClient::create_topics`, treating "already exists" as success
//! - `connect_producer`: `FutureProducer`
//! - `connect_consumer`: `StreamConsumer` subscribed to a single topic
//!
//! librdkafka calls that block (metadata, flush) run on the blocking pool.

use std::time::{Duration, SystemTime};

use bytes::Bytes;
use rdkafka::admin::{AdminClient, AdminOptions, NewTopic, TopicReplication};
use rdkafka::client::DefaultClientContext;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{BaseConsumer, Consumer, StreamConsumer};
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::types::RDKafkaErrorCode;
use rdkafka::util::Timeout;
use rdkafka::Message;
use streamwatch_core::config::{BrokerConfig, ConsumerConfig};

use crate::client::{Broker, OffsetReset, Publisher, Subscription};
use crate::error::BrokerError;
use crate::record::{Delivery, Record};

/// Kafka broker connection settings.
#[derive(Debug, Clone)]
pub struct KafkaBroker {
    servers: String,
    timeout: Duration,
    partitions: i32,
    replication_factor: i32,
    offset_reset: OffsetReset,
}

impl KafkaBroker {
    /// Builds the broker from the `[broker]` and `[consumer]` sections.
    pub fn from_config(
        broker: &BrokerConfig,
        consumer: &ConsumerConfig,
    ) -> Result<Self, BrokerError> {
        if broker.bootstrap_servers.trim().is_empty() {
            return Err(BrokerError::Config {
                field: "broker.bootstrap_servers".to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }
        Ok(Self {
            servers: broker.bootstrap_servers.clone(),
            timeout: Duration::from_secs(broker.connect_timeout_secs.max(1)),
            partitions: broker.partitions,
            replication_factor: broker.replication_factor,
            offset_reset: OffsetReset::parse(&consumer.auto_offset_reset)?,
        })
    }

    /// Bootstrap server list.
    pub fn servers(&self) -> &str {
        &self.servers
    }

    fn base_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new();
        config
            .set("bootstrap.servers", &self.servers)
            .set("socket.timeout.ms", self.timeout.as_millis().to_string());
        config
    }

    fn unreachable(&self, reason: impl ToString) -> BrokerError {
        BrokerError::Unreachable {
            servers: self.servers.clone(),
            reason: reason.to_string(),
        }
    }
}

impl Broker for KafkaBroker {
    type Publisher = KafkaPublisher;
    type Subscription = KafkaSubscription;

    async fn verify_reachable(&self) -> Result<(), BrokerError> {
        let config = self.base_config();
        let timeout = self.timeout;

        let metadata = tokio::task::spawn_blocking(move || {
            let consumer: BaseConsumer = config.create()?;
            consumer.fetch_metadata(None, timeout)
        })
        .await
        .map_err(|e| self.unreachable(e))?
        .map_err(|e| self.unreachable(e))?;

        if metadata.brokers().is_empty() {
            return Err(self.unreachable("metadata lists no brokers"));
        }

        tracing::info!(
            servers = %self.servers,
            brokers = metadata.brokers().len(),
            topics = metadata.topics().len(),
            "kafka broker reachable"
        );
        Ok(())
    }

    async fn ensure_topic(&self, topic: &str) -> Result<(), BrokerError> {
        let setup_failed = |reason: String| BrokerError::TopicSetup {
            topic: topic.to_owned(),
            reason,
        };

        let admin: AdminClient<DefaultClientContext> = self
            .base_config()
            .create()
            .map_err(|e| setup_failed(format!("admin client: {e}")))?;

        let new_topic = NewTopic::new(
            topic,
            self.partitions,
            TopicReplication::Fixed(self.replication_factor),
        );
        let options = AdminOptions::new().operation_timeout(Some(Timeout::After(self.timeout)));

        let results = admin
            .create_topics(&[new_topic], &options)
            .await
            .map_err(|e| setup_failed(e.to_string()))?;

        for result in results {
            match result {
                Ok(name) => tracing::info!(topic = %name, "topic created"),
                Err((name, RDKafkaErrorCode::TopicAlreadyExists)) => {
                    tracing::debug!(topic = %name, "topic already exists");
                }
                Err((_, code)) => return Err(setup_failed(code.to_string())),
            }
        }
        Ok(())
    }

    async fn connect_producer(&self) -> Result<KafkaPublisher, BrokerError> {
        let producer: FutureProducer = self
            .base_config()
            .set("message.timeout.ms", self.timeout.as_millis().to_string())
            .create()
            .map_err(|e| BrokerError::ProducerConnect(e.to_string()))?;

        tracing::debug!(servers = %self.servers, "kafka producer created");
        Ok(KafkaPublisher {
            producer,
            timeout: self.timeout,
            closed: false,
        })
    }

    async fn connect_consumer(
        &self,
        topic: &str,
        group_id: &str,
    ) -> Result<KafkaSubscription, BrokerError> {
        let reject = |reason: String| BrokerError::ConsumerConnect {
            topic: topic.to_owned(),
            group_id: group_id.to_owned(),
            reason,
        };

        let consumer: StreamConsumer = self
            .base_config()
            .set("group.id", group_id)
            .set("enable.auto.commit", "true")
            .set("auto.offset.reset", self.offset_reset.as_str())
            .create()
            .map_err(|e| reject(e.to_string()))?;

        consumer.subscribe(&[topic]).map_err(|e| reject(e.to_string()))?;

        tracing::debug!(topic, group_id, "kafka consumer subscribed");
        Ok(KafkaSubscription {
            consumer,
            closed: false,
        })
    }
}

/// `FutureProducer`-backed publisher.
pub struct KafkaPublisher {
    producer: FutureProducer,
    timeout: Duration,
    closed: bool,
}

impl Publisher for KafkaPublisher {
    async fn publish(
        &self,
        topic: &str,
        key: Option<&str>,
        payload: Bytes,
    ) -> Result<Delivery, BrokerError> {
        if self.closed {
            return Err(BrokerError::Closed("publisher"));
        }

        let mut record = FutureRecord::<str, [u8]>::to(topic).payload(payload.as_ref());
        if let Some(key) = key {
            record = record.key(key);
        }

        let (partition, offset) = self
            .producer
            .send(record, Timeout::After(self.timeout))
            .await
            .map_err(|(e, _)| BrokerError::Publish {
                topic: topic.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Delivery { partition, offset })
    }

    async fn flush(&self) -> Result<(), BrokerError> {
        let producer = self.producer.clone();
        let timeout = self.timeout;
        tokio::task::spawn_blocking(move || producer.flush(Timeout::After(timeout)))
            .await
            .map_err(|e| BrokerError::Publish {
                topic: String::new(),
                reason: format!("flush task failed: {e}"),
            })?
            .map_err(|e| BrokerError::Publish {
                topic: String::new(),
                reason: format!("flush failed: {e}"),
            })
    }

    async fn close(&mut self) -> Result<(), BrokerError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.flush().await
    }
}

/// `StreamConsumer`-backed subscription.
pub struct KafkaSubscription {
    consumer: StreamConsumer,
    closed: bool,
}

impl Subscription for KafkaSubscription {
    async fn next_record(&mut self) -> Option<Result<Record, BrokerError>> {
        if self.closed {
            return None;
        }

        let result = match self.consumer.recv().await {
            Ok(message) => Ok(Record {
                topic: message.topic().to_owned(),
                partition: message.partition(),
                offset: message.offset(),
                key: message.key().map(Bytes::copy_from_slice),
                // 빈 페이로드(tombstone)는 빈 바이트열로 전달
                value: message
                    .payload()
                    .map(Bytes::copy_from_slice)
                    .unwrap_or_default(),
                received_at: SystemTime::now(),
            }),
            Err(e) => Err(BrokerError::Receive(e.to_string())),
        };
        Some(result)
    }

    fn close(&mut self) -> Result<(), BrokerError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.consumer.unsubscribe();
        tracing::debug!("kafka consumer unsubscribed");
        Ok(())
    }
}
