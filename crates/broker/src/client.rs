//! Broker abstraction for testability.
//!
//! The [`Broker`] trait covers the four collaborator operations the producer
//! and the stream processor need at startup. [`Publisher`] and
//! [`Subscription`] are the handles those operations return.
//!
//! # Architecture
//!
//! ```text
//!   ┌───────────┐        ┌─────────────────┐
//!   │ Producer  │        │ StreamProcessor │
//!   └─────┬─────┘        └────────┬────────┘
//!         │ Publisher             │ Subscription
//!         ▼                       ▼
//!        ┌───────────────────────────┐
//!        │       Broker (trait)      │
//!        └───────────────────────────┘
//!              │              │
//!              ▼              ▼
//!        ┌──────────┐   ┌────────────┐
//!        │  Memory  │   │   Kafka    │ (feature = "kafka")
//!        └──────────┘   └────────────┘
//! ```
//!
//! Every error returned from these operations at startup is fatal for the
//! calling process.

use std::future::Future;

use bytes::Bytes;

use crate::error::BrokerError;
use crate::record::{Delivery, Record};

/// Where a consumer group with no committed offset starts reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OffsetReset {
    /// From the beginning of the topic.
    #[default]
    Earliest,
    /// Only records published after subscribing.
    Latest,
}

impl OffsetReset {
    /// Parses the `consumer.auto_offset_reset` setting.
    pub fn parse(value: &str) -> Result<Self, BrokerError> {
        match value {
            "earliest" => Ok(Self::Earliest),
            "latest" => Ok(Self::Latest),
            other => Err(BrokerError::Config {
                field: "consumer.auto_offset_reset".to_owned(),
                reason: format!("unknown value '{other}', expected earliest or latest"),
            }),
        }
    }

    /// The value librdkafka expects for `auto.offset.reset`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Earliest => "earliest",
            Self::Latest => "latest",
        }
    }
}

/// Trait abstracting broker connection management.
///
/// # Implementations
///
/// - [`MemoryBroker`](crate::MemoryBroker): in-process topic logs, used by tests and `demo`
/// - `KafkaBroker`: librdkafka-backed implementation (requires the `kafka` feature)
pub trait Broker: Send + Sync + 'static {
    /// Publisher handle returned by [`connect_producer`](Self::connect_producer).
    type Publisher: Publisher;
    /// Subscription handle returned by [`connect_consumer`](Self::connect_consumer).
    type Subscription: Subscription;

    /// Checks that the broker answers a metadata request.
    ///
    /// # Errors
    ///
    /// Returns `BrokerError::Unreachable` when no broker answers in time.
    fn verify_reachable(&self) -> impl Future<Output = Result<(), BrokerError>> + Send;

    /// Ensures the topic exists, creating it if necessary.
    ///
    /// An already existing topic is not an error.
    ///
    /// # Errors
    ///
    /// Returns `BrokerError::TopicSetup` if the topic can be neither found nor created.
    fn ensure_topic(&self, topic: &str) -> impl Future<Output = Result<(), BrokerError>> + Send;

    /// Creates a publisher.
    ///
    /// # Errors
    ///
    /// Returns `BrokerError::ProducerConnect` if the producer cannot be created.
    fn connect_producer(
        &self,
    ) -> impl Future<Output = Result<Self::Publisher, BrokerError>> + Send;

    /// Subscribes to `topic` as a member of `group_id`.
    ///
    /// # Errors
    ///
    /// Returns `BrokerError::ConsumerConnect` if the consumer cannot be created or subscribed.
    fn connect_consumer(
        &self,
        topic: &str,
        group_id: &str,
    ) -> impl Future<Output = Result<Self::Subscription, BrokerError>> + Send;
}

/// Publishing side of a broker connection.
pub trait Publisher: Send + 'static {
    /// Publishes one payload to `topic`.
    fn publish(
        &self,
        topic: &str,
        key: Option<&str>,
        payload: Bytes,
    ) -> impl Future<Output = Result<Delivery, BrokerError>> + Send;

    /// Waits until every in-flight publish has been acknowledged.
    fn flush(&self) -> impl Future<Output = Result<(), BrokerError>> + Send;

    /// Flushes and releases the publisher. Further publishes fail with `BrokerError::Closed`.
    fn close(&mut self) -> impl Future<Output = Result<(), BrokerError>> + Send;
}

/// Consuming side of a broker connection.
///
/// Records are yielded in delivery order.
pub trait Subscription: Send + 'static {
    /// Waits for the next record.
    ///
    /// - `Some(Ok(record))`: a record was received
    /// - `Some(Err(e))`: a transient receive failure; the caller may keep polling
    /// - `None`: the stream has ended (subscription or broker closed)
    fn next_record(
        &mut self,
    ) -> impl Future<Output = Option<Result<Record, BrokerError>>> + Send;

    /// Releases the subscription.
    ///
    /// Synchronous so that it can run from `Drop`; see
    /// [`SubscriptionGuard`](crate::SubscriptionGuard).
    fn close(&mut self) -> Result<(), BrokerError>;
}
