//! Broker backend selection.
//!
//! [`AnyBroker`] wraps the backend named by `[broker] backend` so command
//! handlers stay generic over [`Broker`] while `main` picks the concrete type
//! at runtime.

use bytes::Bytes;
use streamwatch_broker::{
    Broker, BrokerError, Delivery, MemoryBroker, MemoryPublisher, MemorySubscription,
    OffsetReset, Publisher, Record, Subscription,
};
#[cfg(feature = "kafka")]
use streamwatch_broker::{KafkaBroker, KafkaPublisher, KafkaSubscription};
use streamwatch_core::StreamwatchConfig;

use crate::error::CliError;

/// Runtime-selected broker backend.
pub enum AnyBroker {
    /// In-process broker. Records are not shared across processes.
    Memory(MemoryBroker),
    /// Kafka via librdkafka.
    #[cfg(feature = "kafka")]
    Kafka(KafkaBroker),
}

impl AnyBroker {
    /// Builds the backend named in `config.broker.backend`.
    ///
    /// # Errors
    ///
    /// `CliError::Config` for an unknown backend, or for `kafka` when the
    /// binary was built without the `kafka` feature.
    pub fn from_config(config: &StreamwatchConfig) -> Result<Self, CliError> {
        match config.broker.backend.as_str() {
            "memory" => {
                let offset_reset = OffsetReset::parse(&config.consumer.auto_offset_reset)?;
                Ok(Self::Memory(MemoryBroker::with_offset_reset(offset_reset)))
            }
            "kafka" => kafka_backend(config),
            other => Err(CliError::Config(format!(
                "unknown broker backend '{other}', expected kafka or memory"
            ))),
        }
    }

    /// Backend name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            #[cfg(feature = "kafka")]
            Self::Kafka(_) => "kafka",
        }
    }
}

#[cfg(feature = "kafka")]
fn kafka_backend(config: &StreamwatchConfig) -> Result<AnyBroker, CliError> {
    Ok(AnyBroker::Kafka(KafkaBroker::from_config(
        &config.broker,
        &config.consumer,
    )?))
}

#[cfg(not(feature = "kafka"))]
fn kafka_backend(_config: &StreamwatchConfig) -> Result<AnyBroker, CliError> {
    Err(CliError::Config(
        "the kafka backend requires building with `--features kafka`".to_owned(),
    ))
}

impl Broker for AnyBroker {
    type Publisher = AnyPublisher;
    type Subscription = AnySubscription;

    async fn verify_reachable(&self) -> Result<(), BrokerError> {
        match self {
            Self::Memory(b) => b.verify_reachable().await,
            #[cfg(feature = "kafka")]
            Self::Kafka(b) => b.verify_reachable().await,
        }
    }

    async fn ensure_topic(&self, topic: &str) -> Result<(), BrokerError> {
        match self {
            Self::Memory(b) => b.ensure_topic(topic).await,
            #[cfg(feature = "kafka")]
            Self::Kafka(b) => b.ensure_topic(topic).await,
        }
    }

    async fn connect_producer(&self) -> Result<AnyPublisher, BrokerError> {
        match self {
            Self::Memory(b) => b.connect_producer().await.map(AnyPublisher::Memory),
            #[cfg(feature = "kafka")]
            Self::Kafka(b) => b.connect_producer().await.map(AnyPublisher::Kafka),
        }
    }

    async fn connect_consumer(
        &self,
        topic: &str,
        group_id: &str,
    ) -> Result<AnySubscription, BrokerError> {
        match self {
            Self::Memory(b) => b
                .connect_consumer(topic, group_id)
                .await
                .map(AnySubscription::Memory),
            #[cfg(feature = "kafka")]
            Self::Kafka(b) => b
                .connect_consumer(topic, group_id)
                .await
                .map(AnySubscription::Kafka),
        }
    }
}

/// Publisher of the selected backend.
pub enum AnyPublisher {
    Memory(MemoryPublisher),
    #[cfg(feature = "kafka")]
    Kafka(KafkaPublisher),
}

impl Publisher for AnyPublisher {
    async fn publish(
        &self,
        topic: &str,
        key: Option<&str>,
        payload: Bytes,
    ) -> Result<Delivery, BrokerError> {
        match self {
            Self::Memory(p) => p.publish(topic, key, payload).await,
            #[cfg(feature = "kafka")]
            Self::Kafka(p) => p.publish(topic, key, payload).await,
        }
    }

    async fn flush(&self) -> Result<(), BrokerError> {
        match self {
            Self::Memory(p) => p.flush().await,
            #[cfg(feature = "kafka")]
            Self::Kafka(p) => p.flush().await,
        }
    }

    async fn close(&mut self) -> Result<(), BrokerError> {
        match self {
            Self::Memory(p) => p.close().await,
            #[cfg(feature = "kafka")]
            Self::Kafka(p) => p.close().await,
        }
    }
}

/// Subscription of the selected backend.
pub enum AnySubscription {
    Memory(MemorySubscription),
    #[cfg(feature = "kafka")]
    Kafka(KafkaSubscription),
}

impl Subscription for AnySubscription {
    async fn next_record(&mut self) -> Option<Result<Record, BrokerError>> {
        match self {
            Self::Memory(s) => s.next_record().await,
            #[cfg(feature = "kafka")]
            Self::Kafka(s) => s.next_record().await,
        }
    }

    fn close(&mut self) -> Result<(), BrokerError> {
        match self {
            Self::Memory(s) => s.close(),
            #[cfg(feature = "kafka")]
            Self::Kafka(s) => s.close(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_backend_selected() {
        let mut config = StreamwatchConfig::default();
        config.broker.backend = "memory".to_owned();
        let broker = AnyBroker::from_config(&config).unwrap();
        assert_eq!(broker.name(), "memory");
    }

    #[test]
    fn unknown_backend_rejected() {
        let mut config = StreamwatchConfig::default();
        config.broker.backend = "rabbitmq".to_owned();
        let err = AnyBroker::from_config(&config).err().unwrap();
        assert_eq!(err.exit_code(), 2);
    }

    #[cfg(not(feature = "kafka"))]
    #[test]
    fn kafka_requires_feature() {
        let config = StreamwatchConfig::default();
        let err = AnyBroker::from_config(&config).err().unwrap();
        assert!(err.to_string().contains("--features kafka"));
    }

    #[tokio::test]
    async fn memory_round_trip_through_wrappers() {
        let mut config = StreamwatchConfig::default();
        config.broker.backend = "memory".to_owned();
        let broker = AnyBroker::from_config(&config).unwrap();

        broker.verify_reachable().await.unwrap();
        broker.ensure_topic("t").await.unwrap();
        let mut publisher = broker.connect_producer().await.unwrap();
        publisher
            .publish("t", None, Bytes::from_static(b"hello"))
            .await
            .unwrap();
        publisher.close().await.unwrap();

        let mut subscription = broker.connect_consumer("t", "g").await.unwrap();
        let record = subscription.next_record().await.unwrap().unwrap();
        assert_eq!(record.value, Bytes::from_static(b"hello"));
        subscription.close().unwrap();
    }
}
