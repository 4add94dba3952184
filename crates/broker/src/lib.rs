//! # streamwatch-broker
//!
//! 메시지 브로커 연결 관리 -- 프로듀서와 스트림 프로세서의 유일한 통합 지점입니다.
//!
//! # 구성
//!
//! - [`Broker`]: 도달성 확인, 토픽 보장, 발행자/구독 생성
//! - [`Publisher`] / [`Subscription`]: 발행 및 수신 핸들
//! - [`SubscriptionGuard`]: 구독을 정확히 한 번 해제하는 스코프 가드
//! - [`MemoryBroker`]: 프로세스 내 구현 (테스트, `demo`)
//! - `KafkaBroker`: librdkafka 구현 (`kafka` feature)

pub mod client;
pub mod error;
pub mod guard;
#[cfg(feature = "kafka")]
pub mod kafka;
pub mod memory;
pub mod record;

pub use client::{Broker, OffsetReset, Publisher, Subscription};
pub use error::BrokerError;
pub use guard::SubscriptionGuard;
#[cfg(feature = "kafka")]
pub use kafka::{KafkaBroker, KafkaPublisher, KafkaSubscription};
pub use memory::{FaultPlan, MemoryBroker, MemoryPublisher, MemorySubscription};
pub use record::{Delivery, Record};
