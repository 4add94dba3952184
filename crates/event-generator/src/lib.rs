//! # streamwatch-generator
//!
//! 상태 이벤트를 생성하여 토픽에 주기적으로 발행하는 프로듀서 측 크레이트입니다.
//!
//! - [`generator`]: 무한 이벤트 [`Iterator`] ([`EventGenerator`])
//! - [`producer`]: `tokio::time::interval` 기반 발행 루프 ([`EventProducer`])
//! - [`config`]: 생성기 설정 (core 설정에서 파생)
//! - [`error`]: 도메인 에러

pub mod config;
pub mod error;
pub mod generator;
pub mod producer;

pub use config::GeneratorConfig;
pub use error::GeneratorError;
pub use generator::EventGenerator;
pub use producer::{EventProducer, ProducerStats};
