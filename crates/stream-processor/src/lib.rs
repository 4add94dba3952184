#![doc = include_str!("../README.md")]
//!
//! # 모듈 구성
//!
//! - [`processor`]: 구독 루프와 레코드별 처리 (상태 전이 포함)
//! - [`window`]: 고정 크기 FIFO 롤링 윈도우
//! - [`rule`]: 완료/실패/긴급 알림 규칙과 규칙 엔진
//! - [`alert`]: 알림 로그, 메트릭, 하류 채널 방출
//! - [`config`]: 프로세서 설정 (core 설정에서 파생)
//! - [`error`]: 레코드 단위 에러와 프로세서 에러
//!
//! # 아키텍처
//!
//! ```text
//! Subscription -> decode -> validate -> RollingWindow -> RuleEngine -> AlertEmitter
//!      |            |          |                            |              |
//!   Broker      UTF-8/JSON  4 fields                 fixed order      log + channel
//! ```

pub mod alert;
pub mod config;
pub mod error;
pub mod processor;
pub mod rule;
pub mod window;

// --- 주요 타입 re-export ---

pub use alert::AlertEmitter;
pub use config::{ProcessorConfig, ProcessorConfigBuilder};
pub use error::{ProcessorError, RecordError};
pub use processor::{ProcessorState, ProcessorStats, StreamProcessor, StreamProcessorBuilder};
pub use rule::{ContainsRule, RuleEngine};
pub use window::RollingWindow;
