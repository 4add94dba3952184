//! 이벤트 생성기 에러 타입

use streamwatch_broker::BrokerError;
use streamwatch_core::error::{ConfigError, StreamwatchError};

/// 이벤트 생성기 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// 발행자 또는 토픽 획득 실패 (치명적)
    #[error("failed to acquire {resource}: {source}")]
    ResourceAcquisition {
        /// 획득하려던 자원
        resource: &'static str,
        /// 브로커 에러
        #[source]
        source: BrokerError,
    },
}

impl From<GeneratorError> for StreamwatchError {
    fn from(err: GeneratorError) -> Self {
        match err {
            GeneratorError::Config { field, reason } => {
                StreamwatchError::Config(ConfigError::InvalidValue { field, reason })
            }
            GeneratorError::ResourceAcquisition { source, .. } => StreamwatchError::from(source),
        }
    }
}
