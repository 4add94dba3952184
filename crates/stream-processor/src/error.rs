//! 스트림 프로세서 에러 타입
//!
//! 두 종류로 나뉩니다.
//! - [`RecordError`]: 레코드 하나에 국한된 복구 가능한 에러. 로그를 남기고 건너뜁니다.
//! - [`ProcessorError`]: 프로세서 수명에 영향을 주는 에러. 구독 획득 실패는 치명적입니다.
//!
//! `From<ProcessorError> for StreamwatchError` 변환으로 상위 레이어에서 `?`로 전파할 수 있습니다.

use streamwatch_broker::BrokerError;
use streamwatch_core::error::{
    ConfigError, DecodeError, PipelineError, StreamwatchError, ValidationError,
};

/// 레코드 단위 에러 (복구 가능)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// 페이로드가 UTF-8이 아니거나 JSON 객체가 아님
    #[error("skipping record at offset {offset}: {source}")]
    Decode {
        /// 브로커 오프셋
        offset: i64,
        /// 디코딩 실패 원인
        #[source]
        source: DecodeError,
    },

    /// 필수 필드 누락
    #[error("skipping record at offset {offset}: {source}")]
    Validation {
        /// 브로커 오프셋
        offset: i64,
        /// 누락된 필드
        #[source]
        source: ValidationError,
    },
}

impl RecordError {
    /// 메트릭 `reason` 레이블 값
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Decode {
                source: DecodeError::Encoding { .. },
                ..
            } => "encoding",
            Self::Decode { .. } => "malformed",
            Self::Validation { .. } => "validation",
        }
    }

    /// 레코드 오프셋
    pub fn offset(&self) -> i64 {
        match self {
            Self::Decode { offset, .. } | Self::Validation { offset, .. } => *offset,
        }
    }
}

/// 스트림 프로세서 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum ProcessorError {
    /// 구독 획득 실패 (치명적)
    #[error("failed to acquire {resource}: {source}")]
    ResourceAcquisition {
        /// 획득하려던 자원
        resource: &'static str,
        /// 브로커 에러
        #[source]
        source: BrokerError,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// 이미 실행 중
    #[error("processor is already running")]
    AlreadyRunning,
}

impl From<ProcessorError> for StreamwatchError {
    fn from(err: ProcessorError) -> Self {
        match err {
            ProcessorError::ResourceAcquisition { source, .. } => StreamwatchError::from(source),
            ProcessorError::Config { field, reason } => {
                StreamwatchError::Config(ConfigError::InvalidValue { field, reason })
            }
            ProcessorError::AlreadyRunning => {
                StreamwatchError::Pipeline(PipelineError::AlreadyRunning)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamwatch_core::error::TransportError;

    #[test]
    fn record_error_reasons() {
        let encoding = RecordError::Decode {
            offset: 3,
            source: DecodeError::Encoding { valid_up_to: 0 },
        };
        let malformed = RecordError::Decode {
            offset: 4,
            source: DecodeError::NotAnObject { found: "array" },
        };
        let missing = RecordError::Validation {
            offset: 5,
            source: ValidationError::MissingField { field: "author" },
        };
        assert_eq!(encoding.reason(), "encoding");
        assert_eq!(malformed.reason(), "malformed");
        assert_eq!(missing.reason(), "validation");
        assert_eq!(missing.offset(), 5);
    }

    #[test]
    fn record_error_display_names_offset() {
        let err = RecordError::Validation {
            offset: 42,
            source: ValidationError::MissingField { field: "timestamp" },
        };
        assert!(err.to_string().contains("offset 42"));
    }

    #[test]
    fn acquisition_error_converts_to_transport() {
        let err = ProcessorError::ResourceAcquisition {
            resource: "subscription",
            source: BrokerError::ConsumerConnect {
                topic: "unique_topic".to_owned(),
                group_id: "default_group".to_owned(),
                reason: "no brokers".to_owned(),
            },
        };
        assert!(err.to_string().contains("subscription"));
        let top: StreamwatchError = err.into();
        assert!(matches!(
            top,
            StreamwatchError::Transport(TransportError::Connect { .. })
        ));
    }

    #[test]
    fn config_error_converts() {
        let err = ProcessorError::Config {
            field: "window_size".to_owned(),
            reason: "must be at least 1".to_owned(),
        };
        let top: StreamwatchError = err.into();
        assert!(matches!(top, StreamwatchError::Config(_)));
    }
}
