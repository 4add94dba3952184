//! 브로커 에러 타입
//!
//! [`BrokerError`]는 브로커 연결, 토픽 관리, 발행/수신에서 발생하는 모든 에러를 표현합니다.
//! `From<BrokerError> for StreamwatchError` 변환이 구현되어 있어
//! 상위 레이어에서 `?` 연산자로 자연스럽게 전파할 수 있습니다.

use streamwatch_core::error::{StreamwatchError, TransportError};

/// 브로커 도메인 에러
#[derive(Debug, Clone, thiserror::Error)]
pub enum BrokerError {
    /// 브로커에 도달할 수 없음 (메타데이터 조회 실패, 타임아웃)
    #[error("broker unreachable at '{servers}': {reason}")]
    Unreachable {
        /// 부트스트랩 서버 주소
        servers: String,
        /// 실패 사유
        reason: String,
    },

    /// 토픽 확인/생성 실패
    #[error("topic '{topic}' could not be verified or created: {reason}")]
    TopicSetup {
        /// 토픽명
        topic: String,
        /// 실패 사유
        reason: String,
    },

    /// 프로듀서 생성 실패
    #[error("failed to create producer: {0}")]
    ProducerConnect(String),

    /// 컨슈머 생성 또는 구독 실패
    #[error("failed to subscribe to '{topic}' as group '{group_id}': {reason}")]
    ConsumerConnect {
        /// 토픽명
        topic: String,
        /// 컨슈머 그룹 ID
        group_id: String,
        /// 실패 사유
        reason: String,
    },

    /// 발행 실패
    #[error("publish to '{topic}' failed: {reason}")]
    Publish {
        /// 토픽명
        topic: String,
        /// 실패 사유
        reason: String,
    },

    /// 수신 실패 (일시적일 수 있음)
    #[error("receive failed: {0}")]
    Receive(String),

    /// 이미 닫힌 발행자/구독
    #[error("{0} is closed")]
    Closed(&'static str),

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },
}

impl From<BrokerError> for StreamwatchError {
    fn from(err: BrokerError) -> Self {
        match &err {
            BrokerError::Unreachable { .. } => {
                StreamwatchError::Transport(TransportError::Unreachable(err.to_string()))
            }
            BrokerError::TopicSetup { topic, reason } => {
                StreamwatchError::Transport(TransportError::TopicSetup {
                    topic: topic.clone(),
                    reason: reason.clone(),
                })
            }
            BrokerError::ProducerConnect(reason) => {
                StreamwatchError::Transport(TransportError::Connect {
                    role: "producer".to_owned(),
                    reason: reason.clone(),
                })
            }
            BrokerError::ConsumerConnect { reason, .. } => {
                StreamwatchError::Transport(TransportError::Connect {
                    role: "consumer".to_owned(),
                    reason: reason.clone(),
                })
            }
            BrokerError::Publish { .. } | BrokerError::Receive(_) | BrokerError::Closed(_) => {
                StreamwatchError::Transport(TransportError::Delivery(err.to_string()))
            }
            BrokerError::Config { field, reason } => {
                StreamwatchError::Config(streamwatch_core::error::ConfigError::InvalidValue {
                    field: field.clone(),
                    reason: reason.clone(),
                })
            }
        }
    }
}
