//! 에러 타입 -- 도메인별 에러 정의

/// Streamwatch 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum StreamwatchError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 페이로드 디코딩 에러
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// 필수 필드 검증 에러
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// 브로커 통신 에러
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// 파이프라인 수명주기 에러
    #[error("pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// TOML 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 페이로드 디코딩 에러 (레코드 단위, 복구 가능)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// UTF-8이 아닌 바이트
    #[error("payload is not valid UTF-8 (valid up to byte {valid_up_to})")]
    Encoding { valid_up_to: usize },

    /// JSON 파싱 실패
    #[error("malformed JSON at line {line}, column {column}: {reason}")]
    Malformed {
        line: usize,
        column: usize,
        reason: String,
    },

    /// 최상위 값이 객체가 아님
    #[error("expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}

/// 필수 필드 검증 에러 (레코드 단위, 복구 가능)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// 필드가 없거나, 비었거나, 문자열이 아님
    #[error("missing or empty required field '{field}'")]
    MissingField { field: &'static str },
}

/// 브로커 통신 에러
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// 브로커에 도달할 수 없음
    #[error("broker unreachable: {0}")]
    Unreachable(String),

    /// 토픽 확인/생성 실패
    #[error("topic '{topic}' setup failed: {reason}")]
    TopicSetup { topic: String, reason: String },

    /// 프로듀서/컨슈머 생성 실패
    #[error("{role} connection failed: {reason}")]
    Connect { role: String, reason: String },

    /// 발행 실패
    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// 파이프라인 수명주기 에러
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// 이미 실행되었거나 실행 중
    #[error("already running")]
    AlreadyRunning,
}
