//! 설정 관리 -- streamwatch.toml 파싱 및 런타임 설정
//!
//! [`StreamwatchConfig`]는 모든 구성 요소의 설정을 담는 최상위 구조체입니다.
//! 시작 시 한 번 생성된 뒤 불변으로 취급되며, 참조로 각 생성자에 전달됩니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`STREAMWATCH_CONSUMER_WINDOW_SIZE=10` 형식)
//! 3. 레거시 환경변수 (`MY_TOPIC`, `MY_ROLLING_WINDOW_SIZE` 등)
//! 4. 설정 파일 (`streamwatch.toml`)
//! 5. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), streamwatch_core::error::StreamwatchError> {
//! use streamwatch_core::config::StreamwatchConfig;
//!
//! // 파일에서 로드 (없으면 기본값) + 환경변수 오버라이드
//! let config = StreamwatchConfig::load_or_default("streamwatch.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = StreamwatchConfig::parse("[consumer]\nwindow_size = 10")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, StreamwatchError};

/// 기본 토픽명
pub const DEFAULT_TOPIC: &str = "unique_topic";
/// 기본 컨슈머 그룹 ID
pub const DEFAULT_GROUP_ID: &str = "default_group";
/// 기본 롤링 윈도우 크기
pub const DEFAULT_WINDOW_SIZE: usize = 5;
/// 기본 발행 간격 (초)
pub const DEFAULT_INTERVAL_SECS: u64 = 1;

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const VALID_LOG_FORMATS: [&str; 2] = ["json", "pretty"];
const VALID_BACKENDS: [&str; 2] = ["kafka", "memory"];
const VALID_OFFSET_RESETS: [&str; 2] = ["earliest", "latest"];

/// Streamwatch 통합 설정
///
/// `streamwatch.toml` 파일의 최상위 구조를 나타냅니다.
/// 각 구성 요소는 자기 섹션만 읽어 사용합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamwatchConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 브로커 연결 설정
    #[serde(default)]
    pub broker: BrokerConfig,
    /// 컨슈머(스트림 프로세서) 설정
    #[serde(default)]
    pub consumer: ConsumerConfig,
    /// 프로듀서(이벤트 생성기) 설정
    #[serde(default)]
    pub producer: ProducerConfig,
    /// 메트릭 익스포터 설정
    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl StreamwatchConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, StreamwatchError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// [`load`](Self::load)와 같지만, 파일이 없으면 기본값에서 시작합니다.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, StreamwatchError> {
        let path = path.as_ref();
        let mut config = match Self::from_file(path).await {
            Ok(config) => config,
            Err(StreamwatchError::Config(ConfigError::FileNotFound { .. })) => {
                tracing::debug!(path = %path.display(), "config file not found, using defaults");
                Self::default()
            }
            Err(e) => return Err(e),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, StreamwatchError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StreamwatchError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                StreamwatchError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, StreamwatchError> {
        toml::from_str(toml_str).map_err(|e| {
            StreamwatchError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 레거시 키를 먼저 적용한 뒤 `STREAMWATCH_{SECTION}_{FIELD}` 키를 적용하므로,
    /// 둘 다 설정되어 있으면 `STREAMWATCH_` 쪽이 우선합니다.
    pub fn apply_env_overrides(&mut self) {
        // 레거시 키
        override_string(&mut self.broker.topic, "MY_TOPIC");
        override_string(&mut self.consumer.group_id, "MY_CONSUMER_GROUP_ID");
        override_usize(&mut self.consumer.window_size, "MY_ROLLING_WINDOW_SIZE");
        override_u64(&mut self.producer.interval_secs, "MY_INTERVAL_SECONDS");
        override_string(&mut self.broker.bootstrap_servers, "KAFKA_BROKER_ADDRESS");

        // General
        override_string(&mut self.general.log_level, "STREAMWATCH_GENERAL_LOG_LEVEL");
        override_string(
            &mut self.general.log_format,
            "STREAMWATCH_GENERAL_LOG_FORMAT",
        );

        // Broker
        override_string(&mut self.broker.backend, "STREAMWATCH_BROKER_BACKEND");
        override_string(
            &mut self.broker.bootstrap_servers,
            "STREAMWATCH_BROKER_BOOTSTRAP_SERVERS",
        );
        override_string(&mut self.broker.topic, "STREAMWATCH_BROKER_TOPIC");
        override_u64(
            &mut self.broker.connect_timeout_secs,
            "STREAMWATCH_BROKER_CONNECT_TIMEOUT_SECS",
        );
        override_i32(&mut self.broker.partitions, "STREAMWATCH_BROKER_PARTITIONS");
        override_i32(
            &mut self.broker.replication_factor,
            "STREAMWATCH_BROKER_REPLICATION_FACTOR",
        );

        // Consumer
        override_string(&mut self.consumer.group_id, "STREAMWATCH_CONSUMER_GROUP_ID");
        override_usize(
            &mut self.consumer.window_size,
            "STREAMWATCH_CONSUMER_WINDOW_SIZE",
        );
        override_string(
            &mut self.consumer.auto_offset_reset,
            "STREAMWATCH_CONSUMER_AUTO_OFFSET_RESET",
        );
        override_usize(
            &mut self.consumer.alert_channel_capacity,
            "STREAMWATCH_CONSUMER_ALERT_CHANNEL_CAPACITY",
        );

        // Producer
        override_u64(
            &mut self.producer.interval_secs,
            "STREAMWATCH_PRODUCER_INTERVAL_SECS",
        );
        override_csv(&mut self.producer.authors, "STREAMWATCH_PRODUCER_AUTHORS");
        override_csv(&mut self.producer.statuses, "STREAMWATCH_PRODUCER_STATUSES");
        override_opt_u64(
            &mut self.producer.max_events,
            "STREAMWATCH_PRODUCER_MAX_EVENTS",
        );

        // Metrics
        override_bool(&mut self.metrics.enabled, "STREAMWATCH_METRICS_ENABLED");
        override_string(
            &mut self.metrics.listen_addr,
            "STREAMWATCH_METRICS_LISTEN_ADDR",
        );
        override_u16(&mut self.metrics.port, "STREAMWATCH_METRICS_PORT");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), StreamwatchError> {
        check_one_of("general.log_level", &self.general.log_level, &VALID_LOG_LEVELS)?;
        check_one_of(
            "general.log_format",
            &self.general.log_format,
            &VALID_LOG_FORMATS,
        )?;
        check_one_of("broker.backend", &self.broker.backend, &VALID_BACKENDS)?;

        if self.broker.backend == "kafka" && self.broker.bootstrap_servers.trim().is_empty() {
            return Err(invalid(
                "broker.bootstrap_servers",
                "must not be empty when backend is kafka",
            ));
        }

        if self.broker.topic.trim().is_empty() {
            return Err(invalid("broker.topic", "topic must not be empty"));
        }

        if self.broker.partitions < 1 {
            return Err(invalid("broker.partitions", "must be at least 1"));
        }

        if self.broker.replication_factor < 1 {
            return Err(invalid("broker.replication_factor", "must be at least 1"));
        }

        if self.consumer.group_id.trim().is_empty() {
            return Err(invalid("consumer.group_id", "group id must not be empty"));
        }

        if self.consumer.window_size == 0 {
            return Err(invalid("consumer.window_size", "must be at least 1"));
        }

        check_one_of(
            "consumer.auto_offset_reset",
            &self.consumer.auto_offset_reset,
            &VALID_OFFSET_RESETS,
        )?;

        if self.consumer.alert_channel_capacity == 0 {
            return Err(invalid(
                "consumer.alert_channel_capacity",
                "must be at least 1",
            ));
        }

        check_pool("producer.authors", &self.producer.authors)?;
        check_pool("producer.statuses", &self.producer.statuses)?;

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 브로커 연결 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    /// 백엔드 (kafka, memory)
    pub backend: String,
    /// 부트스트랩 서버 주소 (쉼표 구분)
    pub bootstrap_servers: String,
    /// 토픽명
    pub topic: String,
    /// 연결/메타데이터 조회 타임아웃 (초)
    pub connect_timeout_secs: u64,
    /// 토픽 생성 시 파티션 수
    pub partitions: i32,
    /// 토픽 생성 시 복제 계수
    pub replication_factor: i32,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            backend: "kafka".to_owned(),
            bootstrap_servers: "localhost:9092".to_owned(),
            topic: DEFAULT_TOPIC.to_owned(),
            connect_timeout_secs: 10,
            partitions: 1,
            replication_factor: 1,
        }
    }
}

/// 컨슈머 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsumerConfig {
    /// 컨슈머 그룹 ID
    pub group_id: String,
    /// 롤링 윈도우 크기 (1 이상)
    pub window_size: usize,
    /// 커밋된 오프셋이 없을 때 시작 위치 (earliest, latest)
    pub auto_offset_reset: String,
    /// 알림 채널 용량
    pub alert_channel_capacity: usize,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            group_id: DEFAULT_GROUP_ID.to_owned(),
            window_size: DEFAULT_WINDOW_SIZE,
            auto_offset_reset: "earliest".to_owned(),
            alert_channel_capacity: 256,
        }
    }
}

/// 프로듀서 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProducerConfig {
    /// 발행 간격 (초, 0이면 지연 없이 발행)
    pub interval_secs: u64,
    /// 작성자 후보
    pub authors: Vec<String>,
    /// 상태 후보
    pub statuses: Vec<String>,
    /// 최대 발행 수 (없으면 무제한)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_events: Option<u64>,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_INTERVAL_SECS,
            authors: ["Bri", "Ryan", "Kenny", "Kate"]
                .map(str::to_owned)
                .to_vec(),
            statuses: ["active", "inactive", "pending", "completed"]
                .map(str::to_owned)
                .to_vec(),
            max_events: None,
        }
    }
}

/// 메트릭 익스포터 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// 활성화 여부
    pub enabled: bool,
    /// 수신 주소
    pub listen_addr: String,
    /// 수신 포트
    pub port: u16,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            listen_addr: "127.0.0.1".to_owned(),
            port: 9464,
        }
    }
}

// --- 검증 헬퍼 ---

fn invalid(field: &str, reason: &str) -> StreamwatchError {
    ConfigError::InvalidValue {
        field: field.to_owned(),
        reason: reason.to_owned(),
    }
    .into()
}

fn check_one_of(field: &str, value: &str, allowed: &[&str]) -> Result<(), StreamwatchError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(invalid(
            field,
            &format!("must be one of: {}", allowed.join(", ")),
        ))
    }
}

fn check_pool(field: &str, values: &[String]) -> Result<(), StreamwatchError> {
    if values.is_empty() {
        return Err(invalid(field, "must contain at least one entry"));
    }
    if values.iter().any(|v| v.trim().is_empty()) {
        return Err(invalid(field, "entries must not be empty"));
    }
    Ok(())
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_parsed<T: std::str::FromStr>(target: &mut T, env_key: &str, type_name: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.trim().parse::<T>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                expected = type_name,
                "failed to parse env var, ignoring"
            ),
        }
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    override_parsed(target, env_key, "bool");
}

fn override_usize(target: &mut usize, env_key: &str) {
    override_parsed(target, env_key, "usize");
}

fn override_u16(target: &mut u16, env_key: &str) {
    override_parsed(target, env_key, "u16");
}

fn override_i32(target: &mut i32, env_key: &str) {
    override_parsed(target, env_key, "i32");
}

fn override_u64(target: &mut u64, env_key: &str) {
    override_parsed(target, env_key, "u64");
}

fn override_opt_u64(target: &mut Option<u64>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.trim().parse::<u64>() {
            Ok(parsed) => *target = Some(parsed),
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                expected = "u64",
                "failed to parse env var, ignoring"
            ),
        }
    }
}

fn override_csv(target: &mut Vec<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val.split(',').map(|s| s.trim().to_owned()).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sane_values() {
        let config = StreamwatchConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.general.log_format, "pretty");
        assert_eq!(config.broker.topic, "unique_topic");
        assert_eq!(config.broker.bootstrap_servers, "localhost:9092");
        assert_eq!(config.consumer.group_id, "default_group");
        assert_eq!(config.consumer.window_size, 5);
        assert_eq!(config.producer.interval_secs, 1);
        assert_eq!(config.producer.authors, vec!["Bri", "Ryan", "Kenny", "Kate"]);
        assert_eq!(
            config.producer.statuses,
            vec!["active", "inactive", "pending", "completed"]
        );
        assert!(config.producer.max_events.is_none());
        assert!(!config.metrics.enabled);
    }

    #[test]
    fn default_config_passes_validation() {
        StreamwatchConfig::default().validate().unwrap();
    }

    #[test]
    fn from_str_empty_toml_uses_defaults() {
        let config = StreamwatchConfig::parse("").unwrap();
        assert_eq!(config.consumer.window_size, 5);
        assert_eq!(config.broker.backend, "kafka");
    }

    #[test]
    fn from_str_partial_toml_merges_with_defaults() {
        let toml = r#"
[consumer]
window_size = 10

[broker]
backend = "memory"
"#;
        let config = StreamwatchConfig::parse(toml).unwrap();
        assert_eq!(config.consumer.window_size, 10);
        // group_id는 기본값 유지
        assert_eq!(config.consumer.group_id, "default_group");
        assert_eq!(config.broker.backend, "memory");
        assert_eq!(config.broker.topic, "unique_topic");
    }

    #[test]
    fn from_str_full_toml() {
        let toml = r#"
[general]
log_level = "debug"
log_format = "json"

[broker]
backend = "kafka"
bootstrap_servers = "kafka-1:9092,kafka-2:9092"
topic = "status_updates"
connect_timeout_secs = 5
partitions = 3
replication_factor = 2

[consumer]
group_id = "alerts"
window_size = 20
auto_offset_reset = "latest"
alert_channel_capacity = 64

[producer]
interval_secs = 0
authors = ["Ana"]
statuses = ["failed", "completed"]
max_events = 100

[metrics]
enabled = true
listen_addr = "0.0.0.0"
port = 9100
"#;
        let config = StreamwatchConfig::parse(toml).unwrap();
        config.validate().unwrap();
        assert_eq!(config.general.log_format, "json");
        assert_eq!(config.broker.partitions, 3);
        assert_eq!(config.consumer.auto_offset_reset, "latest");
        assert_eq!(config.producer.interval_secs, 0);
        assert_eq!(config.producer.max_events, Some(100));
        assert_eq!(config.metrics.port, 9100);
    }

    #[test]
    fn from_str_invalid_toml_returns_error() {
        let err = StreamwatchConfig::parse("invalid = [[[toml").unwrap_err();
        assert!(matches!(
            err,
            StreamwatchError::Config(ConfigError::ParseFailed { .. })
        ));
    }

    #[test]
    fn negative_interval_is_rejected_at_parse() {
        let result = StreamwatchConfig::parse("[producer]\ninterval_secs = -1");
        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut config = StreamwatchConfig::default();
        config.general.log_level = "verbose".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_level"));
    }

    #[test]
    fn validate_rejects_invalid_log_format() {
        let mut config = StreamwatchConfig::default();
        config.general.log_format = "xml".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_format"));
    }

    #[test]
    fn validate_rejects_unknown_backend() {
        let mut config = StreamwatchConfig::default();
        config.broker.backend = "pulsar".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("broker.backend"));
    }

    #[test]
    fn validate_rejects_zero_window() {
        let mut config = StreamwatchConfig::default();
        config.consumer.window_size = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("window_size"));
    }

    #[test]
    fn validate_rejects_empty_topic_and_group() {
        let mut config = StreamwatchConfig::default();
        config.broker.topic = "  ".to_owned();
        assert!(config.validate().unwrap_err().to_string().contains("topic"));

        let mut config = StreamwatchConfig::default();
        config.consumer.group_id = String::new();
        assert!(config.validate().unwrap_err().to_string().contains("group_id"));
    }

    #[test]
    fn validate_rejects_empty_author_pool() {
        let mut config = StreamwatchConfig::default();
        config.producer.authors.clear();
        assert!(config.validate().unwrap_err().to_string().contains("authors"));

        let mut config = StreamwatchConfig::default();
        config.producer.statuses.push(String::new());
        assert!(config.validate().unwrap_err().to_string().contains("statuses"));
    }

    #[test]
    fn validate_rejects_bad_partitions_and_offset_reset() {
        let mut config = StreamwatchConfig::default();
        config.broker.partitions = 0;
        assert!(config.validate().unwrap_err().to_string().contains("partitions"));

        let mut config = StreamwatchConfig::default();
        config.consumer.auto_offset_reset = "smallest".to_owned();
        assert!(
            config
                .validate()
                .unwrap_err()
                .to_string()
                .contains("auto_offset_reset")
        );
    }

    #[test]
    fn memory_backend_ignores_empty_bootstrap_servers() {
        let mut config = StreamwatchConfig::default();
        config.broker.backend = "memory".to_owned();
        config.broker.bootstrap_servers = String::new();
        config.validate().unwrap();
    }

    #[test]
    fn env_override_string() {
        let mut val = "original".to_owned();
        // SAFETY: 테스트는 단일 스레드에서 실행되므로 환경변수 조작이 안전합니다.
        unsafe { std::env::set_var("TEST_STREAMWATCH_STR", "overridden") };
        override_string(&mut val, "TEST_STREAMWATCH_STR");
        assert_eq!(val, "overridden");
        unsafe { std::env::remove_var("TEST_STREAMWATCH_STR") };
    }

    #[test]
    fn env_override_usize_invalid_keeps_original() {
        let mut val = 5usize;
        // SAFETY: 테스트는 단일 스레드에서 실행되므로 환경변수 조작이 안전합니다.
        unsafe { std::env::set_var("TEST_STREAMWATCH_USIZE_BAD", "five") };
        override_usize(&mut val, "TEST_STREAMWATCH_USIZE_BAD");
        assert_eq!(val, 5);
        unsafe { std::env::remove_var("TEST_STREAMWATCH_USIZE_BAD") };
    }

    #[test]
    fn env_override_opt_u64() {
        let mut val = None;
        // SAFETY: 테스트는 단일 스레드에서 실행되므로 환경변수 조작이 안전합니다.
        unsafe { std::env::set_var("TEST_STREAMWATCH_OPT", "0") };
        override_opt_u64(&mut val, "TEST_STREAMWATCH_OPT");
        assert_eq!(val, Some(0));

        unsafe { std::env::set_var("TEST_STREAMWATCH_OPT", "bogus") };
        override_opt_u64(&mut val, "TEST_STREAMWATCH_OPT");
        assert_eq!(val, Some(0));
        unsafe { std::env::remove_var("TEST_STREAMWATCH_OPT") };
    }

    #[test]
    fn env_override_csv() {
        let mut val = vec!["a".to_owned()];
        // SAFETY: 테스트는 단일 스레드에서 실행되므로 환경변수 조작이 안전합니다.
        unsafe { std::env::set_var("TEST_STREAMWATCH_CSV", "x, y, z") };
        override_csv(&mut val, "TEST_STREAMWATCH_CSV");
        assert_eq!(val, vec!["x", "y", "z"]);
        unsafe { std::env::remove_var("TEST_STREAMWATCH_CSV") };
    }

    #[test]
    fn env_override_missing_var_keeps_original() {
        let mut val = "original".to_owned();
        override_string(&mut val, "TEST_STREAMWATCH_NONEXISTENT_12345");
        assert_eq!(val, "original");
    }

    #[test]
    fn config_serialize_roundtrip() {
        let config = StreamwatchConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = StreamwatchConfig::parse(&toml_str).unwrap();
        assert_eq!(config.broker.topic, parsed.broker.topic);
        assert_eq!(config.consumer.window_size, parsed.consumer.window_size);
        assert_eq!(config.producer.authors, parsed.producer.authors);
    }

    #[tokio::test]
    async fn from_file_not_found() {
        let err = StreamwatchConfig::from_file("/nonexistent/path/streamwatch.toml")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StreamwatchError::Config(ConfigError::FileNotFound { .. })
        ));
    }
}
