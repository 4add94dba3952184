//! 이벤트 생성기 설정
//!
//! [`GeneratorConfig`]는 core 설정의 `[broker]`, `[producer]` 섹션에서 파생됩니다.

use std::time::Duration;

use streamwatch_core::StreamwatchConfig;
use streamwatch_core::config::{DEFAULT_INTERVAL_SECS, DEFAULT_TOPIC, ProducerConfig};

use crate::error::GeneratorError;

/// 이벤트 생성기 설정
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// 발행할 토픽
    pub topic: String,
    /// 발행 간격 (0이면 대기 없이 발행)
    pub interval: Duration,
    /// 작성자 후보
    pub authors: Vec<String>,
    /// 상태 후보
    pub statuses: Vec<String>,
    /// 최대 발행 수 (None이면 무한)
    pub max_events: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let producer = ProducerConfig::default();
        Self {
            topic: DEFAULT_TOPIC.to_owned(),
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            authors: producer.authors,
            statuses: producer.statuses,
            max_events: None,
        }
    }
}

impl GeneratorConfig {
    /// core 설정에서 생성기 설정을 생성합니다.
    pub fn from_core(core: &StreamwatchConfig) -> Self {
        Self {
            topic: core.broker.topic.clone(),
            interval: Duration::from_secs(core.producer.interval_secs),
            authors: core.producer.authors.clone(),
            statuses: core.producer.statuses.clone(),
            max_events: core.producer.max_events,
        }
    }

    /// 설정 값을 검증합니다.
    ///
    /// 후보 목록이 비어있거나 빈 항목이 있으면 유효하지 않은 이벤트가
    /// 만들어질 수 있으므로 거부합니다.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.topic.trim().is_empty() {
            return Err(config_error("topic", "must not be empty"));
        }
        check_candidates("authors", &self.authors)?;
        check_candidates("statuses", &self.statuses)?;
        Ok(())
    }
}

fn check_candidates(field: &str, values: &[String]) -> Result<(), GeneratorError> {
    if values.is_empty() {
        return Err(config_error(field, "must not be empty"));
    }
    if values.iter().any(|v| v.is_empty()) {
        return Err(config_error(field, "entries must not be empty"));
    }
    Ok(())
}

fn config_error(field: &str, reason: &str) -> GeneratorError {
    GeneratorError::Config {
        field: field.to_owned(),
        reason: reason.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_producer_section() {
        let config = GeneratorConfig::default();
        assert_eq!(config.topic, "unique_topic");
        assert_eq!(config.interval, Duration::from_secs(1));
        assert_eq!(config.authors, vec!["Bri", "Ryan", "Kenny", "Kate"]);
        assert_eq!(
            config.statuses,
            vec!["active", "inactive", "pending", "completed"]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn from_core_reads_sections() {
        let mut core = StreamwatchConfig::default();
        core.broker.topic = "events".to_owned();
        core.producer.interval_secs = 0;
        core.producer.max_events = Some(10);
        let config = GeneratorConfig::from_core(&core);
        assert_eq!(config.topic, "events");
        assert!(config.interval.is_zero());
        assert_eq!(config.max_events, Some(10));
    }

    #[test]
    fn empty_candidates_rejected() {
        let config = GeneratorConfig {
            authors: Vec::new(),
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());

        let config = GeneratorConfig {
            statuses: vec!["active".to_owned(), String::new()],
            ..GeneratorConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("statuses"));
    }
}
