//! 스트림 프로세서 설정
//!
//! [`ProcessorConfig`]는 core 설정의 `[broker]`, `[consumer]` 섹션에서
//! 프로세서가 필요로 하는 값만 모은 불변 설정입니다.
//!
//! # 사용 예시
//! ```
//! use streamwatch_core::StreamwatchConfig;
//! use streamwatch_processor::config::ProcessorConfig;
//!
//! let core_config = StreamwatchConfig::default();
//! let config = ProcessorConfig::from_core(&core_config);
//! assert_eq!(config.window_size, 5);
//! ```

use streamwatch_core::StreamwatchConfig;
use streamwatch_core::config::{DEFAULT_GROUP_ID, DEFAULT_TOPIC, DEFAULT_WINDOW_SIZE};

use crate::error::ProcessorError;

/// 롤링 윈도우 최대 크기
const MAX_WINDOW_SIZE: usize = 1_000_000;

/// 스트림 프로세서 설정
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorConfig {
    /// 구독할 토픽
    pub topic: String,
    /// 컨슈머 그룹 ID
    pub group_id: String,
    /// 롤링 윈도우 크기 (1 이상)
    pub window_size: usize,
    /// 알림 채널 용량
    pub alert_channel_capacity: usize,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            topic: DEFAULT_TOPIC.to_owned(),
            group_id: DEFAULT_GROUP_ID.to_owned(),
            window_size: DEFAULT_WINDOW_SIZE,
            alert_channel_capacity: 256,
        }
    }
}

impl ProcessorConfig {
    /// core 설정에서 프로세서 설정을 생성합니다.
    pub fn from_core(core: &StreamwatchConfig) -> Self {
        Self {
            topic: core.broker.topic.clone(),
            group_id: core.consumer.group_id.clone(),
            window_size: core.consumer.window_size,
            alert_channel_capacity: core.consumer.alert_channel_capacity,
        }
    }

    /// 설정 값을 검증합니다.
    pub fn validate(&self) -> Result<(), ProcessorError> {
        if self.topic.trim().is_empty() {
            return Err(config_error("topic", "must not be empty"));
        }
        if self.group_id.trim().is_empty() {
            return Err(config_error("group_id", "must not be empty"));
        }
        if self.window_size == 0 || self.window_size > MAX_WINDOW_SIZE {
            return Err(config_error(
                "window_size",
                format!("must be 1-{MAX_WINDOW_SIZE}"),
            ));
        }
        if self.alert_channel_capacity == 0 {
            return Err(config_error(
                "alert_channel_capacity",
                "must be greater than 0",
            ));
        }
        Ok(())
    }
}

fn config_error(field: &str, reason: impl Into<String>) -> ProcessorError {
    ProcessorError::Config {
        field: field.to_owned(),
        reason: reason.into(),
    }
}

/// 프로세서 설정 빌더
#[derive(Debug, Default)]
pub struct ProcessorConfigBuilder {
    config: ProcessorConfig,
}

impl ProcessorConfigBuilder {
    /// 기본값에서 시작하는 빌더
    pub fn new() -> Self {
        Self::default()
    }

    /// 토픽을 설정합니다.
    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.config.topic = topic.into();
        self
    }

    /// 컨슈머 그룹을 설정합니다.
    pub fn group_id(mut self, group_id: impl Into<String>) -> Self {
        self.config.group_id = group_id.into();
        self
    }

    /// 윈도우 크기를 설정합니다.
    pub fn window_size(mut self, size: usize) -> Self {
        self.config.window_size = size;
        self
    }

    /// 알림 채널 용량을 설정합니다.
    pub fn alert_channel_capacity(mut self, capacity: usize) -> Self {
        self.config.alert_channel_capacity = capacity;
        self
    }

    /// 검증 후 설정을 반환합니다.
    pub fn build(self) -> Result<ProcessorConfig, ProcessorError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ProcessorConfig::default().validate().is_ok());
    }

    #[test]
    fn from_core_copies_sections() {
        let mut core = StreamwatchConfig::default();
        core.broker.topic = "events".to_owned();
        core.consumer.group_id = "g".to_owned();
        core.consumer.window_size = 9;
        let config = ProcessorConfig::from_core(&core);
        assert_eq!(config.topic, "events");
        assert_eq!(config.group_id, "g");
        assert_eq!(config.window_size, 9);
    }

    #[test]
    fn builder_sets_fields() {
        let config = ProcessorConfigBuilder::new()
            .topic("t")
            .group_id("g")
            .window_size(1)
            .alert_channel_capacity(8)
            .build()
            .unwrap();
        assert_eq!(config.window_size, 1);
        assert_eq!(config.alert_channel_capacity, 8);
    }

    #[test]
    fn zero_window_rejected() {
        let err = ProcessorConfigBuilder::new().window_size(0).build().unwrap_err();
        assert!(err.to_string().contains("window_size"));
    }

    #[test]
    fn blank_topic_rejected() {
        assert!(ProcessorConfigBuilder::new().topic("  ").build().is_err());
    }

    #[test]
    fn zero_channel_capacity_rejected() {
        assert!(
            ProcessorConfigBuilder::new()
                .alert_channel_capacity(0)
                .build()
                .is_err()
        );
    }
}
