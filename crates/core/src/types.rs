//! 도메인 타입 -- 시스템 전역에서 사용되는 공통 타입
//!
//! 알림 규칙이 생성하는 [`Alert`]와 그 심각도 [`Severity`]를 정의합니다.

use std::fmt;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::event::StatusEvent;

/// 알림
///
/// 알림 규칙에 매칭되어 생성된 알림을 나타냅니다.
/// 트리거한 이벤트의 작성자와 타임스탬프를 항상 포함합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    /// 알림 ID (UUID v4)
    pub id: String,
    /// 알림을 생성한 규칙명
    pub rule_name: String,
    /// 심각도
    pub severity: Severity,
    /// 알림 제목
    pub title: String,
    /// 이벤트 작성자
    pub author: String,
    /// 이벤트 타임스탬프 (와이어 형식 그대로)
    pub event_timestamp: String,
    /// 전체 메시지 (긴급 알림에만 포함)
    pub message: Option<String>,
    /// 생성 시각
    pub created_at: SystemTime,
}

impl Alert {
    /// 이벤트로부터 새 알림을 생성합니다.
    pub fn for_event(
        rule_name: impl Into<String>,
        severity: Severity,
        title: impl Into<String>,
        event: &StatusEvent,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            rule_name: rule_name.into(),
            severity,
            title: title.into(),
            author: event.author.clone(),
            event_timestamp: event.timestamp.clone(),
            message: None,
            created_at: SystemTime::now(),
        }
    }

    /// 전체 메시지를 첨부합니다.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} by {} at {} (rule: {})",
            self.severity, self.title, self.author, self.event_timestamp, self.rule_name,
        )?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}

/// 심각도 레벨
///
/// `Ord` 구현으로 비교가 가능합니다 (`Info < Warning < Error`).
/// 각 레벨은 같은 이름의 로그 레벨로 출력됩니다.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// 정보성 알림 (완료 등)
    #[default]
    Info,
    /// 주의 필요 (긴급 메시지)
    Warning,
    /// 실패
    Error,
}

impl Severity {
    /// 문자열에서 심각도를 파싱합니다.
    ///
    /// 대소문자를 구분하지 않습니다.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "info" | "informational" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warning),
            "error" | "err" => Some(Self::Error),
            _ => None,
        }
    }

    /// 메트릭 레이블용 소문자 이름
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "Info"),
            Self::Warning => write!(f, "Warning"),
            Self::Error => write!(f, "Error"),
        }
    }
}
