//! 내장 알림 규칙
//!
//! | 규칙 | 필드 | 부분 문자열 | 심각도 | 메시지 첨부 |
//! |------|------|-------------|--------|-------------|
//! | `completion` | `status` | `completed` | Info | 아니오 |
//! | `failure` | `status` | `failed` | Error | 아니오 |
//! | `urgency` | `message` | `urgent` | Warning | 예 |

use streamwatch_core::event::StatusEvent;
use streamwatch_core::pipeline::AlertRule;
use streamwatch_core::types::{Alert, Severity};

use super::matcher::{EventField, contains_ignore_case};

/// 완료 규칙 이름
pub const COMPLETION_RULE: &str = "completion";
/// 실패 규칙 이름
pub const FAILURE_RULE: &str = "failure";
/// 긴급 규칙 이름
pub const URGENCY_RULE: &str = "urgency";

/// 필드 하나에 대한 대소문자 무시 부분 문자열 규칙
#[derive(Debug, Clone)]
pub struct ContainsRule {
    name: String,
    field: EventField,
    needle: String,
    severity: Severity,
    title: String,
    attach_message: bool,
}

impl ContainsRule {
    /// 새 규칙을 만듭니다. `needle`은 소문자로 정규화됩니다.
    pub fn new(
        name: impl Into<String>,
        field: EventField,
        needle: &str,
        severity: Severity,
        title: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            field,
            needle: needle.to_lowercase(),
            severity,
            title: title.into(),
            attach_message: false,
        }
    }

    /// 알림에 전체 메시지를 첨부합니다.
    pub fn attach_message(mut self) -> Self {
        self.attach_message = true;
        self
    }

    /// `status`에 "completed"가 포함되면 Info 알림
    pub fn completion() -> Self {
        Self::new(
            COMPLETION_RULE,
            EventField::Status,
            "completed",
            Severity::Info,
            "Task completed",
        )
    }

    /// `status`에 "failed"가 포함되면 Error 알림
    pub fn failure() -> Self {
        Self::new(
            FAILURE_RULE,
            EventField::Status,
            "failed",
            Severity::Error,
            "Task failed",
        )
    }

    /// `message`에 "urgent"가 포함되면 메시지 전체를 담은 Warning 알림
    pub fn urgency() -> Self {
        Self::new(
            URGENCY_RULE,
            EventField::Message,
            "urgent",
            Severity::Warning,
            "Urgent message",
        )
        .attach_message()
    }

    /// 검사 대상 필드
    pub fn field(&self) -> EventField {
        self.field
    }

    /// 정규화된 부분 문자열
    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// 알림 심각도
    pub fn severity(&self) -> Severity {
        self.severity
    }
}

impl AlertRule for ContainsRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, event: &StatusEvent) -> Option<Alert> {
        if !contains_ignore_case(self.field.value(event), &self.needle) {
            return None;
        }
        let alert = Alert::for_event(&self.name, self.severity, &self.title, event);
        if self.attach_message {
            Some(alert.with_message(&event.message))
        } else {
            Some(alert)
        }
    }
}
