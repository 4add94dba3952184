//! 알림 규칙 엔진
//!
//! [`RuleEngine`]은 등록 순서대로 모든 규칙을 현재 이벤트에 적용합니다.
//! 규칙은 서로 독립적이며, 하나의 이벤트가 여러 규칙을 동시에 발화시킬 수 있습니다.
//!
//! # 아키텍처
//! - [`builtin`]: 완료/실패/긴급 내장 규칙
//! - [`matcher`]: 필드 조회와 대소문자 무시 부분 문자열 매칭

pub mod builtin;
pub mod matcher;

pub use builtin::{COMPLETION_RULE, ContainsRule, FAILURE_RULE, URGENCY_RULE};
pub use matcher::EventField;

use streamwatch_core::event::StatusEvent;
use streamwatch_core::pipeline::AlertRule;
use streamwatch_core::types::Alert;

/// 규칙 엔진 -- 고정된 순서로 규칙을 평가
///
/// # 사용 예시
/// ```
/// use streamwatch_core::StatusEvent;
/// use streamwatch_processor::rule::RuleEngine;
///
/// let engine = RuleEngine::with_default_rules();
/// let event = StatusEvent {
///     message: "urgent fix needed".to_owned(),
///     author: "Ryan".to_owned(),
///     status: "completed".to_owned(),
///     timestamp: "2024-01-01T00:00:01Z".to_owned(),
/// };
/// let alerts = engine.evaluate(&event);
/// assert_eq!(alerts.len(), 2);
/// ```
pub struct RuleEngine {
    rules: Vec<Box<dyn AlertRule>>,
}

impl RuleEngine {
    /// 규칙이 없는 엔진을 생성합니다.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// 완료, 실패, 긴급 규칙을 이 순서로 등록한 엔진
    pub fn with_default_rules() -> Self {
        let mut engine = Self::new();
        engine.add_rule(ContainsRule::completion());
        engine.add_rule(ContainsRule::failure());
        engine.add_rule(ContainsRule::urgency());
        engine
    }

    /// 규칙을 목록 끝에 추가합니다.
    pub fn add_rule(&mut self, rule: impl AlertRule + 'static) {
        tracing::debug!(rule = rule.name(), "alert rule registered");
        self.rules.push(Box::new(rule));
    }

    /// 등록된 규칙 수
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// 등록 순서대로 규칙 이름
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// 모든 규칙을 평가하고 발화한 알림을 등록 순서대로 반환합니다.
    pub fn evaluate(&self, event: &StatusEvent) -> Vec<Alert> {
        self.rules
            .iter()
            .filter_map(|rule| rule.evaluate(event))
            .collect()
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamwatch_core::types::Severity;

    fn event(message: &str, status: &str) -> StatusEvent {
        StatusEvent {
            message: message.to_owned(),
            author: "Bri".to_owned(),
            status: status.to_owned(),
            timestamp: "2024-01-01T00:00:00Z".to_owned(),
        }
    }

    #[test]
    fn default_rule_order() {
        let engine = RuleEngine::default();
        assert_eq!(
            engine.rule_names(),
            vec![COMPLETION_RULE, FAILURE_RULE, URGENCY_RULE]
        );
    }

    #[test]
    fn all_three_fire_independently() {
        let engine = RuleEngine::with_default_rules();
        let alerts = engine.evaluate(&event("this is urgent", "completed and failed"));
        let names: Vec<_> = alerts.iter().map(|a| a.rule_name.as_str()).collect();
        assert_eq!(names, vec![COMPLETION_RULE, FAILURE_RULE, URGENCY_RULE]);
        let severities: Vec<_> = alerts.iter().map(|a| a.severity).collect();
        assert_eq!(
            severities,
            vec![Severity::Info, Severity::Error, Severity::Warning]
        );
    }

    #[test]
    fn none_fire_for_plain_pending() {
        let engine = RuleEngine::with_default_rules();
        assert!(engine.evaluate(&event("all quiet", "pending")).is_empty());
    }

    #[test]
    fn empty_engine_fires_nothing() {
        let engine = RuleEngine::new();
        assert_eq!(engine.rule_count(), 0);
        assert!(engine.evaluate(&event("urgent", "failed")).is_empty());
    }

    #[test]
    fn custom_rule_appended_after_defaults() {
        let mut engine = RuleEngine::with_default_rules();
        engine.add_rule(ContainsRule::new(
            "bri_posted",
            EventField::Author,
            "bri",
            Severity::Info,
            "Bri posted",
        ));
        let alerts = engine.evaluate(&event("x", "active"));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].rule_name, "bri_posted");
    }
}
