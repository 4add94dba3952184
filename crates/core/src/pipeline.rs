//! 파이프라인 trait -- 모듈 확장 포인트 정의

use crate::event::StatusEvent;
use crate::types::Alert;

/// 알림 규칙을 구현하는 trait
///
/// 새로운 알림 규칙을 추가하려면 이 trait을 구현합니다.
/// 규칙은 현재 이벤트만 보고 판단하며, 이전 이벤트나 윈도우 상태에 의존하지 않습니다.
pub trait AlertRule: Send + Sync {
    /// 규칙 이름 (메트릭 레이블로도 사용)
    fn name(&self) -> &str;

    /// 검증된 이벤트를 평가하여 알림 생성 여부를 결정
    fn evaluate(&self, event: &StatusEvent) -> Option<Alert>;
}
