//! 알림 방출 -- 규칙이 만든 알림을 로그, 메트릭, 하류 채널로 내보냅니다.
//!
//! 각 알림은 심각도와 같은 로그 레벨로 기록됩니다 (Info -> info, Warning -> warn,
//! Error -> error). 하류 채널이 연결되어 있으면 `try_send`로 전달하며,
//! 채널이 가득 차 있어도 레코드 처리를 막지 않습니다.

use tokio::sync::mpsc;

use streamwatch_core::metrics as m;
use streamwatch_core::types::{Alert, Severity};

/// 알림 방출기
pub struct AlertEmitter {
    /// 하류 알림 채널 (선택)
    sender: Option<mpsc::Sender<Alert>>,
    /// 방출된 총 알림 수
    total_emitted: u64,
    /// 심각도별 방출 수 (Info, Warning, Error 순)
    by_severity: [u64; 3],
    /// 채널이 가득 차서 버려진 알림 수
    channel_dropped: u64,
}

impl AlertEmitter {
    /// 새 방출기를 만듭니다.
    pub fn new(sender: Option<mpsc::Sender<Alert>>) -> Self {
        Self {
            sender,
            total_emitted: 0,
            by_severity: [0; 3],
            channel_dropped: 0,
        }
    }

    /// 알림 하나를 방출합니다.
    pub fn emit(&mut self, alert: Alert) {
        self.total_emitted += 1;
        self.by_severity[severity_index(alert.severity)] += 1;

        let message = alert.message.as_deref().unwrap_or_default();
        match alert.severity {
            Severity::Info => tracing::info!(
                rule = %alert.rule_name,
                author = %alert.author,
                timestamp = %alert.event_timestamp,
                "ALERT: {}",
                alert.title
            ),
            Severity::Warning => tracing::warn!(
                rule = %alert.rule_name,
                author = %alert.author,
                timestamp = %alert.event_timestamp,
                full_message = message,
                "ALERT: {}",
                alert.title
            ),
            Severity::Error => tracing::error!(
                rule = %alert.rule_name,
                author = %alert.author,
                timestamp = %alert.event_timestamp,
                "ALERT: {}",
                alert.title
            ),
        }

        metrics::counter!(
            m::PROCESSOR_ALERTS_EMITTED_TOTAL,
            m::LABEL_RULE => alert.rule_name.clone(),
            m::LABEL_SEVERITY => alert.severity.as_str()
        )
        .increment(1);

        let Some(sender) = &self.sender else {
            return;
        };
        match sender.try_send(alert) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(dropped)) => {
                self.channel_dropped += 1;
                tracing::warn!(
                    rule = %dropped.rule_name,
                    dropped = self.channel_dropped,
                    "alert channel full, dropped alert"
                );
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::debug!("alert receiver dropped, detaching channel");
                self.sender = None;
            }
        }
    }

    /// 방출된 총 알림 수
    pub fn total_emitted(&self) -> u64 {
        self.total_emitted
    }

    /// 특정 심각도로 방출된 알림 수
    pub fn emitted_with(&self, severity: Severity) -> u64 {
        self.by_severity[severity_index(severity)]
    }

    /// 채널 포화로 버려진 알림 수
    pub fn channel_dropped(&self) -> u64 {
        self.channel_dropped
    }

    /// 하류 채널이 연결되어 있는지 확인합니다.
    pub fn has_channel(&self) -> bool {
        self.sender.is_some()
    }
}

fn severity_index(severity: Severity) -> usize {
    match severity {
        Severity::Info => 0,
        Severity::Warning => 1,
        Severity::Error => 2,
    }
}
