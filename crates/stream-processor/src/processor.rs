//! 스트림 프로세서 -- 구독, 디코딩, 검증, 윈도우 갱신, 알림 평가의 전체 흐름
//!
//! # 상태 전이
//!
//! ```text
//! Starting -> Polling <-> Processing -> ShuttingDown -> Stopped
//! ```
//!
//! 종료 신호는 레코드 사이에서만 확인합니다. 레코드 하나의 처리(디코딩부터
//! 알림 방출까지)는 동기 코드이므로 중간에 끊기지 않습니다.
//!
//! # 사용 예시
//! ```
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use streamwatch_broker::MemoryBroker;
//! use streamwatch_processor::StreamProcessorBuilder;
//! use tokio_util::sync::CancellationToken;
//!
//! let broker = MemoryBroker::new();
//! let (mut processor, _alerts) = StreamProcessorBuilder::new().build()?;
//! let cancel = CancellationToken::new();
//! cancel.cancel();
//! let stats = processor.run(&broker, cancel).await?;
//! assert_eq!(stats.records_received, 0);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::num::NonZeroUsize;
use std::time::Instant;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use streamwatch_broker::{Broker, Record, Subscription, SubscriptionGuard};
use streamwatch_core::event;
use streamwatch_core::metrics as m;
use streamwatch_core::types::Alert;

use crate::alert::AlertEmitter;
use crate::config::ProcessorConfig;
use crate::error::{ProcessorError, RecordError};
use crate::rule::RuleEngine;
use crate::window::RollingWindow;

/// 로그에 남길 원시 페이로드 최대 길이
const RAW_PREVIEW_LIMIT: usize = 512;

/// 프로세서 실행 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorState {
    /// 생성됨, 아직 구독하지 않음
    Starting,
    /// 다음 레코드 대기 중
    Polling,
    /// 레코드 처리 중
    Processing,
    /// 종료 신호 수신, 구독 해제 중
    ShuttingDown,
    /// 정지됨
    Stopped,
}

impl fmt::Display for ProcessorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Starting => "starting",
            Self::Polling => "polling",
            Self::Processing => "processing",
            Self::ShuttingDown => "shutting_down",
            Self::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// 처리 통계
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessorStats {
    /// 수신한 레코드 수
    pub records_received: u64,
    /// 윈도우에 반영된 유효 이벤트 수
    pub events_processed: u64,
    /// 건너뛴 레코드 수
    pub records_skipped: u64,
    /// 방출된 알림 수
    pub alerts_emitted: u64,
}

/// 스트림 프로세서
///
/// 롤링 윈도우와 알림 채널을 단독으로 소유하며, 한 번만 실행할 수 있습니다.
pub struct StreamProcessor {
    config: ProcessorConfig,
    state: ProcessorState,
    window: RollingWindow,
    rules: RuleEngine,
    alerts: AlertEmitter,
    stats: ProcessorStats,
    stop_after: Option<u64>,
}

impl StreamProcessor {
    /// 구독을 획득하고 종료 신호를 받을 때까지 레코드를 처리합니다.
    ///
    /// 구독은 모든 종료 경로에서 정확히 한 번 해제됩니다.
    ///
    /// # Errors
    ///
    /// - 구독 획득 실패: `ProcessorError::ResourceAcquisition`
    /// - 이미 실행된 프로세서: `ProcessorError::AlreadyRunning`
    pub async fn run<B: Broker>(
        &mut self,
        broker: &B,
        cancel: CancellationToken,
    ) -> Result<ProcessorStats, ProcessorError> {
        if self.state != ProcessorState::Starting {
            return Err(ProcessorError::AlreadyRunning);
        }

        let topic = self.config.topic.clone();
        let group_id = self.config.group_id.clone();

        let subscription = match broker.connect_consumer(&topic, &group_id).await {
            Ok(subscription) => subscription,
            Err(source) => {
                self.state = ProcessorState::Stopped;
                tracing::error!(%topic, %group_id, error = %source, "failed to subscribe");
                return Err(ProcessorError::ResourceAcquisition {
                    resource: "subscription",
                    source,
                });
            }
        };
        let mut subscription = SubscriptionGuard::new(subscription);

        tracing::info!(
            %topic,
            %group_id,
            window_size = self.window.capacity(),
            rules = self.rules.rule_count(),
            "stream processor started"
        );
        self.state = ProcessorState::Polling;

        loop {
            if self.limit_reached() {
                tracing::info!(
                    records = self.stats.records_received,
                    "record limit reached, stopping"
                );
                break;
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!("stream processor received shutdown signal");
                    break;
                }
                next = subscription.next_record() => match next {
                    Some(Ok(record)) => {
                        self.state = ProcessorState::Processing;
                        self.handle_record(&record);
                        self.state = ProcessorState::Polling;
                    }
                    Some(Err(e)) => {
                        tracing::warn!(%topic, error = %e, "receive failed, continuing");
                    }
                    None => {
                        tracing::info!(%topic, "subscription stream ended");
                        break;
                    }
                },
            }
        }

        self.state = ProcessorState::ShuttingDown;
        if let Err(e) = subscription.close() {
            tracing::warn!(%topic, error = %e, "subscription close failed");
        }
        self.state = ProcessorState::Stopped;

        tracing::info!(
            received = self.stats.records_received,
            processed = self.stats.events_processed,
            skipped = self.stats.records_skipped,
            alerts = self.stats.alerts_emitted,
            "stream processor stopped"
        );
        Ok(self.stats)
    }

    /// 레코드 하나를 처리하고 발생한 에러는 로그로 남긴 뒤 삼킵니다.
    pub fn handle_record(&mut self, record: &Record) {
        let started = Instant::now();
        self.stats.records_received += 1;
        metrics::counter!(m::PROCESSOR_RECORDS_RECEIVED_TOTAL).increment(1);

        tracing::debug!(
            topic = %record.topic,
            partition = record.partition,
            offset = record.offset,
            raw = %preview(&record.value),
            "received record"
        );

        if let Err(e) = self.process_record(record) {
            self.stats.records_skipped += 1;
            metrics::counter!(m::PROCESSOR_RECORDS_SKIPPED_TOTAL, m::LABEL_REASON => e.reason())
                .increment(1);
            tracing::error!(
                offset = record.offset,
                reason = e.reason(),
                raw = %preview(&record.value),
                error = %e,
                "skipping record"
            );
        }

        metrics::histogram!(m::PROCESSOR_RECORD_DURATION_SECONDS)
            .record(started.elapsed().as_secs_f64());
    }

    /// 레코드 하나를 처리합니다.
    pub fn process_record(&mut self, record: &Record) -> Result<Vec<Alert>, RecordError> {
        self.process_payload(record.offset, &record.value)
    }

    /// 원시 페이로드 하나를 처리합니다.
    ///
    /// 디코딩 또는 검증에 실패하면 윈도우와 알림은 변하지 않습니다.
    /// 성공하면 메시지를 윈도우에 추가하고 발화한 알림을 등록 순서대로 반환합니다.
    pub fn process_payload(
        &mut self,
        offset: i64,
        payload: &[u8],
    ) -> Result<Vec<Alert>, RecordError> {
        let decoded =
            event::decode_bytes(payload).map_err(|source| RecordError::Decode { offset, source })?;
        let event = decoded
            .check()
            .map_err(|source| RecordError::Validation { offset, source })?;

        tracing::info!(
            offset,
            author = %event.author,
            status = %event.status,
            timestamp = %event.timestamp,
            "received event: {}",
            event.message
        );

        self.window.push(event.message.clone());
        self.stats.events_processed += 1;
        metrics::counter!(m::PROCESSOR_EVENTS_PROCESSED_TOTAL).increment(1);
        metrics::gauge!(m::PROCESSOR_WINDOW_SIZE).set(self.window.len() as f64);
        tracing::info!(
            len = self.window.len(),
            capacity = self.window.capacity(),
            "rolling window: {:?}",
            self.window.iter().collect::<Vec<_>>()
        );

        let fired = self.rules.evaluate(&event);
        for alert in &fired {
            self.alerts.emit(alert.clone());
        }
        self.stats.alerts_emitted += fired.len() as u64;
        Ok(fired)
    }

    fn limit_reached(&self) -> bool {
        self.stop_after
            .is_some_and(|limit| self.stats.records_received >= limit)
    }

    /// 현재 상태
    pub fn state(&self) -> ProcessorState {
        self.state
    }

    /// 롤링 윈도우
    pub fn window(&self) -> &RollingWindow {
        &self.window
    }

    /// 처리 통계
    pub fn stats(&self) -> ProcessorStats {
        self.stats
    }

    /// 설정
    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// 알림 방출기
    pub fn alerts(&self) -> &AlertEmitter {
        &self.alerts
    }
}

/// 로그용 페이로드 미리보기 (UTF-8이 아니면 손실 변환)
fn preview(payload: &[u8]) -> String {
    let cut = payload.len().min(RAW_PREVIEW_LIMIT);
    let mut text = String::from_utf8_lossy(&payload[..cut]).into_owned();
    if payload.len() > cut {
        text.push_str("...");
    }
    text
}

/// 스트림 프로세서 빌더
pub struct StreamProcessorBuilder {
    config: ProcessorConfig,
    rules: Option<RuleEngine>,
    alert_tx: Option<mpsc::Sender<Alert>>,
    log_only: bool,
    stop_after: Option<u64>,
}

impl StreamProcessorBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self {
            config: ProcessorConfig::default(),
            rules: None,
            alert_tx: None,
            log_only: false,
            stop_after: None,
        }
    }

    /// 프로세서 설정을 지정합니다.
    pub fn config(mut self, config: ProcessorConfig) -> Self {
        self.config = config;
        self
    }

    /// 규칙 엔진을 지정합니다. 지정하지 않으면 내장 규칙 세 개를 사용합니다.
    pub fn rules(mut self, rules: RuleEngine) -> Self {
        self.rules = Some(rules);
        self
    }

    /// 외부 알림 전송 채널을 설정합니다.
    ///
    /// 설정하지 않으면 빌더가 `alert_channel_capacity` 크기의 새 채널을 생성합니다.
    pub fn alert_sender(mut self, tx: mpsc::Sender<Alert>) -> Self {
        self.alert_tx = Some(tx);
        self
    }

    /// 알림 채널 없이 빌드합니다. 알림은 로그와 카운터에만 남습니다.
    ///
    /// `alert_sender`보다 우선합니다.
    pub fn log_alerts_only(mut self) -> Self {
        self.log_only = true;
        self
    }

    /// 레코드 `n`개를 수신하면 스스로 종료합니다.
    pub fn stop_after_records(mut self, n: u64) -> Self {
        self.stop_after = Some(n);
        self
    }

    /// 프로세서를 빌드합니다.
    ///
    /// # Returns
    /// - `StreamProcessor`: 프로세서 인스턴스
    /// - `Option<mpsc::Receiver<Alert>>`: 알림 수신 채널
    ///   (외부 alert_sender 또는 log_alerts_only를 설정한 경우 None)
    pub fn build(self) -> Result<(StreamProcessor, Option<mpsc::Receiver<Alert>>), ProcessorError> {
        self.config.validate()?;

        let capacity = NonZeroUsize::new(self.config.window_size).ok_or_else(|| {
            ProcessorError::Config {
                field: "window_size".to_owned(),
                reason: "must be at least 1".to_owned(),
            }
        })?;

        let (alert_tx, alert_rx) = match (self.log_only, self.alert_tx) {
            (true, _) => (None, None),
            (false, Some(tx)) => (Some(tx), None),
            (false, None) => {
                let (tx, rx) = mpsc::channel(self.config.alert_channel_capacity);
                (Some(tx), Some(rx))
            }
        };

        let processor = StreamProcessor {
            config: self.config,
            state: ProcessorState::Starting,
            window: RollingWindow::new(capacity),
            rules: self.rules.unwrap_or_default(),
            alerts: AlertEmitter::new(alert_tx),
            stats: ProcessorStats::default(),
            stop_after: self.stop_after,
        };

        Ok((processor, alert_rx))
    }
}

impl Default for StreamProcessorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
