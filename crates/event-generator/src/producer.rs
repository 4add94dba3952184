//! 이벤트 프로듀서 -- 생성기의 이벤트를 일정 간격으로 토픽에 발행
//!
//! 시작 시 발행자 연결과 토픽 보장을 차례로 수행하며, 둘 중 하나라도 실패하면
//! 치명적 에러로 반환합니다. 이후 틱마다 이벤트 하나를 발행하고,
//! 종료 신호나 `max_events` 도달 시 발행자를 닫고 끝납니다.
//!
//! 개별 발행 실패는 로그와 메트릭에 남기고 다음 틱에서 계속합니다.

use bytes::Bytes;
use tokio::time::{Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use streamwatch_broker::{Broker, Publisher};
use streamwatch_core::metrics as m;

use crate::config::GeneratorConfig;
use crate::error::GeneratorError;
use crate::generator::EventGenerator;

/// 발행 통계
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProducerStats {
    /// 생성된 이벤트 수
    pub generated: u64,
    /// 발행 성공 수
    pub published: u64,
    /// 발행 실패 수
    pub failed: u64,
}

/// 이벤트 프로듀서
pub struct EventProducer {
    config: GeneratorConfig,
    generator: EventGenerator,
}

impl EventProducer {
    /// 설정을 검증하고 엔트로피 시드 생성기로 프로듀서를 만듭니다.
    pub fn new(config: GeneratorConfig) -> Result<Self, GeneratorError> {
        let generator = EventGenerator::new(&config)?;
        Ok(Self { config, generator })
    }

    /// 주어진 생성기를 사용하는 프로듀서
    pub fn with_generator(
        config: GeneratorConfig,
        generator: EventGenerator,
    ) -> Result<Self, GeneratorError> {
        config.validate()?;
        Ok(Self { config, generator })
    }

    /// 설정
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// 발행자를 연결하고 토픽을 보장한 뒤 종료될 때까지 발행합니다.
    ///
    /// # Errors
    ///
    /// 발행자 연결 또는 토픽 생성/확인 실패 시 `GeneratorError::ResourceAcquisition`.
    pub async fn run<B: Broker>(
        mut self,
        broker: &B,
        cancel: CancellationToken,
    ) -> Result<ProducerStats, GeneratorError> {
        let topic = self.config.topic.clone();

        let mut publisher = broker.connect_producer().await.map_err(|source| {
            tracing::error!(error = %source, "failed to create producer");
            GeneratorError::ResourceAcquisition {
                resource: "publisher",
                source,
            }
        })?;

        if let Err(source) = broker.ensure_topic(&topic).await {
            tracing::error!(%topic, error = %source, "failed to create or verify topic");
            if let Err(e) = publisher.close().await {
                tracing::warn!(error = %e, "producer close failed");
            }
            return Err(GeneratorError::ResourceAcquisition {
                resource: "topic",
                source,
            });
        }
        tracing::info!(%topic, "topic is ready");

        let mut ticker = ticker(&self.config);
        let mut stats = ProducerStats::default();

        tracing::info!(
            %topic,
            interval_ms = self.config.interval.as_millis() as u64,
            max_events = ?self.config.max_events,
            "starting event production"
        );

        loop {
            if self
                .config
                .max_events
                .is_some_and(|max| stats.generated >= max)
            {
                tracing::info!(generated = stats.generated, "max_events reached, stopping");
                break;
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::warn!("producer interrupted");
                    break;
                }
                _ = tick(&mut ticker) => {}
            }

            let Some(event) = self.generator.next() else {
                break;
            };
            stats.generated += 1;

            let payload = match event.to_payload() {
                Ok(payload) => Bytes::from(payload),
                Err(e) => {
                    stats.failed += 1;
                    tracing::error!(error = %e, "failed to encode event");
                    continue;
                }
            };

            match publisher.publish(&topic, None, payload).await {
                Ok(delivery) => {
                    stats.published += 1;
                    metrics::counter!(m::PRODUCER_EVENTS_PUBLISHED_TOTAL).increment(1);
                    tracing::info!(
                        %topic,
                        partition = delivery.partition,
                        offset = delivery.offset,
                        "sent message: {event}"
                    );
                }
                Err(e) => {
                    stats.failed += 1;
                    metrics::counter!(m::PRODUCER_PUBLISH_FAILURES_TOTAL).increment(1);
                    tracing::error!(%topic, error = %e, "failed to publish event");
                }
            }
        }

        if let Err(e) = publisher.close().await {
            tracing::warn!(error = %e, "producer close failed");
        }
        tracing::info!(
            generated = stats.generated,
            published = stats.published,
            failed = stats.failed,
            "producer closed"
        );
        Ok(stats)
    }
}

/// 간격이 0이면 ticker 없이 매번 양보만 합니다.
fn ticker(config: &GeneratorConfig) -> Option<Interval> {
    if config.interval.is_zero() {
        return None;
    }
    let mut interval = tokio::time::interval(config.interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    Some(interval)
}

async fn tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => tokio::task::yield_now().await,
    }
}
