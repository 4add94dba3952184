//! `streamwatch produce` command handler

use std::io::Write;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::info;

use streamwatch_broker::Broker;
use streamwatch_core::StreamwatchConfig;
use streamwatch_generator::{EventProducer, GeneratorConfig, ProducerStats};

use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `produce` command.
///
/// Checks that the broker answers, then publishes until `max_events` is
/// reached or `cancel` fires.
///
/// # Errors
///
/// Broker unreachable, producer acquisition or topic setup failures.
/// Individual publish failures are counted in the report instead.
pub async fn execute<B: Broker>(
    config: &StreamwatchConfig,
    broker: &B,
    cancel: CancellationToken,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let generator_config = GeneratorConfig::from_core(config);
    let producer = EventProducer::new(generator_config)?;

    info!(topic = %config.broker.topic, "START producer");
    broker.verify_reachable().await?;
    let stats = producer.run(broker, cancel).await?;
    info!("END producer");

    writer.render(&ProduceReport::new(&config.broker.topic, stats))?;
    Ok(())
}

/// Result of a `produce` run.
#[derive(Debug, Serialize)]
pub struct ProduceReport {
    pub topic: String,
    pub generated: u64,
    pub published: u64,
    pub failed: u64,
}

impl ProduceReport {
    pub fn new(topic: &str, stats: ProducerStats) -> Self {
        Self {
            topic: topic.to_owned(),
            generated: stats.generated,
            published: stats.published,
            failed: stats.failed,
        }
    }
}

impl Render for ProduceReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "Producer finished (topic: {})", self.topic)?;
        writeln!(w, "  Generated: {}", self.generated)?;
        writeln!(w, "  Published: {}", self.published)?;
        writeln!(w, "  Failed:    {}", self.failed)
    }
}
