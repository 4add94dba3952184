//! `streamwatch consume` command handler

use std::io::Write;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::info;

use streamwatch_broker::Broker;
use streamwatch_core::StreamwatchConfig;
use streamwatch_processor::{
    ProcessorConfig, ProcessorStats, StreamProcessor, StreamProcessorBuilder,
};

use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `consume` command.
///
/// Runs the stream processor until `cancel` fires or the broker ends the
/// stream, then prints what was processed.
///
/// # Errors
///
/// Broker unreachable or subscription failure. Bad records are skipped and
/// only show up in the report counts.
pub async fn execute<B: Broker>(
    config: &StreamwatchConfig,
    broker: &B,
    cancel: CancellationToken,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let mut processor = build_processor(config)?;

    info!(
        topic = %config.broker.topic,
        group_id = %config.consumer.group_id,
        "START stream processor"
    );
    broker.verify_reachable().await?;
    let stats = processor.run(broker, cancel).await?;
    info!("END stream processor");

    writer.render(&ConsumeReport {
        topic: config.broker.topic.clone(),
        group_id: config.consumer.group_id.clone(),
        window_size: processor.window().capacity(),
        stats: StatsSection::from(stats),
        window: processor.window().snapshot(),
    })?;
    Ok(())
}

/// Builds the processor `consume` runs.
///
/// Nothing downstream reads alerts here, so the processor only logs and
/// counts them.
pub fn build_processor(config: &StreamwatchConfig) -> Result<StreamProcessor, CliError> {
    let (processor, _) = StreamProcessorBuilder::new()
        .config(ProcessorConfig::from_core(config))
        .log_alerts_only()
        .build()?;
    Ok(processor)
}

/// Processor counters as printed by `consume` and `demo`.
#[derive(Debug, Serialize)]
pub struct StatsSection {
    pub records_received: u64,
    pub events_processed: u64,
    pub records_skipped: u64,
    pub alerts_emitted: u64,
}

impl From<ProcessorStats> for StatsSection {
    fn from(stats: ProcessorStats) -> Self {
        Self {
            records_received: stats.records_received,
            events_processed: stats.events_processed,
            records_skipped: stats.records_skipped,
            alerts_emitted: stats.alerts_emitted,
        }
    }
}

impl StatsSection {
    pub(crate) fn write_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "  Records received: {}", self.records_received)?;
        writeln!(w, "  Events processed: {}", self.events_processed)?;
        writeln!(w, "  Records skipped:  {}", self.records_skipped)?;
        writeln!(w, "  Alerts emitted:   {}", self.alerts_emitted)
    }
}

pub(crate) fn write_window(w: &mut dyn Write, window: &[String]) -> std::io::Result<()> {
    writeln!(w, "  Window ({} messages):", window.len())?;
    for (i, message) in window.iter().enumerate() {
        writeln!(w, "    {}. {}", i + 1, message)?;
    }
    Ok(())
}

/// Result of a `consume` run.
#[derive(Debug, Serialize)]
pub struct ConsumeReport {
    pub topic: String,
    pub group_id: String,
    pub window_size: usize,
    pub stats: StatsSection,
    /// Final window contents, oldest first.
    pub window: Vec<String>,
}

impl Render for ConsumeReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(
            w,
            "Stream processor stopped (topic: {}, group: {})",
            self.topic, self.group_id
        )?;
        self.stats.write_text(w)?;
        write_window(w, &self.window)
    }
}
