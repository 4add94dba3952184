//! `streamwatch demo` command handler
//!
//! Producer and stream processor share one in-memory broker inside this
//! process. The processor stops after `events` records; the producer stops
//! after publishing them.

use std::collections::BTreeMap;
use std::io::Write;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::info;

use streamwatch_broker::{Broker, MemoryBroker};
use streamwatch_core::StreamwatchConfig;
use streamwatch_generator::{EventProducer, GeneratorConfig};
use streamwatch_processor::{ProcessorConfig, StreamProcessorBuilder};

use super::consume::{StatsSection, write_window};
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `demo` command.
///
/// `config.producer.max_events` sets how many events are produced; the CLI
/// fills it from `--events`.
pub async fn execute(
    config: &StreamwatchConfig,
    cancel: CancellationToken,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let broker = MemoryBroker::new();
    let report = run(config, &broker, cancel).await?;
    writer.render(&report)?;
    Ok(())
}

/// Runs both sides against `broker` and collects the report.
///
/// # Errors
///
/// Fatal producer or processor errors. A producer failure also stops the
/// processor, since nothing more will arrive.
pub async fn run<B: Broker>(
    config: &StreamwatchConfig,
    broker: &B,
    cancel: CancellationToken,
) -> Result<DemoReport, CliError> {
    let events = config.producer.max_events.ok_or_else(|| {
        CliError::Config("demo needs a bounded event count (producer.max_events)".to_owned())
    })?;

    let producer = EventProducer::new(GeneratorConfig::from_core(config))?;
    let (mut processor, alert_rx) = StreamProcessorBuilder::new()
        .config(ProcessorConfig::from_core(config))
        .stop_after_records(events)
        .build()?;

    let producer_cancel = cancel.child_token();
    let processor_cancel = cancel.child_token();

    info!(events, window_size = config.consumer.window_size, "START demo");

    let produce = {
        let processor_cancel = processor_cancel.clone();
        let producer_cancel = producer_cancel.clone();
        async move {
            let result = producer.run(broker, producer_cancel).await;
            if result.is_err() {
                processor_cancel.cancel();
            }
            result
        }
    };

    let process = async move {
        let result = processor.run(broker, processor_cancel).await;
        producer_cancel.cancel();
        let window = processor.window().snapshot();
        // Dropping the processor closes the alert channel.
        drop(processor);
        (result, window)
    };

    let collect = async move {
        let mut by_rule = BTreeMap::new();
        if let Some(mut rx) = alert_rx {
            while let Some(alert) = rx.recv().await {
                *by_rule.entry(alert.rule_name).or_insert(0u64) += 1;
            }
        }
        by_rule
    };

    let (produced, (processed, window), alerts_by_rule) = tokio::join!(produce, process, collect);
    let produced = produced?;
    let processed = processed?;

    info!(
        published = produced.published,
        processed = processed.events_processed,
        "END demo"
    );

    Ok(DemoReport {
        events,
        published: produced.published,
        publish_failed: produced.failed,
        stats: StatsSection::from(processed),
        alerts_by_rule,
        window,
    })
}

/// Result of a `demo` run.
#[derive(Debug, Serialize)]
pub struct DemoReport {
    pub events: u64,
    pub published: u64,
    pub publish_failed: u64,
    pub stats: StatsSection,
    pub alerts_by_rule: BTreeMap<String, u64>,
    /// Final window contents, oldest first.
    pub window: Vec<String>,
}

impl Render for DemoReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "Demo finished ({} events requested)", self.events)?;
        writeln!(
            w,
            "  Published:        {} ({} failed)",
            self.published, self.publish_failed
        )?;
        self.stats.write_text(w)?;
        if !self.alerts_by_rule.is_empty() {
            writeln!(w, "  Alerts by rule:")?;
            for (rule, count) in &self.alerts_by_rule {
                writeln!(w, "    {rule}: {count}")?;
            }
        }
        write_window(w, &self.window)
    }
}
