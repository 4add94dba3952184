//! Prometheus metrics HTTP server.
//!
//! Uses the built-in HTTP listener from `metrics-exporter-prometheus`.
//! Installed only when `[metrics] enabled = true`.

use std::net::SocketAddr;

use anyhow::Result;
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};
use streamwatch_core::config::MetricsConfig;
use streamwatch_core::metrics as m;

/// Parses `listen_addr:port` into a socket address.
pub fn listen_address(config: &MetricsConfig) -> Result<SocketAddr> {
    format!("{}:{}", config.listen_addr, config.port)
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid metrics listen address: {}", e))
}

/// Install the global metrics recorder and start the HTTP listener.
///
/// Call at most once per process.
///
/// # Errors
///
/// - The listen address does not parse
/// - Socket binding fails
/// - A global recorder is already installed
pub fn install_metrics_recorder(config: &MetricsConfig) -> Result<()> {
    let addr = listen_address(config)?;

    if addr.ip().is_unspecified() {
        tracing::warn!(
            listen_addr = %addr,
            "metrics endpoint is exposed on all interfaces; restrict listen_addr in untrusted networks"
        );
    }

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .set_buckets_for_metric(
            Matcher::Full(m::PROCESSOR_RECORD_DURATION_SECONDS.to_owned()),
            &m::RECORD_DURATION_BUCKETS,
        )
        .map_err(|e| anyhow::anyhow!("invalid histogram buckets: {}", e))?
        .install()
        .map_err(|e| anyhow::anyhow!("failed to install metrics recorder: {}", e))?;

    m::describe_all();

    tracing::info!(listen_addr = %addr, "Prometheus metrics endpoint active");
    Ok(())
}
