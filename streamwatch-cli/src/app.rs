//! Startup sequence shared by every subcommand.
//!
//! Order: `.env` file, configuration file, environment overrides, CLI flags,
//! validation, logging, metrics, signal handling, command dispatch.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use streamwatch_core::StreamwatchConfig;
use streamwatch_core::config::GeneralConfig;

use crate::backend::AnyBroker;
use crate::cli::{Cli, Commands};
use crate::commands;
use crate::error::CliError;
use crate::logging::init_tracing;
use crate::metrics_server::install_metrics_recorder;
use crate::output::OutputWriter;
use crate::signal::spawn_signal_handler;

/// Loads the effective configuration for `cli`.
///
/// A missing file falls back to defaults. Environment overrides apply before
/// CLI flags, and the result is validated once more after the flags.
pub async fn load_config(cli: &Cli) -> Result<StreamwatchConfig, CliError> {
    let mut config = StreamwatchConfig::load_or_default(&cli.config).await?;
    cli.apply_overrides(&mut config);
    config.validate()?;
    Ok(config)
}

/// Runs the parsed command line to completion.
///
/// # Errors
///
/// Every failure is a [`CliError`]; `main` turns it into the exit code.
pub async fn run(cli: Cli) -> Result<(), CliError> {
    let dotenv = dotenv::dotenv();
    let writer = OutputWriter::new(cli.output);

    if let Commands::Config(args) = &cli.command {
        init_tracing(&fallback_logging(&cli))?;
        return commands::config::execute(&args.action, &cli.config, &writer).await;
    }

    let config = match load_config(&cli).await {
        Ok(config) => config,
        Err(e) => {
            // Logging is not configured yet.
            init_fallback_tracing(&cli);
            return Err(e);
        }
    };

    init_tracing(&config.general)?;
    match dotenv {
        Ok(path) => debug!(path = %path.display(), "loaded .env file"),
        Err(e) => debug!(reason = %e, "no .env file loaded"),
    }
    info!(
        config = %cli.config.display(),
        backend = %config.broker.backend,
        topic = %config.broker.topic,
        "streamwatch starting"
    );

    if config.metrics.enabled {
        install_metrics_recorder(&config.metrics)?;
    }

    let cancel = CancellationToken::new();
    let signals = spawn_signal_handler(cancel.clone());

    let result = match cli.command {
        Commands::Produce(_) => {
            let broker = AnyBroker::from_config(&config)?;
            warn_if_process_local(&broker);
            commands::produce::execute(&config, &broker, cancel.clone(), &writer).await
        }
        Commands::Consume(_) => {
            let broker = AnyBroker::from_config(&config)?;
            warn_if_process_local(&broker);
            commands::consume::execute(&config, &broker, cancel.clone(), &writer).await
        }
        Commands::Demo(_) => commands::demo::execute(&config, cancel.clone(), &writer).await,
        Commands::Config(_) => Ok(()),
    };

    cancel.cancel();
    if let Err(e) = signals.await {
        warn!(error = %e, "signal handler task failed");
    }
    info!("streamwatch stopped");
    result
}

/// Installs fallback logging, reporting a failure on stderr.
///
/// Returns whether the subscriber was installed.
fn init_fallback_tracing(cli: &Cli) -> bool {
    match init_tracing(&fallback_logging(cli)) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("warning: failed to initialize logging: {e:#}");
            false
        }
    }
}

/// Logging settings when the configuration could not be loaded.
fn fallback_logging(cli: &Cli) -> GeneralConfig {
    let mut general = GeneralConfig::default();
    if let Some(level) = &cli.log_level {
        general.log_level = level.clone();
    }
    if let Some(format) = cli.log_format {
        general.log_format = format.as_str().to_owned();
    }
    general
}

fn warn_if_process_local(broker: &AnyBroker) {
    if matches!(broker, AnyBroker::Memory(_)) {
        warn!("memory backend selected; records are not shared with other processes");
    }
}
