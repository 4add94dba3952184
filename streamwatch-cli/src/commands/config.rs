//! `streamwatch config` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use streamwatch_core::StreamwatchConfig;

use crate::cli::ConfigAction;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Section names accepted by `config show --section`.
pub const SECTIONS: [&str; 5] = ["general", "broker", "consumer", "producer", "metrics"];

/// Execute the `config` command.
pub async fn execute(
    action: &ConfigAction,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    match action {
        ConfigAction::Validate => execute_validate(config_path, writer).await,
        ConfigAction::Show { section } => {
            execute_show(config_path, section.as_deref(), writer).await
        }
    }
}

/// Loads the file (or defaults), applies environment overrides and validates.
///
/// # Errors
///
/// Returns `CliError::Config` after printing the report if anything is wrong.
async fn execute_validate(config_path: &Path, writer: &OutputWriter) -> Result<(), CliError> {
    info!(path = %config_path.display(), "validating configuration");

    let report = validation_report(config_path).await;
    writer.render(&report)?;

    if !report.valid {
        return Err(CliError::Config("configuration is invalid".to_owned()));
    }
    Ok(())
}

/// Builds the validation report without rendering it.
pub async fn validation_report(config_path: &Path) -> ConfigValidationReport {
    let errors = match StreamwatchConfig::load_or_default(config_path).await {
        Ok(_) => Vec::new(),
        Err(e) => vec![e.to_string()],
    };
    ConfigValidationReport {
        source: config_path.display().to_string(),
        valid: errors.is_empty(),
        errors,
    }
}

/// Shows the effective configuration (file + env overrides + defaults).
///
/// # Errors
///
/// Loading fails, or the section name is unknown.
async fn execute_show(
    config_path: &Path,
    section: Option<&str>,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    info!(path = %config_path.display(), "loading configuration");

    let config = StreamwatchConfig::load_or_default(config_path).await?;
    let report = show_report(&config, config_path, section)?;
    writer.render(&report)?;
    Ok(())
}

/// Serializes `config`, or one section of it, for display.
pub fn show_report(
    config: &StreamwatchConfig,
    config_path: &Path,
    section: Option<&str>,
) -> Result<ConfigReport, CliError> {
    let config_toml = match section {
        None => toml::to_string_pretty(config),
        Some("general") => toml::to_string_pretty(&config.general),
        Some("broker") => toml::to_string_pretty(&config.broker),
        Some("consumer") => toml::to_string_pretty(&config.consumer),
        Some("producer") => toml::to_string_pretty(&config.producer),
        Some("metrics") => toml::to_string_pretty(&config.metrics),
        Some(other) => {
            return Err(CliError::Command(format!(
                "unknown section: {other} (expected: {})",
                SECTIONS.join(", ")
            )));
        }
    }
    .map_err(|e| CliError::Command(format!("failed to serialize configuration: {e}")))?;

    Ok(ConfigReport {
        source: config_path.display().to_string(),
        section: section.map(str::to_owned),
        config_toml,
    })
}

/// Configuration display report.
///
/// `config_toml` is only used for text rendering.
#[derive(Debug, Serialize)]
pub struct ConfigReport {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip)]
    pub config_toml: String,
}

impl Render for ConfigReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        match &self.section {
            Some(section) => writeln!(
                w,
                "Configuration [{section}] (source: {})",
                self.source
            )?,
            None => writeln!(w, "Configuration (source: {})", self.source)?,
        }
        writeln!(w)?;
        write!(w, "{}", self.config_toml)
    }
}

/// Configuration validation report.
#[derive(Debug, Serialize)]
pub struct ConfigValidationReport {
    pub source: String,
    pub valid: bool,
    /// Empty when valid.
    pub errors: Vec<String>,
}

impl Render for ConfigValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "Config Validation: {}", self.source)?;
        if self.valid {
            writeln!(w, "  Result: VALID")?;
        } else {
            writeln!(w, "  Result: INVALID")?;
            for err in &self.errors {
                writeln!(w, "  Error: {err}")?;
            }
        }
        Ok(())
    }
}
