//! CLI-specific error types and exit code mapping

use streamwatch_broker::BrokerError;
use streamwatch_core::error::{StreamwatchError, TransportError};
use streamwatch_generator::GeneratorError;
use streamwatch_processor::ProcessorError;

/// CLI-specific error type.
///
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (stdout write, signal handler installation, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error.
    #[error("{0}")]
    Core(#[from] StreamwatchError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                                 |
    /// |------|-----------------------------------------|
    /// | 0    | Success / graceful stop                 |
    /// | 1    | General / command error                 |
    /// | 2    | Configuration error                     |
    /// | 3    | Producer or consumer acquisition failed |
    /// | 4    | Topic verify/create failed              |
    /// | 5    | Broker unreachable                      |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Core(StreamwatchError::Config(_)) => 2,
            Self::Core(StreamwatchError::Transport(transport)) => match transport {
                TransportError::Connect { .. } => 3,
                TransportError::TopicSetup { .. } => 4,
                TransportError::Unreachable(_) => 5,
                TransportError::Delivery(_) => 1,
            },
            Self::Core(_) | Self::Command(_) | Self::JsonSerialize(_) | Self::Io(_) => 1,
        }
    }
}

impl From<anyhow::Error> for CliError {
    fn from(e: anyhow::Error) -> Self {
        Self::Command(format!("{e:#}"))
    }
}

impl From<BrokerError> for CliError {
    fn from(e: BrokerError) -> Self {
        Self::Core(e.into())
    }
}

impl From<ProcessorError> for CliError {
    fn from(e: ProcessorError) -> Self {
        Self::Core(e.into())
    }
}

impl From<GeneratorError> for CliError {
    fn from(e: GeneratorError) -> Self {
        Self::Core(e.into())
    }
}
