//! CLI argument parsing using clap derive API
//!
//! Purely declarative apart from [`Cli::apply_overrides`], which copies flag
//! values onto a loaded configuration.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use streamwatch_core::StreamwatchConfig;

/// streamwatch -- status event producer and stream processor.
///
/// Use `streamwatch <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "streamwatch", version, about, long_about = None)]
pub struct Cli {
    /// Path to the streamwatch.toml configuration file (defaults apply if missing).
    #[arg(short, long, global = true, default_value = "streamwatch.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Override log format.
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,

    /// Output format for command results.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

/// Supported log formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// JSON lines.
    Json,
    /// Human-readable multi-line output.
    Pretty,
}

impl LogFormat {
    /// Value stored in `[general] log_format`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Publish generated status events until interrupted.
    Produce(ProduceArgs),

    /// Run the stream processor until interrupted.
    Consume(ConsumeArgs),

    /// Run producer and processor in one process over the in-memory broker.
    Demo(DemoArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- produce ----

/// Publish generated status events.
#[derive(Args, Debug, Default)]
pub struct ProduceArgs {
    /// Topic to publish to.
    #[arg(long)]
    pub topic: Option<String>,

    /// Seconds between events (0 publishes back to back).
    #[arg(long)]
    pub interval_secs: Option<u64>,

    /// Stop after this many events.
    #[arg(long)]
    pub max_events: Option<u64>,
}

// ---- consume ----

/// Run the stream processor.
#[derive(Args, Debug, Default)]
pub struct ConsumeArgs {
    /// Topic to subscribe to.
    #[arg(long)]
    pub topic: Option<String>,

    /// Rolling window size (at least 1).
    #[arg(long)]
    pub window_size: Option<usize>,

    /// Consumer group id.
    #[arg(long)]
    pub group_id: Option<String>,
}

// ---- demo ----

/// Run both sides in one process.
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Number of events to produce and process.
    #[arg(long, default_value_t = 10)]
    pub events: u64,

    /// Rolling window size (at least 1).
    #[arg(long)]
    pub window_size: Option<usize>,

    /// Seconds between events.
    #[arg(long, default_value_t = 0)]
    pub interval_secs: u64,
}

// ---- config ----

/// Manage streamwatch configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the effective configuration and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, broker, consumer, producer, metrics).
        #[arg(long)]
        section: Option<String>,
    },
}

impl Cli {
    /// Copies global and subcommand flag values onto `config`.
    ///
    /// Runs after file and environment overrides, so flags take precedence.
    pub fn apply_overrides(&self, config: &mut StreamwatchConfig) {
        if let Some(level) = &self.log_level {
            config.general.log_level = level.clone();
        }
        if let Some(format) = self.log_format {
            config.general.log_format = format.as_str().to_owned();
        }

        match &self.command {
            Commands::Produce(args) => {
                if let Some(topic) = &args.topic {
                    config.broker.topic = topic.clone();
                }
                if let Some(secs) = args.interval_secs {
                    config.producer.interval_secs = secs;
                }
                if args.max_events.is_some() {
                    config.producer.max_events = args.max_events;
                }
            }
            Commands::Consume(args) => {
                if let Some(topic) = &args.topic {
                    config.broker.topic = topic.clone();
                }
                if let Some(size) = args.window_size {
                    config.consumer.window_size = size;
                }
                if let Some(group) = &args.group_id {
                    config.consumer.group_id = group.clone();
                }
            }
            Commands::Demo(args) => {
                config.broker.backend = "memory".to_owned();
                config.producer.interval_secs = args.interval_secs;
                config.producer.max_events = Some(args.events);
                if let Some(size) = args.window_size {
                    config.consumer.window_size = size;
                }
            }
            Commands::Config(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("arguments should parse")
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn produce_defaults() {
        let cli = parse(&["streamwatch", "produce"]);
        assert_eq!(cli.config, PathBuf::from("streamwatch.toml"));
        assert_eq!(cli.output, OutputFormat::Text);
        match cli.command {
            Commands::Produce(args) => {
                assert!(args.interval_secs.is_none());
                assert!(args.max_events.is_none());
            }
            other => panic!("expected produce, got {other:?}"),
        }
    }

    #[test]
    fn consume_flags_parse() {
        let cli = parse(&[
            "streamwatch",
            "consume",
            "--window-size",
            "3",
            "--group-id",
            "g1",
        ]);
        match cli.command {
            Commands::Consume(args) => {
                assert_eq!(args.window_size, Some(3));
                assert_eq!(args.group_id.as_deref(), Some("g1"));
            }
            other => panic!("expected consume, got {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&[
            "streamwatch",
            "demo",
            "--log-level",
            "debug",
            "--log-format",
            "json",
            "--config",
            "/tmp/x.toml",
        ]);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(cli.log_format, Some(LogFormat::Json));
        assert_eq!(cli.config, PathBuf::from("/tmp/x.toml"));
    }

    #[test]
    fn config_show_section() {
        let cli = parse(&["streamwatch", "config", "show", "--section", "broker"]);
        match cli.command {
            Commands::Config(ConfigArgs {
                action: ConfigAction::Show { section },
            }) => assert_eq!(section.as_deref(), Some("broker")),
            other => panic!("expected config show, got {other:?}"),
        }
    }

    #[test]
    fn negative_window_size_rejected() {
        assert!(Cli::try_parse_from(["streamwatch", "consume", "--window-size", "-1"]).is_err());
    }

    #[test]
    fn missing_subcommand_rejected() {
        assert!(Cli::try_parse_from(["streamwatch"]).is_err());
    }

    #[test]
    fn produce_overrides_apply() {
        let cli = parse(&[
            "streamwatch",
            "produce",
            "--interval-secs",
            "0",
            "--max-events",
            "7",
            "--topic",
            "events",
        ]);
        let mut config = StreamwatchConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.producer.interval_secs, 0);
        assert_eq!(config.producer.max_events, Some(7));
        assert_eq!(config.broker.topic, "events");
    }

    #[test]
    fn consume_overrides_apply() {
        let cli = parse(&["streamwatch", "consume", "--window-size", "2"]);
        let mut config = StreamwatchConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.consumer.window_size, 2);
        assert_eq!(config.consumer.group_id, "default_group");
    }

    #[test]
    fn demo_forces_memory_backend() {
        let cli = parse(&["streamwatch", "demo", "--events", "3"]);
        let mut config = StreamwatchConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.broker.backend, "memory");
        assert_eq!(config.producer.max_events, Some(3));
        assert_eq!(config.producer.interval_secs, 0);
    }

    #[test]
    fn log_overrides_apply() {
        let cli = parse(&[
            "streamwatch",
            "--log-level",
            "warn",
            "--log-format",
            "pretty",
            "config",
            "validate",
        ]);
        let mut config = StreamwatchConfig::default();
        config.general.log_format = "json".to_owned();
        cli.apply_overrides(&mut config);
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.general.log_format, "pretty");
    }
}
