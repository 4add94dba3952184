//! streamwatch command-line interface.
//!
//! The binary in `main.rs` only parses arguments and calls [`app::run`]; the
//! modules are exposed so integration tests can drive commands directly.

pub mod app;
pub mod backend;
pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod metrics_server;
pub mod output;
pub mod signal;
