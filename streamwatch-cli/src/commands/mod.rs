//! Command handlers -- one module per subcommand

pub mod config;
pub mod consume;
pub mod demo;
pub mod produce;
