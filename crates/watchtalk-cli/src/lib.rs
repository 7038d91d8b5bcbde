#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Binary-only dependencies (main.rs)
use anyhow as _;
use dotenvy as _;
use tracing_subscriber as _;

#[cfg(test)]
use tokio_test as _;

pub mod adapters;
pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::CliConfig;
pub use commands::{ChannelChoice, Commands, ConfigCommand};
pub use error::CliError;
pub use parser::Cli;
