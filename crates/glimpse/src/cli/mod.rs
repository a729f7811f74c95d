//! Subcommand implementations.

pub mod config;
pub mod interactive;
pub mod search;
pub mod setup;
pub mod similar;
pub mod stats;
pub mod types;
