//! Kennel breeding calendar CLI library.
//!
//! This crate provides the CLI interface over `kennel-core`.

mod cli;
pub mod commands;
mod config;
pub mod snapshot;

pub use cli::{Cli, Commands};
pub use config::Config;
