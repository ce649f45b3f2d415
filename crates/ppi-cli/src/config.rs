//! Layered configuration for the `interface` command.
//!
//! Values resolve in increasing precedence: built-in defaults, the TOML
//! file, `-S KEY=VALUE` overrides, then explicit command-line flags.

mod builder;
mod defaults;
mod file;
mod models;

pub use builder::build_config;
pub use models::{AppConfig, OutputPaths};
