//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Config structs (Config, IrcConfig, PusherConfig, TimeoutsConfig) and file loading
//! - [`cli`]: Command-line and environment overrides
//! - [`validation`]: Startup checks for required values
//! - [`defaults`]: Serde default functions

mod cli;
mod defaults;
mod types;
mod validation;

pub use cli::Cli;
pub use types::{
    Config, ConfigError, DEFAULT_PUSHER_HOST, IrcConfig, PusherConfig, TimeoutsConfig,
};
pub use validation::{ValidationError, validate};
