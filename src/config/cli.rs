//! Command-line and environment overrides.
//!
//! Precedence, lowest first: built-in defaults, the TOML file given with
//! `--config`, environment variables, command-line flags.

use clap::Parser;
use std::path::PathBuf;

use super::types::{Config, ConfigError};
use crate::telemetry::LogFormat;

/// Forward IRC channel messages to a Pusher channel.
#[derive(Debug, Parser)]
#[command(name = "ircpush", version, about)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// IRC server hostname or IP.
    #[arg(short = 's', long, env = "IRC_SERVER")]
    pub server: Option<String>,

    /// IRC server port.
    #[arg(short = 'p', long, env = "IRC_PORT")]
    pub port: Option<u16>,

    /// Nickname.
    #[arg(short = 'n', long, env = "IRC_NICK")]
    pub nick: Option<String>,

    /// Space-separated channels to join.
    #[arg(short = 'c', long, env = "IRC_CHANNELS")]
    pub channels: Option<String>,

    #[arg(long, env = "PUSHER_ID", hide = true)]
    pub pusher_id: Option<String>,

    #[arg(long, env = "PUSHER_KEY", hide = true)]
    pub pusher_key: Option<String>,

    #[arg(long, env = "PUSHER_SECRET", hide = true, hide_env_values = true)]
    pub pusher_secret: Option<String>,

    /// Pusher channel events are published to.
    #[arg(long, env = "PUSHER_CHANNEL")]
    pub pusher_channel: Option<String>,

    /// Pusher event name.
    #[arg(long, env = "PUSHER_EVENT")]
    pub pusher_event: Option<String>,

    /// Pusher API host (overrides the cluster).
    #[arg(long, env = "PUSHER_HOST")]
    pub pusher_host: Option<String>,

    /// Pusher cluster, e.g. "eu".
    #[arg(long, env = "PUSHER_CLUSTER")]
    pub pusher_cluster: Option<String>,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Keep only values that carry something. Unset and empty mean the same.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Cli {
    /// Build the final configuration and validate it.
    pub fn into_config(self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Overlay every value given on the command line or in the environment.
    pub fn apply(self, config: &mut Config) {
        let irc = &mut config.irc;
        if let Some(server) = present(self.server) {
            irc.server = server;
        }
        if let Some(port) = self.port {
            irc.port = port;
        }
        if let Some(nick) = present(self.nick) {
            irc.nick = nick;
        }
        if let Some(channels) = present(self.channels) {
            irc.channels = channels.split_whitespace().map(str::to_string).collect();
        }

        let pusher = &mut config.pusher;
        if let Some(app_id) = present(self.pusher_id) {
            pusher.app_id = app_id;
        }
        if let Some(key) = present(self.pusher_key) {
            pusher.key = key;
        }
        if let Some(secret) = present(self.pusher_secret) {
            pusher.secret = secret;
        }
        if let Some(channel) = present(self.pusher_channel) {
            pusher.channel = channel;
        }
        if let Some(event) = present(self.pusher_event) {
            pusher.event = event;
        }
        if let Some(host) = present(self.pusher_host) {
            pusher.host = Some(host);
        }
        if let Some(cluster) = present(self.pusher_cluster) {
            pusher.cluster = Some(cluster);
        }
    }
}
