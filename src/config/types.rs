//! Core configuration types and loading.

use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use super::defaults::{
    default_event, default_nick, default_port, default_publish_channel, default_scheme,
};
use super::validation::{ValidationError, validate};

/// Default Pusher API host, used when neither `host` nor `cluster` is set.
pub const DEFAULT_PUSHER_HOST: &str = "api.pusherapp.com";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Bridge configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// IRC connection target and identity.
    #[serde(default)]
    pub irc: IrcConfig,
    /// Pusher credentials and event routing.
    #[serde(default)]
    pub pusher: PusherConfig,
    /// Optional I/O deadlines. All default to none.
    #[serde(default)]
    pub timeouts: TimeoutsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Check every required value, collecting all problems at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate(self).map_err(ConfigError::Invalid)
    }
}

/// IRC server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct IrcConfig {
    /// Server hostname or IP.
    #[serde(default)]
    pub server: String,
    /// Server port (default: 6667).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Nickname, also used as username and realname (default: "ircpush").
    #[serde(default = "default_nick")]
    pub nick: String,
    /// Channels to join, in order. A missing `#` is added on join.
    #[serde(default)]
    pub channels: Vec<String>,
}

impl Default for IrcConfig {
    fn default() -> Self {
        Self {
            server: String::new(),
            port: default_port(),
            nick: default_nick(),
            channels: Vec::new(),
        }
    }
}

impl IrcConfig {
    /// `host:port` string used for connecting and logging.
    pub fn target(&self) -> String {
        format!("{}:{}", self.server, self.port)
    }
}

/// Pusher credentials and event routing.
#[derive(Clone, Deserialize)]
pub struct PusherConfig {
    /// Application id (`PUSHER_ID`).
    #[serde(default)]
    pub app_id: String,
    /// Application key (`PUSHER_KEY`).
    #[serde(default)]
    pub key: String,
    /// Application secret (`PUSHER_SECRET`). Never logged.
    #[serde(default)]
    pub secret: String,
    /// Pusher channel events go to (default: "irc").
    #[serde(default = "default_publish_channel")]
    pub channel: String,
    /// Event name (default: "message").
    #[serde(default = "default_event")]
    pub event: String,
    /// Explicit API host. Wins over `cluster`.
    #[serde(default)]
    pub host: Option<String>,
    /// Cluster name, e.g. "eu" for `api-eu.pusher.com`.
    #[serde(default)]
    pub cluster: Option<String>,
    /// "https" or "http" (default: "https").
    #[serde(default = "default_scheme")]
    pub scheme: String,
}

impl Default for PusherConfig {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            key: String::new(),
            secret: String::new(),
            channel: default_publish_channel(),
            event: default_event(),
            host: None,
            cluster: None,
            scheme: default_scheme(),
        }
    }
}

impl PusherConfig {
    /// API host after applying `host`/`cluster` precedence.
    pub fn api_host(&self) -> String {
        match (&self.host, &self.cluster) {
            (Some(host), _) => host.clone(),
            (None, Some(cluster)) => format!("api-{cluster}.pusher.com"),
            (None, None) => DEFAULT_PUSHER_HOST.to_string(),
        }
    }

    /// Scheme and host, without a trailing slash.
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme, self.api_host())
    }
}

impl fmt::Debug for PusherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PusherConfig")
            .field("app_id", &self.app_id)
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .field("channel", &self.channel)
            .field("event", &self.event)
            .field("host", &self.host)
            .field("cluster", &self.cluster)
            .field("scheme", &self.scheme)
            .finish()
    }
}

/// I/O deadlines in seconds.
///
/// Unset means wait indefinitely. A read timeout ends the session like any
/// other read failure, so leave it unset unless the server pings regularly.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct TimeoutsConfig {
    /// Seconds allowed for the TCP connect.
    pub connect: Option<u64>,
    /// Seconds allowed between inbound lines.
    pub read: Option<u64>,
    /// Seconds allowed for one outbound line to be written and flushed.
    pub write: Option<u64>,
    /// Seconds allowed for one publish request.
    pub publish: Option<u64>,
}

impl TimeoutsConfig {
    pub fn connect(&self) -> Option<Duration> {
        self.connect.map(Duration::from_secs)
    }

    pub fn read(&self) -> Option<Duration> {
        self.read.map(Duration::from_secs)
    }

    pub fn write(&self) -> Option<Duration> {
        self.write.map(Duration::from_secs)
    }

    pub fn publish(&self) -> Option<Duration> {
        self.publish.map(Duration::from_secs)
    }
}
