//! Configuration validation.
//!
//! Runs before any network activity so a misconfigured bridge never
//! connects.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("IRC server hostname or ip is not set (--server / IRC_SERVER)")]
    MissingServer,
    #[error("IRC channels are not set (--channels / IRC_CHANNELS)")]
    MissingChannels,
    #[error("IRC nickname is empty")]
    EmptyNick,
    #[error("IRC port must be non-zero")]
    InvalidPort,
    #[error("PUSHER_ID is not set")]
    MissingPusherId,
    #[error("PUSHER_KEY is not set")]
    MissingPusherKey,
    #[error("PUSHER_SECRET is not set")]
    MissingPusherSecret,
    #[error("pusher.scheme must be http or https, got '{0}'")]
    InvalidScheme(String),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let irc = &config.irc;
    if irc.server.trim().is_empty() {
        errors.push(ValidationError::MissingServer);
    }
    if irc.channels.iter().all(|c| c.trim().is_empty()) {
        errors.push(ValidationError::MissingChannels);
    }
    if irc.nick.trim().is_empty() {
        errors.push(ValidationError::EmptyNick);
    }
    if irc.port == 0 {
        errors.push(ValidationError::InvalidPort);
    }

    let pusher = &config.pusher;
    if pusher.app_id.trim().is_empty() {
        errors.push(ValidationError::MissingPusherId);
    }
    if pusher.key.trim().is_empty() {
        errors.push(ValidationError::MissingPusherKey);
    }
    if pusher.secret.trim().is_empty() {
        errors.push(ValidationError::MissingPusherSecret);
    }
    if pusher.scheme != "https" && pusher.scheme != "http" {
        errors.push(ValidationError::InvalidScheme(pusher.scheme.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
