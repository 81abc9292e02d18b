//! Event publishing.
//!
//! The bridge hands each finished payload to a [`Publisher`] together with an
//! event name and a destination channel. Delivery, authentication and retry
//! belong to the implementation; [`PusherClient`] is the production one.

mod pusher;

pub use pusher::{PusherClient, signed_query};

use async_trait::async_trait;

use crate::config::PusherConfig;
use crate::error::PublishError;

/// Destination for forwarded messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishTarget {
    /// Event name (default "message").
    pub event: String,
    /// Pub/sub channel (default "irc").
    pub channel: String,
}

impl Default for PublishTarget {
    fn default() -> Self {
        Self {
            event: "message".to_string(),
            channel: "irc".to_string(),
        }
    }
}

impl From<&PusherConfig> for PublishTarget {
    fn from(config: &PusherConfig) -> Self {
        Self {
            event: config.event.clone(),
            channel: config.channel.clone(),
        }
    }
}

/// Something that accepts `(payload, event, channel)` and delivers it.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, payload: &str, event: &str, channel: &str)
    -> Result<(), PublishError>;
}

#[async_trait]
impl<P: Publisher + ?Sized> Publisher for std::sync::Arc<P> {
    async fn publish(
        &self,
        payload: &str,
        event: &str,
        channel: &str,
    ) -> Result<(), PublishError> {
        (**self).publish(payload, event, channel).await
    }
}
