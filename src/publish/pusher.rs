//! Pusher REST API publisher.
//!
//! Triggers one event per forwarded message:
//!
//! ```text
//! POST /apps/{app_id}/events?auth_key=..&auth_timestamp=..&auth_version=1.0&body_md5=..&auth_signature=..
//! {"name":"message","channels":["irc"],"data":"{\"nick\":..}"}
//! ```
//!
//! The signature is HMAC-SHA256, keyed with the app secret, over
//! `"POST\n<path>\n<sorted query without signature>"`.

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use sha2::Sha256;
use std::time::Duration;
use tracing::debug;

use super::Publisher;
use crate::config::PusherConfig;
use crate::error::PublishError;

type HmacSha256 = Hmac<Sha256>;

const AUTH_VERSION: &str = "1.0";

#[derive(Serialize)]
struct TriggerBody<'a> {
    name: &'a str,
    channels: [&'a str; 1],
    data: &'a str,
}

/// Build the authenticated query string for a POST to `path`.
///
/// Parameters are in the sorted order the signature is computed over, with
/// `auth_signature` appended last.
pub fn signed_query(key: &str, secret: &str, path: &str, body: &str, timestamp: i64) -> String {
    let body_md5 = format!("{:x}", Md5::digest(body.as_bytes()));
    let query = format!(
        "auth_key={key}&auth_timestamp={timestamp}&auth_version={AUTH_VERSION}&body_md5={body_md5}"
    );

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(format!("POST\n{path}\n{query}").as_bytes());
    let signature = mac.finalize().into_bytes();

    format!("{query}&auth_signature={signature:x}")
}

/// HTTP client for the Pusher events endpoint.
pub struct PusherClient {
    http: reqwest::Client,
    base_url: String,
    app_id: String,
    key: String,
    secret: String,
}

impl PusherClient {
    /// Create a client. `timeout` bounds each publish request.
    pub fn new(config: &PusherConfig, timeout: Option<Duration>) -> Result<Self, PublishError> {
        let mut builder =
            reqwest::Client::builder().user_agent(concat!("ircpush/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url(),
            app_id: config.app_id.clone(),
            key: config.key.clone(),
            secret: config.secret.clone(),
        })
    }

    fn events_path(&self) -> String {
        format!("/apps/{}/events", self.app_id)
    }
}

#[async_trait]
impl Publisher for PusherClient {
    async fn publish(
        &self,
        payload: &str,
        event: &str,
        channel: &str,
    ) -> Result<(), PublishError> {
        let body = serde_json::to_string(&TriggerBody {
            name: event,
            channels: [channel],
            data: payload,
        })?;

        let path = self.events_path();
        let query = signed_query(
            &self.key,
            &self.secret,
            &path,
            &body,
            chrono::Utc::now().timestamp(),
        );
        let url = format!("{}{}?{}", self.base_url, path, query);

        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| status.to_string());
            return Err(PublishError::Status { status, body });
        }

        debug!(%event, %channel, "Event published");
        Ok(())
    }
}
