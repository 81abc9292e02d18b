//! Dispatch loop - reads lines, answers keepalives, forwards messages.
//!
//! Running until the stream fails; there is no reconnect state. Each line is
//! logged verbatim, then classified:
//!
//! - keepalive probe → `PONG` through the session writer
//! - message delivery → parsed, serialized and handed to the publisher
//! - anything else → dropped

use ircpush_proto::{ChatMessage, LineKind, classify, parse};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, error, info, warn};

use crate::error::SessionError;
use crate::publish::{PublishTarget, Publisher};
use crate::session::{LineReader, SessionWriter};

/// What a single line led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// A keepalive probe was answered.
    Keepalive,
    /// A chat message was handed to the publisher (whether or not delivery succeeded).
    Forwarded,
    /// A message line that could not be parsed or serialized.
    Dropped,
    /// Not a line the bridge acts on.
    Ignored,
}

/// Routes inbound lines to the keepalive responder or the publisher.
pub struct Dispatcher<P> {
    publisher: P,
    target: PublishTarget,
}

impl<P: Publisher> Dispatcher<P> {
    pub fn new(publisher: P, target: PublishTarget) -> Self {
        Self { publisher, target }
    }

    /// Read and handle lines until the stream fails.
    ///
    /// Never returns while the stream is healthy. The returned error is the
    /// one that ended the session.
    pub async fn run<R, W>(
        &self,
        reader: &mut LineReader<R>,
        writer: &SessionWriter<W>,
    ) -> SessionError
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        loop {
            match reader.next_line().await {
                Ok(line) => {
                    self.handle_line(&line, writer).await;
                }
                Err(e) => {
                    error!(line = %reader.pending(), "Error reading line");
                    error!(error = %e, code = e.error_code(), "Read failed, ending session");
                    return e;
                }
            }
        }
    }

    /// Handle one received line.
    pub async fn handle_line<W>(&self, line: &str, writer: &SessionWriter<W>) -> Handled
    where
        W: AsyncWrite + Unpin,
    {
        info!(%line, "received");

        match classify(line) {
            LineKind::Keepalive => {
                writer.respond_to_ping(line).await;
                Handled::Keepalive
            }
            LineKind::Chat => match parse(line) {
                Some(message) => self.forward(&message).await,
                None => {
                    debug!(%line, "Unsupported message line, dropping");
                    Handled::Dropped
                }
            },
            LineKind::Other => Handled::Ignored,
        }
    }

    async fn forward(&self, message: &ChatMessage) -> Handled {
        let payload = match serde_json::to_string(message) {
            Ok(payload) => payload,
            Err(e) => {
                error!(error = %e, "JSON encode error, dropping message");
                return Handled::Dropped;
            }
        };

        if let Err(e) = self
            .publisher
            .publish(&payload, &self.target.event, &self.target.channel)
            .await
        {
            warn!(
                error = %e,
                nick = message.nick(),
                channel = message.channel(),
                "Failed to publish message"
            );
        }
        Handled::Forwarded
    }
}
