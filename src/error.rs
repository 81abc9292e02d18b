//! Unified error handling for ircpush.
//!
//! One enum per layer: connecting, the live session, and publishing.
//! Configuration errors live with the configuration in [`crate::config`].

use ircpush_proto::ProtocolError;
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Connection Errors (session bootstrap)
// ============================================================================

/// Failure to open the stream to the IRC server. Always fatal.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("unable to connect to {target}: {source}")]
    Connect {
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("timed out connecting to {target} after {after:?}")]
    Timeout { target: String, after: Duration },
}

// ============================================================================
// Session Errors (live connection)
// ============================================================================

/// Errors raised by an established session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("read error: {0}")]
    Read(#[source] ProtocolError),

    #[error("write error: {0}")]
    Write(#[source] ProtocolError),

    #[error("no line received within {0:?}")]
    ReadTimeout(Duration),

    #[error("write did not complete within {0:?}")]
    WriteTimeout(Duration),

    #[error("connection closed")]
    Closed,
}

impl SessionError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Read(_) => "read_error",
            Self::Write(_) => "write_error",
            Self::ReadTimeout(_) => "read_timeout",
            Self::WriteTimeout(_) => "write_timeout",
            Self::Closed => "closed",
        }
    }
}

// ============================================================================
// Publish Errors (outbound events)
// ============================================================================

/// Errors from the publish collaborator.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("publish rejected with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}
