//! Connection session - the duplex line stream to the IRC server.
//!
//! A [`Session`] is split into a [`LineReader`], owned by the dispatch loop,
//! and a [`SessionWriter`], a cloneable handle around the single write half.
//! Every write takes the writer's lock, so the dispatch loop and the
//! interrupt path can both emit lines without interleaving partial writes.

use futures_util::{SinkExt, StreamExt};
use ircpush_proto::{Command, LineCodec, keepalive_argument};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::Mutex;
use tokio::time::timeout;
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{debug, info, instrument, warn};

use crate::config::{IrcConfig, TimeoutsConfig};
use crate::error::{ConnectionError, SessionError};

/// Session over a TCP connection.
pub type TcpSession = Session<OwnedReadHalf, OwnedWriteHalf>;

/// Open a TCP connection to the configured server.
///
/// No registration is sent here; call [`SessionWriter::register`] next.
#[instrument(skip_all, fields(server = %irc.target()))]
pub async fn connect(
    irc: &IrcConfig,
    timeouts: &TimeoutsConfig,
) -> Result<TcpSession, ConnectionError> {
    let target = irc.target();
    let attempt = TcpStream::connect((irc.server.as_str(), irc.port));

    let result = match timeouts.connect() {
        Some(after) => timeout(after, attempt)
            .await
            .map_err(|_| ConnectionError::Timeout {
                target: target.clone(),
                after,
            })?,
        None => attempt.await,
    };
    let stream = result.map_err(|source| ConnectionError::Connect {
        target: target.clone(),
        source,
    })?;

    info!(server = %target, "Successfully connected");

    let (read_half, write_half) = stream.into_split();
    Ok(Session::new(read_half, write_half, timeouts))
}

/// An established connection, not yet split between tasks.
pub struct Session<R, W> {
    reader: LineReader<R>,
    writer: SessionWriter<W>,
}

impl<R, W> Session<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Wrap any read/write pair. Tests pass in-memory duplex halves.
    pub fn new(reader: R, writer: W, timeouts: &TimeoutsConfig) -> Self {
        Self {
            reader: LineReader {
                inner: FramedRead::new(reader, LineCodec::new()),
                timeout: timeouts.read(),
            },
            writer: SessionWriter {
                inner: Arc::new(Mutex::new(Some(FramedWrite::new(writer, LineCodec::new())))),
                timeout: timeouts.write(),
            },
        }
    }

    /// Handle for writing lines. Clones share the same stream.
    pub fn writer(&self) -> SessionWriter<W> {
        self.writer.clone()
    }

    /// Split into the read side and the write handle.
    pub fn into_parts(self) -> (LineReader<R>, SessionWriter<W>) {
        (self.reader, self.writer)
    }
}

/// Read side of a session, yielding lines with their terminator stripped.
pub struct LineReader<R> {
    inner: FramedRead<R, LineCodec>,
    timeout: Option<Duration>,
}

impl<R: AsyncRead + Unpin> LineReader<R> {
    /// Read the next line. EOF is reported as [`SessionError::Closed`].
    pub async fn next_line(&mut self) -> Result<String, SessionError> {
        let next = match self.timeout {
            Some(limit) => timeout(limit, self.inner.next())
                .await
                .map_err(|_| SessionError::ReadTimeout(limit))?,
            None => self.inner.next().await,
        };

        match next {
            Some(Ok(line)) => Ok(line),
            Some(Err(e)) => Err(SessionError::Read(e)),
            None => Err(SessionError::Closed),
        }
    }

    /// Bytes received but not yet terminated by a newline.
    pub fn pending(&self) -> String {
        String::from_utf8_lossy(self.inner.read_buffer()).into_owned()
    }
}

/// Write side of a session.
///
/// The write half sits in an `Option` behind the lock; [`close`](Self::close)
/// takes it out, so the stream is shut down at most once and later sends
/// fail with [`SessionError::Closed`].
pub struct SessionWriter<W> {
    inner: Arc<Mutex<Option<FramedWrite<W, LineCodec>>>>,
    timeout: Option<Duration>,
}

impl<W> Clone for SessionWriter<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            timeout: self.timeout,
        }
    }
}

impl<W: AsyncWrite + Unpin> SessionWriter<W> {
    /// Write one line, returning any failure. The codec adds the `\n`.
    pub async fn try_send(&self, line: impl Into<String>) -> Result<(), SessionError> {
        let mut guard = self.inner.lock().await;
        let sink = guard.as_mut().ok_or(SessionError::Closed)?;
        let line: String = line.into();
        let write = sink.send(line);

        let result = match self.timeout {
            Some(limit) => timeout(limit, write)
                .await
                .map_err(|_| SessionError::WriteTimeout(limit))?,
            None => write.await,
        };
        result.map_err(SessionError::Write)
    }

    /// Best-effort send: the line is logged, failures are logged and dropped.
    pub async fn send(&self, line: impl Into<String>) {
        let line = line.into();
        info!(line = %line.trim_end(), "sending");

        if let Err(e) = self.try_send(line).await {
            warn!(error = %e, code = e.error_code(), "Failed to send line");
        }
    }

    /// Send `USER`, `NICK`, then one `JOIN` per configured channel, in order.
    pub async fn register(&self, irc: &IrcConfig) {
        self.send(Command::USER(irc.nick.clone())).await;
        self.send(Command::NICK(irc.nick.clone())).await;

        for channel in irc.channels.iter().filter(|c| !c.trim().is_empty()) {
            self.send(Command::join(channel.trim())).await;
        }
    }

    /// Answer a keepalive probe, echoing its argument.
    pub async fn respond_to_ping(&self, line: &str) {
        match keepalive_argument(line) {
            Some(token) => self.send(Command::PONG(token.to_string())).await,
            None => debug!(%line, "Keepalive probe without argument, not answering"),
        }
    }

    /// Send `QUIT :`.
    pub async fn quit(&self) {
        self.send(Command::QUIT(None)).await;
    }

    /// Flush and shut down the write half.
    ///
    /// Returns `true` if this call closed the stream, `false` if it was
    /// already closed.
    pub async fn close(&self) -> bool {
        let Some(mut sink) = self.inner.lock().await.take() else {
            return false;
        };
        if let Err(e) = SinkExt::<String>::close(&mut sink).await {
            warn!(error = %e, "Error while closing connection");
        }
        info!("Connection closed");
        true
    }

    /// Whether [`close`](Self::close) has run.
    pub async fn is_closed(&self) -> bool {
        self.inner.lock().await.is_none()
    }
}
