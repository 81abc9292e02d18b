//! Fake IRC server side of a bridge session.

use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// Loopback listener the bridge connects to.
pub struct TestListener {
    listener: TcpListener,
}

impl TestListener {
    pub async fn bind() -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        Ok(Self { listener })
    }

    pub fn port(&self) -> u16 {
        self.listener
            .local_addr()
            .map(|addr| addr.port())
            .unwrap_or_default()
    }

    /// Accept the bridge's connection.
    pub async fn accept(&self) -> anyhow::Result<TestPeer> {
        let (stream, _) = timeout(RECV_TIMEOUT, self.listener.accept()).await??;
        Ok(TestPeer::new(stream))
    }
}

/// One accepted connection, seen from the server.
pub struct TestPeer {
    reader: BufReader<OwnedReadHalf>,
    writer: Option<OwnedWriteHalf>,
}

impl TestPeer {
    fn new(stream: TcpStream) -> Self {
        let (read_half, write_half) = stream.into_split();
        Self {
            reader: BufReader::new(read_half),
            writer: Some(write_half),
        }
    }

    /// Send one line, adding CRLF the way IRC servers do.
    pub async fn send(&mut self, line: &str) -> anyhow::Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| anyhow::anyhow!("peer write side already closed"))?;
        writer.write_all(format!("{line}\r\n").as_bytes()).await?;
        Ok(())
    }

    /// Receive one line from the bridge, without its terminator.
    ///
    /// `None` means the bridge closed the connection.
    pub async fn recv(&mut self) -> anyhow::Result<Option<String>> {
        let mut line = String::new();
        let read = timeout(RECV_TIMEOUT, self.reader.read_line(&mut line)).await??;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Receive `count` lines, failing on early close.
    pub async fn recv_lines(&mut self, count: usize) -> anyhow::Result<Vec<String>> {
        let mut lines = Vec::with_capacity(count);
        for _ in 0..count {
            match self.recv().await? {
                Some(line) => lines.push(line),
                None => anyhow::bail!("connection closed after {} lines", lines.len()),
            }
        }
        Ok(lines)
    }

    /// Hang up, so the bridge sees end of stream.
    pub fn hang_up(&mut self) {
        self.writer.take();
    }
}
