//! Bridge - one session, the dispatch loop and the interrupt handler.
//!
//! The dispatch loop and the interrupt future race on the same task. Whichever
//! finishes first decides the outcome:
//!
//! - interrupt: the dispatch loop stops being polled (no further reads),
//!   exactly one `QUIT :` is sent and the stream is closed
//! - read failure or EOF: the stream is closed and the error is reported

use std::future::Future;
use std::process::ExitCode;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{error, info};

use crate::dispatch::Dispatcher;
use crate::error::SessionError;
use crate::publish::Publisher;
use crate::session::Session;
use crate::shutdown::shutdown;

/// How a bridge run ended.
#[derive(Debug)]
pub enum Outcome {
    /// Stopped by the interrupt signal. The only graceful exit.
    Interrupted,
    /// The stream failed or was closed by the server.
    Failed(SessionError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Interrupted)
    }

    /// Process exit status for this outcome.
    pub fn exit_code(&self) -> ExitCode {
        if self.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

/// Run the dispatch loop over `session` until it fails or `interrupt` completes.
///
/// The registration sequence must already have been sent.
pub async fn run<R, W, P, F>(
    session: Session<R, W>,
    dispatcher: &Dispatcher<P>,
    interrupt: F,
) -> Outcome
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
    P: Publisher,
    F: Future<Output = ()>,
{
    let (mut reader, writer) = session.into_parts();

    tokio::select! {
        err = dispatcher.run(&mut reader, &writer) => {
            error!(error = %err, "Session ended");
            writer.close().await;
            Outcome::Failed(err)
        }
        () = interrupt => {
            info!("Received interrupt, exiting normally");
            shutdown(&writer).await;
            Outcome::Interrupted
        }
    }
}
