//! Integration tests for a full bridge session.
//!
//! Connect, register, answer keepalives, forward messages, then end either
//! by server hang-up or by interrupt.

mod common;

use common::Recorder;
use common::peer::TestListener;
use ircpush::bridge::{self, Outcome};
use ircpush::config::{IrcConfig, TimeoutsConfig};
use ircpush::dispatch::Dispatcher;
use ircpush::error::SessionError;
use ircpush::publish::PublishTarget;
use ircpush::session;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

fn irc_config(port: u16) -> IrcConfig {
    IrcConfig {
        server: "127.0.0.1".to_string(),
        port,
        nick: "relay".to_string(),
        channels: vec!["general".to_string(), "#rust".to_string()],
    }
}

/// Connect and register, then run the bridge on its own task.
async fn start_bridge(
    irc: IrcConfig,
    recorder: Arc<Recorder>,
    stop: oneshot::Receiver<()>,
) -> JoinHandle<Outcome> {
    tokio::spawn(async move {
        let session = session::connect(&irc, &TimeoutsConfig::default())
            .await
            .expect("connect");
        session.writer().register(&irc).await;

        let dispatcher = Dispatcher::new(recorder, PublishTarget::default());
        bridge::run(session, &dispatcher, async {
            let _ = stop.await;
        })
        .await
    })
}

#[tokio::test]
async fn test_registration_order() {
    let listener = TestListener::bind().await.unwrap();
    let recorder = Arc::new(Recorder::default());
    let (stop_tx, stop_rx) = oneshot::channel();

    let handle = start_bridge(irc_config(listener.port()), recorder, stop_rx).await;
    let mut peer = listener.accept().await.unwrap();

    let lines = peer.recv_lines(4).await.unwrap();
    assert_eq!(
        lines,
        vec![
            "USER relay 8 * :relay",
            "NICK relay",
            "JOIN #general",
            "JOIN #rust",
        ]
    );

    stop_tx.send(()).unwrap();
    assert!(handle.await.unwrap().is_success());
}

#[tokio::test]
async fn test_ping_is_answered() {
    let listener = TestListener::bind().await.unwrap();
    let recorder = Arc::new(Recorder::default());
    let (stop_tx, stop_rx) = oneshot::channel();

    let handle = start_bridge(irc_config(listener.port()), Arc::clone(&recorder), stop_rx).await;
    let mut peer = listener.accept().await.unwrap();
    peer.recv_lines(4).await.unwrap();

    peer.send("PING :irc.example.net").await.unwrap();
    assert_eq!(
        peer.recv().await.unwrap().as_deref(),
        Some("PONG irc.example.net")
    );

    stop_tx.send(()).unwrap();
    handle.await.unwrap();
    assert!(recorder.calls().is_empty());
}

#[tokio::test]
async fn test_messages_published_until_hang_up() {
    let listener = TestListener::bind().await.unwrap();
    let recorder = Arc::new(Recorder::default());
    let (_stop_tx, stop_rx) = oneshot::channel();

    let handle = start_bridge(irc_config(listener.port()), Arc::clone(&recorder), stop_rx).await;
    let mut peer = listener.accept().await.unwrap();
    peer.recv_lines(4).await.unwrap();

    peer.send(":irc.example.net 001 relay :Welcome").await.unwrap();
    peer.send(":alice!~a@host PRIVMSG #general :hello")
        .await
        .unwrap();
    peer.send(":bob!~b@host PRIVMSG #rust :hi: there")
        .await
        .unwrap();
    peer.send(":carol!~c@host JOIN #general").await.unwrap();
    peer.send(":dave!~d@host PRIVMSG #general :  spaced  ")
        .await
        .unwrap();
    peer.hang_up();

    let outcome = handle.await.unwrap();
    assert!(matches!(outcome, Outcome::Failed(SessionError::Closed)));
    assert!(!outcome.is_success());

    let calls = recorder.calls();
    let payloads: Vec<&str> = calls.iter().map(|c| c.payload.as_str()).collect();
    assert_eq!(
        payloads,
        vec![
            r##"{"nick":"alice","channel":"#general","message":"hello"}"##,
            r##"{"nick":"bob","channel":"#rust","message":"hi: there"}"##,
            r##"{"nick":"dave","channel":"#general","message":"spaced"}"##,
        ]
    );
    assert!(
        calls
            .iter()
            .all(|c| c.event == "message" && c.channel == "irc")
    );

    // The bridge closed its side too.
    assert_eq!(peer.recv().await.unwrap(), None);
}

#[tokio::test]
async fn test_interrupt_sends_single_quit() {
    let listener = TestListener::bind().await.unwrap();
    let recorder = Arc::new(Recorder::default());
    let (stop_tx, stop_rx) = oneshot::channel();

    let handle = start_bridge(irc_config(listener.port()), Arc::clone(&recorder), stop_rx).await;
    let mut peer = listener.accept().await.unwrap();
    peer.recv_lines(4).await.unwrap();

    peer.send(":alice!~a@host PRIVMSG #general :before")
        .await
        .unwrap();
    recorder.wait_for(1).await;

    stop_tx.send(()).unwrap();
    let outcome = handle.await.unwrap();
    assert!(matches!(outcome, Outcome::Interrupted));

    assert_eq!(peer.recv().await.unwrap().as_deref(), Some("QUIT :"));
    assert_eq!(peer.recv().await.unwrap(), None);
    assert_eq!(recorder.calls().len(), 1);
}
