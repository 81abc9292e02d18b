//! ircpush - forwards IRC channel messages to a Pusher channel.
//!
//! One session per process: connect, register, then read lines until the
//! server goes away or the process is interrupted. `PRIVMSG` lines become
//! `{nick, channel, message}` events; `PING` lines are answered.

pub mod bridge;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod publish;
pub mod session;
pub mod shutdown;
pub mod telemetry;
