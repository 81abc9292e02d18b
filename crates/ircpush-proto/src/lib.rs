//! # ircpush-proto
//!
//! The line-level IRC pieces used by the ircpush bridge: recognizing and
//! parsing channel messages, building the handful of commands a bridge
//! client sends, and framing newline-terminated lines for tokio.
//!
//! ```rust
//! use ircpush_proto::{classify, parse, LineKind};
//!
//! let line = ":alice!~a@host PRIVMSG #general :hello world";
//! assert_eq!(classify(line), LineKind::Chat);
//!
//! let msg = parse(line).expect("well-formed PRIVMSG");
//! assert_eq!(msg.nick(), "alice");
//! assert_eq!(msg.channel(), "#general");
//! assert_eq!(msg.message(), "hello world");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod chan;
pub mod chat;
pub mod command;
pub mod error;
#[cfg(feature = "tokio")]
pub mod line;

pub use self::chan::with_channel_prefix;
pub use self::chat::{classify, keepalive_argument, parse, ChatMessage, LineKind};
pub use self::command::Command;
pub use self::error::ProtocolError;
#[cfg(feature = "tokio")]
pub use self::line::LineCodec;
