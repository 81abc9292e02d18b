//! Channel message extraction.
//!
//! The bridge only cares about two kinds of inbound lines: keepalive probes,
//! which must be answered, and message deliveries, which get forwarded.
//! Everything else is ignored. Recognition is by substring containment, and
//! extraction is a positional split around the `PRIVMSG` marker:
//!
//! ```text
//! :alice!~a@host PRIVMSG #general :hello world
//! '-----prefix--'       '------payload-------'
//! ```

#[cfg(feature = "serde")]
use serde::Serialize;

/// Token marking a message delivery line.
pub const PRIVMSG_MARKER: &str = "PRIVMSG";

/// Token marking a keepalive probe.
pub const PING_MARKER: &str = "PING";

/// Coarse classification of an inbound line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Keepalive probe that needs a PONG.
    Keepalive,
    /// Message delivery that should be parsed and forwarded.
    Chat,
    /// Anything else. Dropped.
    Other,
}

/// Classify a raw line. Keepalive takes precedence over chat.
pub fn classify(line: &str) -> LineKind {
    if line.contains(PING_MARKER) {
        LineKind::Keepalive
    } else if line.contains(PRIVMSG_MARKER) {
        LineKind::Chat
    } else {
        LineKind::Other
    }
}

/// Argument of a keepalive probe: the second whitespace-delimited token,
/// with one leading `:` removed.
///
/// ```rust
/// use ircpush_proto::keepalive_argument;
///
/// assert_eq!(keepalive_argument("PING :server123"), Some("server123"));
/// assert_eq!(keepalive_argument("PING"), None);
/// ```
pub fn keepalive_argument(line: &str) -> Option<&str> {
    let token = line.split_whitespace().nth(1)?;
    let token = token.strip_prefix(':').unwrap_or(token);
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// A channel message extracted from a `PRIVMSG` line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ChatMessage {
    nick: String,
    channel: String,
    message: String,
}

impl ChatMessage {
    /// Sender nickname.
    pub fn nick(&self) -> &str {
        &self.nick
    }

    /// Target channel, as it appeared on the wire.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Message text with surrounding whitespace trimmed.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Extract a [`ChatMessage`] from a `PRIVMSG` line.
///
/// Returns `None` when the marker, the `!` after the nickname, or the `:`
/// before the text is missing. Those inputs are unsupported; no attempt is
/// made to recover a better parse. Text that repeats the `"<channel> :"`
/// pattern is only stripped once, at its first occurrence.
pub fn parse(line: &str) -> Option<ChatMessage> {
    let (prefix, payload) = line.split_once(PRIVMSG_MARKER)?;

    let (nick, _) = prefix.split_once('!')?;
    let nick = nick.strip_prefix(':').unwrap_or(nick);

    let (channel, _) = payload.split_once(':')?;
    let channel = channel.trim();

    let message = payload.replacen(&format!("{channel} :"), "", 1);

    Some(ChatMessage {
        nick: nick.to_string(),
        channel: channel.to_string(),
        message: message.trim().to_string(),
    })
}
