//! Outbound commands.
//!
//! A bridge client only ever sends a handful of commands. Their `Display`
//! output is the wire form without the line terminator; the line codec adds
//! that.

use std::fmt;

use crate::chan::with_channel_prefix;

/// Commands the bridge writes to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `USER <nick> 8 * :<nick>` (the realname mirrors the nickname).
    USER(String),
    /// `NICK <nick>`
    NICK(String),
    /// `JOIN <channel>`. The channel is normalized on construction.
    JOIN(String),
    /// `PONG <token>`
    PONG(String),
    /// `QUIT :<reason>`, with an empty reason when `None`.
    QUIT(Option<String>),
}

impl Command {
    /// Build a JOIN for a configured channel name, adding the `#` prefix if missing.
    pub fn join(channel: &str) -> Self {
        Command::JOIN(with_channel_prefix(channel).into_owned())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::USER(nick) => write!(f, "USER {nick} 8 * :{nick}"),
            Command::NICK(nick) => write!(f, "NICK {nick}"),
            Command::JOIN(channel) => write!(f, "JOIN {channel}"),
            Command::PONG(token) => write!(f, "PONG {token}"),
            Command::QUIT(reason) => write!(f, "QUIT :{}", reason.as_deref().unwrap_or("")),
        }
    }
}

impl From<Command> for String {
    fn from(cmd: Command) -> Self {
        cmd.to_string()
    }
}
