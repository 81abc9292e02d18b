//! Default value functions for configuration.

pub fn default_port() -> u16 {
    6667
}

pub fn default_nick() -> String {
    "ircpush".to_string()
}

pub fn default_publish_channel() -> String {
    "irc".to_string()
}

pub fn default_event() -> String {
    "message".to_string()
}

pub fn default_scheme() -> String {
    "https".to_string()
}
