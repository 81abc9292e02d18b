//! Channel name utilities.
//!
//! # Reference
//! - RFC 2812 Section 1.3: Channel names

use std::borrow::Cow;

/// Prefix added to channel names that arrive without one.
pub const DEFAULT_CHANNEL_PREFIX: char = '#';

/// Characters that may start an IRC channel name.
pub const CHANNEL_PREFIXES: [char; 4] = ['#', '&', '+', '!'];

/// Extension trait for checking whether a string already carries a channel prefix.
pub trait ChannelExt {
    /// Returns `true` when the first character is one of [`CHANNEL_PREFIXES`].
    fn has_channel_prefix(&self) -> bool;
}

impl ChannelExt for str {
    fn has_channel_prefix(&self) -> bool {
        self.starts_with(&CHANNEL_PREFIXES[..])
    }
}

/// Normalize a configured channel name for a JOIN request.
///
/// Names that already start with a channel prefix are returned unchanged,
/// anything else gets [`DEFAULT_CHANNEL_PREFIX`] prepended.
pub fn with_channel_prefix(name: &str) -> Cow<'_, str> {
    if name.has_channel_prefix() {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("{DEFAULT_CHANNEL_PREFIX}{name}"))
    }
}
