use std::fmt;

use grammers_session::types::{PeerId, PeerKind};

use crate::{FetchError, FetchResult};

/// Prefix of supergroup and channel ids in the Bot API notation.
const CHANNEL_PREFIX: &str = "-100";

/// A chat as given on the command line or in the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatRef {
    Username(String),
    User(i64),
    /// Basic group, given as a negative id.
    Group(i64),
    /// Channel or supergroup, given as `-100<id>`.
    Channel(i64),
}

impl ChatRef {
    pub fn parse(input: &str) -> FetchResult<Self> {
        let trimmed = input.trim();
        let invalid = || FetchError::InvalidChat(input.to_string());

        if let Ok(id) = trimmed.parse::<i64>() {
            return match id {
                0 => Err(invalid()),
                id if id > 0 => Ok(ChatRef::User(id)),
                _ => match trimmed.strip_prefix(CHANNEL_PREFIX) {
                    Some(rest) if !rest.is_empty() => rest
                        .parse::<i64>()
                        .ok()
                        .filter(|id| *id > 0)
                        .map(ChatRef::Channel)
                        .ok_or_else(invalid),
                    _ => id.checked_neg().map(ChatRef::Group).ok_or_else(invalid),
                },
            };
        }

        let handle = trimmed
            .trim_start_matches("https://")
            .trim_start_matches("t.me/")
            .trim_start_matches('@')
            .trim_end_matches('/');

        if handle.is_empty() || !handle.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(invalid());
        }

        Ok(ChatRef::Username(handle.to_string()))
    }

    pub fn matches(&self, id: PeerId) -> bool {
        let kind = id.kind();
        match self {
            ChatRef::Username(_) => false,
            ChatRef::Channel(bare) => kind == PeerKind::Channel && id.bare_id() == *bare,
            ChatRef::Group(bare) => kind == PeerKind::Chat && id.bare_id() == *bare,
            ChatRef::User(bare) => {
                kind != PeerKind::Channel && kind != PeerKind::Chat && id.bare_id() == *bare
            }
        }
    }
}

impl fmt::Display for ChatRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatRef::Username(name) => write!(f, "@{name}"),
            ChatRef::User(id) => write!(f, "{id}"),
            ChatRef::Group(id) => write!(f, "-{id}"),
            ChatRef::Channel(id) => write!(f, "{CHANNEL_PREFIX}{id}"),
        }
    }
}
