use chrono::{DateTime, Utc};

pub const UNKNOWN_SENDER: &str = "Unknown";

/// Author of a message.
///
/// `id` is the bare platform id when the sender could be resolved. Two
/// messages belong to the same participant when their senders are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sender {
    pub id: Option<i64>,
    pub name: String,
}

impl Sender {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }

    pub fn unknown() -> Self {
        Self {
            id: None,
            name: UNKNOWN_SENDER.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Message {
    pub id: i32,
    pub sender: Sender,
    pub text: String,
    pub date: DateTime<Utc>,
    pub unread: bool,
    /// Id of the message this one answers, within the same chat.
    pub reply_to: Option<i32>,
    pub forwarded_from: Option<String>,
}

impl Message {
    pub fn timestamp(&self) -> String {
        self.date.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Messages of one chat, oldest first.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    pub title: String,
    pub messages: Vec<Message>,
}

impl Conversation {
    pub fn new(title: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            title: title.into(),
            messages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }
}
