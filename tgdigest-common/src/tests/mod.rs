mod prompt;

use chrono::{TimeZone, Utc};

use crate::message::{Conversation, Message, Sender};

pub(crate) fn alice() -> Sender {
    Sender::new(1, "@alice")
}

pub(crate) fn bob() -> Sender {
    Sender::new(2, "Bob Smith")
}

pub(crate) fn carol() -> Sender {
    Sender::new(3, "@carol")
}

pub(crate) fn message(id: i32, sender: Sender, text: &str) -> Message {
    Message {
        id,
        sender,
        text: text.to_string(),
        date: Utc.with_ymd_and_hms(2024, 5, 1, 12, id as u32, 0).unwrap(),
        unread: false,
        reply_to: None,
        forwarded_from: None,
    }
}

pub(crate) fn reply(id: i32, sender: Sender, text: &str, reply_to: i32) -> Message {
    Message {
        reply_to: Some(reply_to),
        ..message(id, sender, text)
    }
}

/// m1..m5 alternating alice, bob, alice, bob, alice.
pub(crate) fn interleaved() -> Conversation {
    Conversation::new(
        "Team chat",
        vec![
            message(1, alice(), "m1"),
            message(2, bob(), "m2"),
            message(3, alice(), "m3"),
            message(4, bob(), "m4"),
            message(5, alice(), "m5"),
        ],
    )
}
