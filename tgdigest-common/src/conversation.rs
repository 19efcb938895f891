use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::message::{Conversation, Message, Sender};

/// Users whose messages the summary should emphasize.
///
/// Entries are matched case-insensitively against the sender's display name
/// (with or without a leading `@`) or against the sender's numeric id.
#[derive(Debug, Clone, Default)]
pub struct FocusSet {
    users: Vec<String>,
}

impl FocusSet {
    pub fn new<I, S>(users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();

        for user in users {
            let user = normalize(user.as_ref());
            if !user.is_empty() && !normalized.contains(&user) {
                normalized.push(user);
            }
        }

        Self { users: normalized }
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn users(&self) -> &[String] {
        &self.users
    }

    pub fn matches(&self, sender: &Sender) -> bool {
        self.users.iter().any(|user| entry_matches(user, sender))
    }

    /// Focus entries that matched no participant of the organized conversation.
    pub fn unmatched<'f>(&'f self, organized: &Organized<'_>) -> Vec<&'f str> {
        self.users
            .iter()
            .filter(|user| {
                !organized
                    .participants
                    .iter()
                    .any(|p| entry_matches(user, p.sender))
            })
            .map(String::as_str)
            .collect()
    }
}

fn normalize(user: &str) -> String {
    user.trim().trim_start_matches('@').to_lowercase()
}

/// `user` is already normalized.
fn entry_matches(user: &str, sender: &Sender) -> bool {
    normalize(&sender.name) == user || sender.id.is_some_and(|id| id.to_string() == user)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Focus,
    /// Not from a focus user, but a focus user replied to it.
    RepliedTo,
    Context,
}

#[derive(Debug, Clone, Copy)]
pub struct Entry<'a> {
    pub message: &'a Message,
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct Participant<'a> {
    pub sender: &'a Sender,
    pub role: Role,
    /// Chronological.
    pub messages: Vec<&'a Message>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct MessageStats {
    pub total: usize,
    pub focus: usize,
    pub context: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Period {
    pub earliest: DateTime<Utc>,
    pub latest: DateTime<Utc>,
}

/// A conversation with every message tagged and grouped by sender.
#[derive(Debug, Clone)]
pub struct Organized<'a> {
    pub conversation: &'a Conversation,
    /// One entry per message, in conversation order.
    pub entries: Vec<Entry<'a>>,
    /// In order of first appearance.
    pub participants: Vec<Participant<'a>>,
    /// Whether a non-empty focus set was applied.
    pub focused: bool,
}

impl Organized<'_> {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> MessageStats {
        let focus = self
            .entries
            .iter()
            .filter(|e| e.role == Role::Focus)
            .count();

        MessageStats {
            total: self.entries.len(),
            focus,
            context: self.entries.len() - focus,
        }
    }

    /// Time span covered by the focus messages.
    pub fn period(&self) -> Option<Period> {
        let mut dates = self
            .entries
            .iter()
            .filter(|e| e.role == Role::Focus)
            .map(|e| e.message.date);

        let first = dates.next()?;
        let (earliest, latest) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));

        Some(Period { earliest, latest })
    }
}

/// Groups messages by sender and tags each one as focus or context.
///
/// No message is dropped or reordered. With an empty focus set every message
/// is in focus. Messages that a focus user replied to are tagged
/// [`Role::RepliedTo`] so they can be kept apart from plain context.
pub fn organize<'a>(conversation: &'a Conversation, focus: &FocusSet) -> Organized<'a> {
    let sender_role = |sender: &Sender| {
        if focus.is_empty() || focus.matches(sender) {
            Role::Focus
        } else {
            Role::Context
        }
    };

    let replied: HashSet<i32> = if focus.is_empty() {
        HashSet::new()
    } else {
        conversation
            .messages
            .iter()
            .filter(|m| focus.matches(&m.sender))
            .filter_map(|m| m.reply_to)
            .collect()
    };

    let mut entries = Vec::with_capacity(conversation.len());
    let mut participants: Vec<Participant<'a>> = Vec::new();
    let mut index: HashMap<&'a Sender, usize> = HashMap::new();

    for message in &conversation.messages {
        let role = match sender_role(&message.sender) {
            Role::Context if replied.contains(&message.id) => Role::RepliedTo,
            role => role,
        };

        entries.push(Entry { message, role });

        let slot = *index.entry(&message.sender).or_insert_with(|| {
            participants.push(Participant {
                sender: &message.sender,
                role: sender_role(&message.sender),
                messages: Vec::new(),
            });
            participants.len() - 1
        });

        participants[slot].messages.push(message);
    }

    Organized {
        conversation,
        entries,
        participants,
        focused: !focus.is_empty(),
    }
}
