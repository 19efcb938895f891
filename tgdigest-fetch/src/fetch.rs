use grammers_client::types::Peer;
use grammers_tl_types as tl;
use tgdigest_common::{Conversation, Message, Sender};

use crate::chat::ChatRef;
use crate::history::{Collector, RawMessage, forward_label, sender_label};
use crate::{FetchError, FetchRequest, FetchResult, MessageSource, TelegramFetcher};

struct ResolvedChat {
    peer: Peer,
    /// Highest incoming message id the user has read, when known.
    read_inbox_max_id: Option<i32>,
}

fn read_inbox_max_id(dialog: &tl::enums::Dialog) -> Option<i32> {
    match dialog {
        tl::enums::Dialog::Dialog(d) => Some(d.read_inbox_max_id),
        tl::enums::Dialog::Folder(_) => None,
    }
}

pub(crate) fn display_name(peer: &Peer) -> String {
    sender_label(TelegramFetcher::get_handle(peer).as_deref(), peer.name())
}

fn convert(message: &grammers_client::types::Message, unread: bool) -> Message {
    let sender = message
        .sender()
        .as_ref()
        .map(|peer| Sender::new(peer.id().bare_id(), display_name(peer)))
        .unwrap_or_else(Sender::unknown);

    let forwarded_from = message.forward_header().map(|header| match header {
        tl::enums::MessageFwdHeader::Header(h) => forward_label(h.from_name.as_deref()),
    });

    Message {
        id: message.id(),
        sender,
        text: message.text().to_string(),
        date: message.date(),
        unread,
        reply_to: message.reply_to_message_id(),
        forwarded_from,
    }
}

impl TelegramFetcher {
    pub(crate) fn get_handle(peer: &Peer) -> Option<String> {
        peer.username()
            .or_else(|| peer.usernames().first().cloned())
            .map(String::from)
    }

    async fn resolve_peer(&self, handle: &str) -> FetchResult<Peer> {
        let resolved = self.client.resolve_username(handle).await?;

        match resolved {
            Some(peer) => Ok(peer),
            None => Err(FetchError::NotFound(format!("@{handle}"))),
        }
    }

    /// Looks the chat up in the dialog list, which also carries its read
    /// state. Public chats the account never joined fall back to a username
    /// lookup without read state.
    async fn resolve_chat(&self, chat: &ChatRef) -> FetchResult<ResolvedChat> {
        let mut dialogs = self.client.iter_dialogs();

        while let Some(dialog) = dialogs.next().await? {
            let peer = dialog.peer();

            let found = match chat {
                ChatRef::Username(name) => {
                    Self::get_handle(peer).is_some_and(|h| h.eq_ignore_ascii_case(name))
                }
                _ => chat.matches(peer.id()),
            };

            if found {
                return Ok(ResolvedChat {
                    peer: peer.clone(),
                    read_inbox_max_id: read_inbox_max_id(&dialog.raw),
                });
            }
        }

        match chat {
            ChatRef::Username(name) => Ok(ResolvedChat {
                peer: self.resolve_peer(name).await?,
                read_inbox_max_id: None,
            }),
            _ => Err(FetchError::NotFound(chat.to_string())),
        }
    }
}

impl MessageSource for TelegramFetcher {
    async fn fetch(&self, request: &FetchRequest) -> FetchResult<Conversation> {
        let chat_ref = ChatRef::parse(&request.chat)?;

        tracing::info!(chat = %chat_ref, limit = request.limit, unread_only = request.unread_only, "fetching messages");

        let chat = self.resolve_chat(&chat_ref).await?;
        let title = chat
            .peer
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| chat_ref.to_string());

        if request.unread_only && chat.read_inbox_max_id.is_none() {
            tracing::warn!(chat = %chat_ref, "read state unknown for this chat, no message counts as unread");
        }

        let mut collector = Collector::new(request, chat.read_inbox_max_id);
        let mut iter = self.client.iter_messages(&chat.peer);

        // newest first
        while !collector.is_full() {
            let Some(message) = iter.next().await? else {
                break;
            };

            let raw = RawMessage {
                id: message.id(),
                outgoing: message.outgoing(),
                has_text: !message.text().is_empty(),
            };

            if collector
                .offer(raw, |unread| convert(&message, unread))
                .is_break()
            {
                break;
            }
        }

        let seen = collector.seen();
        let skipped = collector.skipped();
        let messages = collector.finish();

        tracing::info!(
            chat = %chat_ref,
            count = messages.len(),
            seen,
            skipped,
            "fetched messages"
        );

        Ok(Conversation::new(title, messages))
    }
}
