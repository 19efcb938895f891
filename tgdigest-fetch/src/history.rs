use std::ops::ControlFlow;

use tgdigest_common::message::UNKNOWN_SENDER;

use crate::FetchRequest;

pub(crate) const UNKNOWN_SOURCE: &str = "Unknown Source";

/// The parts of a history entry that decide whether it is collected.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawMessage {
    pub id: i32,
    pub outgoing: bool,
    pub has_text: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Keep { unread: bool },
    Skip,
    Stop,
}

/// Decides what to do with one history entry, newest first.
///
/// With `unread_only` the walk stops at the first message at or below the
/// read mark. An unknown read mark counts as everything read.
pub(crate) fn classify(
    raw: RawMessage,
    read_inbox_max_id: Option<i32>,
    unread_only: bool,
) -> Step {
    if unread_only && read_inbox_max_id.is_none_or(|max_id| raw.id <= max_id) {
        return Step::Stop;
    }

    let unread = !raw.outgoing && read_inbox_max_id.is_some_and(|max_id| raw.id > max_id);

    if unread_only && !unread {
        return Step::Skip;
    }

    if !raw.has_text {
        return Step::Skip;
    }

    Step::Keep { unread }
}

/// Walks a chat history newest first and keeps what [`classify`] accepts.
///
/// The limit bounds history entries visited, not messages kept, so a chat full
/// of media never pages through its whole history.
pub(crate) struct Collector<T> {
    limit: usize,
    unread_only: bool,
    read_inbox_max_id: Option<i32>,
    seen: usize,
    skipped: usize,
    kept: Vec<T>,
}

impl<T> Collector<T> {
    pub(crate) fn new(request: &FetchRequest, read_inbox_max_id: Option<i32>) -> Self {
        Self {
            limit: request.limit,
            unread_only: request.unread_only,
            read_inbox_max_id,
            seen: 0,
            skipped: 0,
            kept: Vec::new(),
        }
    }

    pub(crate) fn is_full(&self) -> bool {
        self.seen >= self.limit
    }

    pub(crate) fn seen(&self) -> usize {
        self.seen
    }

    pub(crate) fn skipped(&self) -> usize {
        self.skipped
    }

    pub(crate) fn offer(
        &mut self,
        raw: RawMessage,
        convert: impl FnOnce(bool) -> T,
    ) -> ControlFlow<()> {
        if self.is_full() {
            return ControlFlow::Break(());
        }

        match classify(raw, self.read_inbox_max_id, self.unread_only) {
            Step::Stop => return ControlFlow::Break(()),
            Step::Skip => self.skipped += 1,
            Step::Keep { unread } => self.kept.push(convert(unread)),
        }
        self.seen += 1;

        ControlFlow::Continue(())
    }

    /// Collected messages, oldest first.
    pub(crate) fn finish(self) -> Vec<T> {
        let mut kept = self.kept;
        kept.reverse();
        kept
    }
}

/// `@handle` when the peer has one, else its trimmed name, else "Unknown".
pub(crate) fn sender_label(handle: Option<&str>, name: Option<&str>) -> String {
    if let Some(handle) = handle.filter(|h| !h.is_empty()) {
        return format!("@{handle}");
    }

    name.map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_SENDER)
        .to_string()
}

pub(crate) fn forward_label(from_name: Option<&str>) -> String {
    from_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_SOURCE)
        .to_string()
}
