use std::ops::ControlFlow;

use crate::FetchRequest;
use crate::history::{Collector, RawMessage, Step, classify, forward_label, sender_label};

fn text(id: i32) -> RawMessage {
    RawMessage {
        id,
        outgoing: false,
        has_text: true,
    }
}

fn media(id: i32) -> RawMessage {
    RawMessage {
        has_text: false,
        ..text(id)
    }
}

fn outgoing(id: i32) -> RawMessage {
    RawMessage {
        outgoing: true,
        ..text(id)
    }
}

fn request(limit: usize, unread_only: bool) -> FetchRequest {
    FetchRequest {
        chat: "@team".to_string(),
        limit,
        unread_only,
    }
}

/// Feeds `history` (newest first) and returns the kept ids with their unread flag.
fn collect(
    request: &FetchRequest,
    read_mark: Option<i32>,
    history: &[RawMessage],
) -> (Vec<(i32, bool)>, usize) {
    let mut collector = Collector::new(request, read_mark);

    for raw in history {
        if collector.is_full() {
            break;
        }
        if collector.offer(*raw, |unread| (raw.id, unread)).is_break() {
            break;
        }
    }

    let seen = collector.seen();
    (collector.finish(), seen)
}

#[test]
fn test_classify_all_messages() {
    assert_eq!(classify(text(10), Some(5), false), Step::Keep { unread: true });
    assert_eq!(classify(text(4), Some(5), false), Step::Keep { unread: false });
    assert_eq!(classify(text(4), None, false), Step::Keep { unread: false });
    assert_eq!(classify(outgoing(10), Some(5), false), Step::Keep { unread: false });
    assert_eq!(classify(media(10), Some(5), false), Step::Skip);
}

#[test]
fn test_classify_unread_only() {
    assert_eq!(classify(text(6), Some(5), true), Step::Keep { unread: true });
    assert_eq!(classify(text(5), Some(5), true), Step::Stop);
    assert_eq!(classify(text(1), Some(5), true), Step::Stop);
    // own messages newer than the mark are not unread
    assert_eq!(classify(outgoing(9), Some(5), true), Step::Skip);
    assert_eq!(classify(media(9), Some(5), true), Step::Skip);
}

#[test]
fn test_classify_unknown_read_state_stops_unread_walk() {
    assert_eq!(classify(text(100), None, true), Step::Stop);
}

#[test]
fn test_collected_messages_are_oldest_first() {
    let history = [text(5), text(4), media(3), text(2), text(1)];
    let (kept, seen) = collect(&request(100, false), Some(3), &history);

    assert_eq!(kept, [(1, false), (2, false), (4, true), (5, true)]);
    assert_eq!(seen, 5);
}

#[test]
fn test_limit_counts_visited_messages() {
    let mut history: Vec<RawMessage> = (1..=1000).rev().map(media).collect();
    history.insert(0, text(1001));

    let (kept, seen) = collect(&request(10, false), None, &history);

    assert_eq!(kept, [(1001, false)]);
    assert_eq!(seen, 10);
}

#[test]
fn test_unread_walk_stops_at_read_mark() {
    let history = [text(12), outgoing(11), media(10), text(9), text(8), text(7)];
    let (kept, seen) = collect(&request(100, true), Some(8), &history);

    assert_eq!(kept, [(9, true), (12, true)]);
    assert_eq!(seen, 4);
}

#[test]
fn test_unread_walk_without_read_state_is_empty() {
    let history = [text(3), text(2), text(1)];
    let (kept, seen) = collect(&request(100, true), None, &history);

    assert!(kept.is_empty());
    assert_eq!(seen, 0);
}

#[test]
fn test_full_collector_refuses_more() {
    let mut collector = Collector::new(&request(1, false), None);

    assert_eq!(collector.offer(text(2), |_| 2), ControlFlow::Continue(()));
    assert!(collector.is_full());
    assert_eq!(collector.offer(text(1), |_| 1), ControlFlow::Break(()));
    assert_eq!(collector.finish(), [2]);
}

#[test]
fn test_sender_label() {
    assert_eq!(sender_label(Some("alice"), Some("Alice A")), "@alice");
    assert_eq!(sender_label(None, Some("  Bob Smith ")), "Bob Smith");
    assert_eq!(sender_label(Some(""), Some("Bob")), "Bob");
    assert_eq!(sender_label(None, Some("   ")), "Unknown");
    assert_eq!(sender_label(None, None), "Unknown");
}

#[test]
fn test_forward_label() {
    assert_eq!(forward_label(Some("News Channel")), "News Channel");
    assert_eq!(forward_label(Some("")), "Unknown Source");
    assert_eq!(forward_label(None), "Unknown Source");
}
