use crate::conversation::{FocusSet, organize};
use crate::message::Conversation;
use crate::prompt::{
    DEFAULT_OVERALL_PROMPT, PromptKind, PromptSet, PromptTemplate, PromptVars, format_entries,
    format_message,
};
use crate::tests::{alice, bob, carol, interleaved, message, reply};

#[test]
fn test_render_substitutes_placeholders() {
    let template = PromptTemplate::new("About {participant}:\n{messages}");
    let rendered = template.render(&PromptVars {
        messages: "line 1\nline 2",
        participant: Some("@alice"),
    });

    assert_eq!(rendered, "About @alice:\nline 1\nline 2");
}

#[test]
fn test_render_keeps_unknown_placeholders() {
    let template = PromptTemplate::new("{greeting} {messages} {chat_title}");
    let rendered = template.render(&PromptVars {
        messages: "hi",
        participant: None,
    });

    assert_eq!(rendered, "{greeting} hi {chat_title}");
    assert_eq!(template.unknown_placeholders(), ["{greeting}", "{chat_title}"]);
}

#[test]
fn test_render_does_not_expand_substituted_values() {
    let template = PromptTemplate::new("{participant}: {messages}");
    let rendered = template.render(&PromptVars {
        messages: "someone typed {participant}",
        participant: Some("{messages}"),
    });

    assert_eq!(rendered, "{messages}: someone typed {participant}");
}

#[test]
fn test_render_ignores_json_like_braces() {
    let template = PromptTemplate::new("Reply as {\"summary\": \"...\"}\n{messages}");
    assert!(template.unknown_placeholders().is_empty());

    let rendered = template.render(&PromptVars {
        messages: "x",
        participant: None,
    });
    assert_eq!(rendered, "Reply as {\"summary\": \"...\"}\nx");
}

#[test]
fn test_messages_only_template_with_empty_conversation() {
    let conversation = Conversation::default();
    let organized = organize(&conversation, &FocusSet::default());
    let prompts = PromptSet {
        overall: PromptTemplate::new("{messages}"),
        ..PromptSet::default()
    };

    let prompt = prompts.overall(&organized, &FocusSet::default());
    assert_eq!(prompt, "");
}

#[test]
fn test_format_message_lines() {
    let mut forwarded = message(7, bob(), "look at this");
    forwarded.forwarded_from = Some("News Channel".to_string());

    assert_eq!(
        format_message(&message(3, alice(), "hello")),
        "[2024-05-01 12:03:00] @alice: hello"
    );
    assert_eq!(
        format_message(&forwarded),
        "[2024-05-01 12:07:00] Bob Smith forwarded from News Channel: look at this"
    );
}

#[test]
fn test_context_lines_are_marked_only_when_focused() {
    let conversation = interleaved();

    let focused = organize(&conversation, &FocusSet::new(["alice"]));
    let lines = format_entries(&focused.entries, focused.focused);
    let lines: Vec<&str> = lines.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("[2024"));
    assert!(lines[1].starts_with("(context) [2024"));

    let unfocused = organize(&conversation, &FocusSet::default());
    let text = format_entries(&unfocused.entries, unfocused.focused);
    assert!(!text.contains("(context)"));
}

#[test]
fn test_overall_prompt_mentions_focus_users() {
    let conversation = interleaved();
    let focus = FocusSet::new(["@alice"]);
    let organized = organize(&conversation, &focus);

    let prompt = PromptSet::default().overall(&organized, &focus);
    assert!(prompt.contains("@alice: m1"));
    assert!(prompt.contains("(context) [2024-05-01 12:02:00] Bob Smith: m2"));
    assert!(prompt.contains("messages from: alice"));
}

#[test]
fn test_overall_prompt_without_focus_has_no_instruction() {
    let conversation = interleaved();
    let organized = organize(&conversation, &FocusSet::default());

    let prompt = PromptSet::default().overall(&organized, &FocusSet::default());
    assert!(!prompt.contains("Pay particular attention"));
    assert!(prompt.starts_with(&DEFAULT_OVERALL_PROMPT[..20]));
}

#[test]
fn test_participant_prompt_uses_own_messages() {
    let conversation = interleaved();
    let organized = organize(&conversation, &FocusSet::default());

    let prompt = PromptSet::default().participant(&organized.participants[1]);
    assert!(prompt.contains("Summarize what Bob Smith said"));
    assert!(prompt.contains("Bob Smith: m2\n[2024-05-01 12:04:00] Bob Smith: m4"));
    assert!(!prompt.contains("@alice"));
}

#[test]
fn test_load_prefers_override_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(PromptKind::Overall.file_name()),
        "Custom overall:\n{messages}",
    )
    .unwrap();

    let prompts = PromptSet::load(dir.path(), Some("Configured default {messages}")).unwrap();

    assert_eq!(prompts.overall.as_str(), "Custom overall:\n{messages}");
    assert_eq!(prompts.participant.as_str(), "Configured default {messages}");
}

#[test]
fn test_load_falls_back_to_builtin() {
    let dir = tempfile::tempdir().unwrap();

    let prompts = PromptSet::load(dir.path(), None).unwrap();
    assert_eq!(prompts.get(PromptKind::Overall), &PromptSet::default().overall);
    assert_eq!(
        prompts.get(PromptKind::Participant),
        &PromptSet::default().participant
    );

    let blank = PromptSet::load(dir.path(), Some("   ")).unwrap();
    assert_eq!(blank.overall, PromptSet::default().overall);
}

#[test]
fn test_load_missing_directory_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");

    assert!(PromptSet::load(&missing, None).is_ok());
}

#[test]
fn test_answered_messages_are_marked_in_overall_prompt() {
    let conversation = Conversation::new(
        "chat",
        vec![
            message(1, bob(), "ship friday?"),
            message(2, carol(), "lunch?"),
            reply(3, alice(), "friday works", 1),
        ],
    );
    let focus = FocusSet::new(["alice"]);
    let organized = organize(&conversation, &focus);

    let lines = format_entries(&organized.entries, organized.focused);
    let lines: Vec<&str> = lines.lines().collect();
    assert_eq!(
        lines,
        [
            "(replied to) [2024-05-01 12:01:00] Bob Smith: ship friday?",
            "(context) [2024-05-01 12:02:00] @carol: lunch?",
            "[2024-05-01 12:03:00] @alice: friday works",
        ]
    );

    let prompt = PromptSet::default().overall(&organized, &focus);
    assert!(prompt.contains("Lines starting with \"(replied to)\""));
}
