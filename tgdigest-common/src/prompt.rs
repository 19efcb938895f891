use std::path::Path;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::conversation::{Entry, FocusSet, Organized, Participant, Role};
use crate::message::Message;

pub const MESSAGES: &str = "{messages}";
pub const PARTICIPANT: &str = "{participant}";

pub(crate) const PLACEHOLDER_PATTERN_STR: &str = r"\{[A-Za-z_][A-Za-z0-9_]*\}";

static PLACEHOLDER_PATTERN: OnceLock<Regex> = OnceLock::new();

pub(crate) fn get_placeholder_pattern() -> &'static Regex {
    PLACEHOLDER_PATTERN.get_or_init(|| Regex::new(PLACEHOLDER_PATTERN_STR).unwrap())
}

const CONTEXT_MARKER: &str = "(context) ";
const REPLIED_TO_MARKER: &str = "(replied to) ";

pub const DEFAULT_OVERALL_PROMPT: &str = r#"Summarize the following chat conversation.
Describe the main topics, the decisions that were made and any open questions.
Be concise and group related points together.

{messages}"#;

pub const DEFAULT_PARTICIPANT_PROMPT: &str = r#"Summarize what {participant} said in the following chat messages.
Describe their main points, opinions and requests. Be concise.

{messages}"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Overall,
    Participant,
}

impl PromptKind {
    /// Name of the override file looked up in the prompts directory.
    pub fn file_name(self) -> &'static str {
        match self {
            PromptKind::Overall => "overall_prompt.md",
            PromptKind::Participant => "participant_prompt.md",
        }
    }

    fn builtin(self) -> &'static str {
        match self {
            PromptKind::Overall => DEFAULT_OVERALL_PROMPT,
            PromptKind::Participant => DEFAULT_PARTICIPANT_PROMPT,
        }
    }
}

/// Values substituted into a template.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptVars<'a> {
    pub messages: &'a str,
    pub participant: Option<&'a str>,
}

impl<'a> PromptVars<'a> {
    fn get(&self, placeholder: &str) -> Option<&'a str> {
        match placeholder {
            MESSAGES => Some(self.messages),
            PARTICIPANT => Some(self.participant.unwrap_or_default()),
            _ => None,
        }
    }
}

/// Prompt text with `{messages}` and `{participant}` placeholders.
///
/// Any other `{name}` token is left in the output verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    text: String,
}

impl PromptTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn unknown_placeholders(&self) -> Vec<&str> {
        get_placeholder_pattern()
            .find_iter(&self.text)
            .map(|m| m.as_str())
            .filter(|p| *p != MESSAGES && *p != PARTICIPANT)
            .collect()
    }

    /// Substitutes every recognized placeholder in a single pass, so values
    /// that themselves contain placeholder-like text are not expanded again.
    pub fn render(&self, vars: &PromptVars<'_>) -> String {
        get_placeholder_pattern()
            .replace_all(&self.text, |caps: &Captures<'_>| {
                let token = &caps[0];
                vars.get(token).unwrap_or(token).to_string()
            })
            .into_owned()
    }
}

pub fn format_message(message: &Message) -> String {
    match &message.forwarded_from {
        Some(origin) => format!(
            "[{}] {} forwarded from {}: {}",
            message.timestamp(),
            message.sender.name,
            origin,
            message.text
        ),
        None => format!(
            "[{}] {}: {}",
            message.timestamp(),
            message.sender.name,
            message.text
        ),
    }
}

/// One line per entry. Non-focus lines get a marker when `mark_context` is set.
pub fn format_entries(entries: &[Entry<'_>], mark_context: bool) -> String {
    entries
        .iter()
        .map(|entry| match entry.role {
            Role::Context if mark_context => {
                format!("{CONTEXT_MARKER}{}", format_message(entry.message))
            }
            Role::RepliedTo if mark_context => {
                format!("{REPLIED_TO_MARKER}{}", format_message(entry.message))
            }
            _ => format_message(entry.message),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_messages(messages: &[&Message]) -> String {
    messages
        .iter()
        .map(|m| format_message(m))
        .collect::<Vec<_>>()
        .join("\n")
}

fn focus_instruction(focus: &FocusSet) -> String {
    format!(
        "\n\nPay particular attention to the messages from: {}. \
         Lines starting with \"{}\" are messages those users answered. \
         Lines starting with \"{}\" come from other participants and are only \
         included to keep the conversation coherent; give them less weight.",
        focus.users().join(", "),
        REPLIED_TO_MARKER.trim_end(),
        CONTEXT_MARKER.trim_end()
    )
}

#[derive(Debug, Clone)]
pub struct PromptSet {
    pub overall: PromptTemplate,
    pub participant: PromptTemplate,
}

impl Default for PromptSet {
    fn default() -> Self {
        Self {
            overall: PromptTemplate::new(DEFAULT_OVERALL_PROMPT),
            participant: PromptTemplate::new(DEFAULT_PARTICIPANT_PROMPT),
        }
    }
}

impl PromptSet {
    /// Loads both templates. An override file in `dir` wins over
    /// `default_prompt`, which wins over the built-in text.
    pub fn load(dir: &Path, default_prompt: Option<&str>) -> std::io::Result<Self> {
        Ok(Self {
            overall: load_template(dir, PromptKind::Overall, default_prompt)?,
            participant: load_template(dir, PromptKind::Participant, default_prompt)?,
        })
    }

    pub fn get(&self, kind: PromptKind) -> &PromptTemplate {
        match kind {
            PromptKind::Overall => &self.overall,
            PromptKind::Participant => &self.participant,
        }
    }

    pub fn overall(&self, organized: &Organized<'_>, focus: &FocusSet) -> String {
        let messages = format_entries(&organized.entries, organized.focused);

        let mut prompt = self.overall.render(&PromptVars {
            messages: &messages,
            participant: None,
        });

        if organized.focused {
            prompt.push_str(&focus_instruction(focus));
        }

        prompt
    }

    pub fn participant(&self, participant: &Participant<'_>) -> String {
        let messages = format_messages(&participant.messages);

        self.participant.render(&PromptVars {
            messages: &messages,
            participant: Some(&participant.sender.name),
        })
    }
}

fn load_template(
    dir: &Path,
    kind: PromptKind,
    default_prompt: Option<&str>,
) -> std::io::Result<PromptTemplate> {
    let path = dir.join(kind.file_name());

    let template = if path.is_file() {
        tracing::info!(?kind, path = %path.display(), "using prompt override file");
        PromptTemplate::new(std::fs::read_to_string(&path)?)
    } else if let Some(default) = default_prompt.filter(|p| !p.trim().is_empty()) {
        PromptTemplate::new(default)
    } else {
        PromptTemplate::new(kind.builtin())
    };

    let unknown = template.unknown_placeholders();
    if !unknown.is_empty() {
        tracing::warn!(?kind, ?unknown, "unrecognized placeholders are left as is");
    }

    if !template.as_str().contains(MESSAGES) {
        tracing::warn!(?kind, "prompt has no {MESSAGES} placeholder");
    }

    Ok(template)
}
