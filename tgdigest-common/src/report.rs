use std::fmt::Write as _;
use std::io::Write as _;
use std::path::PathBuf;
use std::str::FromStr;

use crate::conversation::{FocusSet, MessageStats, Organized, Period, Role};
use crate::message::Sender;

#[derive(Debug, Clone)]
pub struct ParticipantSummary {
    pub sender: Sender,
    pub summary: String,
}

/// Generated text for one run.
#[derive(Debug, Clone, Default)]
pub struct SummaryResult {
    pub overall: String,
    pub participants: Vec<ParticipantSummary>,
}

impl SummaryResult {
    pub fn for_sender(&self, sender: &Sender) -> Option<&str> {
        self.participants
            .iter()
            .find(|p| p.sender == *sender)
            .map(|p| p.summary.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Markdown,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!(
                "unknown format '{other}', expected one of: text, markdown, json"
            )),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ParticipantSection {
    pub name: String,
    pub sender_id: Option<i64>,
    pub message_count: usize,
    pub focus: bool,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct Report {
    pub chat_title: String,
    pub focus_users: Vec<String>,
    pub message_count: MessageStats,
    pub period: Option<Period>,
    pub overall_summary: Option<String>,
    /// In order of first appearance in the conversation.
    pub participants: Vec<ParticipantSection>,
}

impl Report {
    pub fn new(
        organized: &Organized<'_>,
        focus: &FocusSet,
        summaries: Option<&SummaryResult>,
    ) -> Self {
        let participants = organized
            .participants
            .iter()
            .map(|p| ParticipantSection {
                name: p.sender.name.clone(),
                sender_id: p.sender.id,
                message_count: p.messages.len(),
                focus: p.role == Role::Focus,
                summary: summaries
                    .and_then(|s| s.for_sender(p.sender))
                    .map(str::to_string),
            })
            .collect();

        Self {
            chat_title: organized.conversation.title.clone(),
            focus_users: focus.users().to_vec(),
            message_count: organized.stats(),
            period: organized.period(),
            overall_summary: summaries.map(|s| s.overall.clone()),
            participants,
        }
    }

    pub fn render(&self, format: ReportFormat) -> serde_json::Result<String> {
        match format {
            ReportFormat::Text => Ok(self.to_text()),
            ReportFormat::Markdown => Ok(self.to_markdown()),
            ReportFormat::Json => serde_json::to_string_pretty(self),
        }
    }

    fn count_line(&self) -> String {
        let MessageStats {
            total,
            focus,
            context,
        } = self.message_count;

        if self.focus_users.is_empty() {
            format!("{total}")
        } else {
            format!("{total} ({focus} from focus users, {context} context)")
        }
    }

    fn period_line(&self) -> Option<String> {
        self.period.map(|Period { earliest, latest }| {
            format!(
                "{} - {}",
                earliest.format("%Y-%m-%d %H:%M"),
                latest.format("%Y-%m-%d %H:%M")
            )
        })
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "Chat: {}", self.chat_title);
        let _ = writeln!(out, "Messages: {}", self.count_line());
        if !self.focus_users.is_empty() {
            let _ = writeln!(out, "Focus users: {}", self.focus_users.join(", "));
        }
        if let Some(period) = self.period_line() {
            let _ = writeln!(out, "Period: {period}");
        }

        if self.participants.is_empty() {
            let _ = writeln!(out, "\nNo messages found.");
            return out;
        }

        if let Some(overall) = &self.overall_summary {
            let _ = writeln!(out, "\n=== Overall summary ===\n{}", overall.trim_end());
        }

        let _ = writeln!(out, "\n=== Participants ===");
        for section in &self.participants {
            let _ = writeln!(
                out,
                "\n--- {} ({} messages) ---",
                section.name, section.message_count
            );
            if let Some(summary) = &section.summary {
                let _ = writeln!(out, "{}", summary.trim_end());
            }
        }

        out
    }

    pub fn to_markdown(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "# {}\n", self.chat_title);
        let _ = writeln!(out, "- **Messages:** {}", self.count_line());
        if !self.focus_users.is_empty() {
            let _ = writeln!(out, "- **Focus users:** {}", self.focus_users.join(", "));
        }
        if let Some(period) = self.period_line() {
            let _ = writeln!(out, "- **Period:** {period}");
        }

        if self.participants.is_empty() {
            let _ = writeln!(out, "\n_No messages found._");
            return out;
        }

        if let Some(overall) = &self.overall_summary {
            let _ = writeln!(out, "\n## Overall summary\n\n{}", overall.trim_end());
        }

        let _ = writeln!(out, "\n## Participants");
        for section in &self.participants {
            let _ = writeln!(
                out,
                "\n### {} ({} messages)",
                section.name, section.message_count
            );
            if let Some(summary) = &section.summary {
                let _ = writeln!(out, "\n{}", summary.trim_end());
            }
        }

        out
    }
}

/// Where a rendered report goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportSink {
    Console,
    /// Overwritten on every run.
    File(PathBuf),
}

impl ReportSink {
    pub fn from_output(output: Option<PathBuf>) -> Self {
        output.map_or(ReportSink::Console, ReportSink::File)
    }

    pub fn write(&self, text: &str) -> std::io::Result<()> {
        match self {
            ReportSink::Console => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(text.as_bytes())?;
                if !text.ends_with('\n') {
                    stdout.write_all(b"\n")?;
                }
                stdout.flush()
            }
            ReportSink::File(path) => {
                std::fs::write(path, text)?;
                tracing::info!(path = %path.display(), "report written");
                Ok(())
            }
        }
    }
}
