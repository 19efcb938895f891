use std::path::PathBuf;

use clap::Parser;
use tgdigest_common::ReportFormat;

#[derive(Parser, Debug)]
#[command(
    name = "tgdigest",
    version,
    about = "Summarize a Telegram chat, overall and per participant, with an LLM"
)]
pub(crate) struct Cli {
    /// Chat to analyze: @username, user id, -<group id> or -100<channel id>
    /// [default: default_chat_id from the settings]
    #[arg(short = 'c', long = "chat-id", visible_alias = "chat_id")]
    pub chat_id: Option<String>,

    /// Maximum number of messages to fetch [default: default_limit from the settings]
    #[arg(short = 'n', long, visible_alias = "num-messages")]
    pub limit: Option<usize>,

    /// Users to focus on (usernames or ids); everyone else is kept as context
    #[arg(short = 'u', long, num_args = 0..)]
    pub users: Vec<String>,

    /// Write the report to this file instead of the console
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Model to summarize with; claude models use the Anthropic API, anything else a local Ollama server
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Only fetch unread messages
    #[arg(long)]
    pub unread: bool,

    /// Report format: text, markdown or json
    #[arg(short = 'f', long, default_value = "text")]
    pub format: ReportFormat,

    /// Skip AI summaries and only report the organized messages
    #[arg(long)]
    pub no_summary: bool,

    /// Settings file [default: Settings.toml when present]
    #[arg(long)]
    pub config: Option<PathBuf>,
}
