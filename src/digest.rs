use tgdigest_ai::{Backend, Summarizer};
use tgdigest_common::{
    FocusSet, Organized, ParticipantSummary, PromptSet, Report, SummaryResult, organize,
};
use tgdigest_fetch::{FetchRequest, MessageSource};

use crate::cli::Cli;
use crate::config::Config;
use crate::error::{DigestError, DigestResult};

/// Command line arguments merged with the settings.
#[derive(Debug)]
pub(crate) struct RunOptions {
    pub request: FetchRequest,
    pub model: String,
    pub summarize: bool,
}

impl RunOptions {
    pub fn resolve(cli: &Cli, config: &Config) -> DigestResult<Self> {
        let chat = cli
            .chat_id
            .as_deref()
            .or(config.default_chat_id.as_deref())
            .map(str::trim)
            .filter(|chat| !chat.is_empty())
            .ok_or_else(|| {
                DigestError::Config(
                    "no chat given: pass -c/--chat-id or set DEFAULT_CHAT_ID".to_string(),
                )
            })?;

        let limit = cli.limit.unwrap_or(config.default_limit);
        if limit == 0 {
            return Err(DigestError::Config(
                "message limit must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            request: FetchRequest {
                chat: chat.to_string(),
                limit,
                unread_only: cli.unread,
            },
            model: cli.model.clone().unwrap_or_else(|| config.ai.model.clone()),
            summarize: !cli.no_summary,
        })
    }

    /// Resolved before anything touches the network, so a missing
    /// credential fails the run early.
    pub fn backend(&self, config: &tgdigest_ai::Config) -> DigestResult<Option<Backend>> {
        if !self.summarize {
            tracing::info!("summaries disabled, no backend selected");
            return Ok(None);
        }

        let backend = Backend::select(&self.model, config)?;
        tracing::info!(model = backend.model(), kind = backend.kind(), "selected backend");

        Ok(Some(backend))
    }
}

pub(crate) async fn run<F, S>(
    source: &F,
    summarizer: Option<&S>,
    prompts: &PromptSet,
    request: &FetchRequest,
    focus: &FocusSet,
) -> DigestResult<Report>
where
    F: MessageSource,
    S: Summarizer,
{
    let conversation = source.fetch(request).await?;
    let organized = organize(&conversation, focus);

    let stats = organized.stats();
    tracing::info!(
        title = %conversation.title,
        total = stats.total,
        focus = stats.focus,
        context = stats.context,
        participants = organized.participants.len(),
        "organized conversation"
    );

    let unmatched = focus.unmatched(&organized);
    if !unmatched.is_empty() {
        tracing::warn!(?unmatched, "focus users have no messages in the fetched range");
    }

    if organized.is_empty() {
        tracing::warn!(chat = %request.chat, "no messages found");
        return Ok(Report::new(&organized, focus, None));
    }

    let summaries = match summarizer {
        Some(summarizer) => Some(summarize(summarizer, prompts, &organized, focus).await?),
        None => None,
    };

    Ok(Report::new(&organized, focus, summaries.as_ref()))
}

/// One overall request, then one request per participant, each awaited in turn.
async fn summarize<S: Summarizer>(
    summarizer: &S,
    prompts: &PromptSet,
    organized: &Organized<'_>,
    focus: &FocusSet,
) -> DigestResult<SummaryResult> {
    tracing::info!("generating overall summary");
    let overall = summarizer
        .complete(&prompts.overall(organized, focus))
        .await?;

    let total = organized.participants.len();
    let mut participants = Vec::with_capacity(total);

    for (n, participant) in organized.participants.iter().enumerate() {
        tracing::info!(
            participant = %participant.sender.name,
            messages = participant.messages.len(),
            "generating participant summary {}/{total}",
            n + 1
        );

        let summary = summarizer
            .complete(&prompts.participant(participant))
            .await?;

        participants.push(ParticipantSummary {
            sender: participant.sender.clone(),
            summary,
        });
    }

    Ok(SummaryResult {
        overall,
        participants,
    })
}
