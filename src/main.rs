mod cli;
mod config;
mod digest;
mod error;


use std::process::ExitCode;

use clap::Parser;
use tgdigest_ai::Backend;
use tgdigest_common::{FocusSet, PromptSet, Report, ReportSink};
use tgdigest_fetch::{FetchRequest, TelegramFetcher};

use crate::cli::Cli;
use crate::config::Config;
use crate::digest::RunOptions;
use crate::error::{DigestError, DigestResult};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "run failed");
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run(cli: Cli) -> DigestResult<()> {
    let config = Config::load(cli.config.as_deref())?;
    let options = RunOptions::resolve(&cli, &config)?;
    let backend = options.backend(&config.ai)?;

    let prompts =
        PromptSet::load(&config.prompts_dir, config.default_prompt.as_deref()).map_err(|e| {
            DigestError::Config(format!(
                "cannot read prompts from {}: {e}",
                config.prompts_dir.display()
            ))
        })?;

    let focus = FocusSet::new(&cli.users);
    let sink = ReportSink::from_output(cli.output);

    tracing::info!(
        chat = %options.request.chat,
        limit = options.request.limit,
        focus = ?focus.users(),
        "starting digest"
    );

    let fetcher = TelegramFetcher::connect(&config.telegram)?;
    let report = fetch_and_summarize(
        &fetcher,
        backend.as_ref(),
        &prompts,
        &options.request,
        &focus,
    )
    .await;
    fetcher.disconnect();

    let report = report?;
    sink.write(&report.render(cli.format)?)?;

    Ok(())
}

async fn fetch_and_summarize(
    fetcher: &TelegramFetcher,
    backend: Option<&Backend>,
    prompts: &PromptSet,
    request: &FetchRequest,
    focus: &FocusSet,
) -> DigestResult<Report> {
    fetcher.authorize().await?;
    digest::run(fetcher, backend, prompts, request, focus).await
}
