//! Interclip Library
//!
//! 短链接 / 短码工具

pub mod bootstrap;
pub mod cli;
pub mod clipboard;
pub mod presenter;

use anyhow::Context;
use std::io::Write;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use ic_app::ClipWorkflow;
use ic_core::workflow::WorkflowState;

pub use cli::Cli;

/// Run the submissions named on the command line, or one per stdin line.
///
/// Exits non-zero when any submission failed. Cancelled submissions do not count as failures.
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    run_with_output(cli, &mut std::io::stdout()).await
}

/// [`run`] with results written to `out` instead of stdout.
pub async fn run_with_output<W: Write + Send>(cli: Cli, out: &mut W) -> anyhow::Result<ExitCode> {
    let mut config = bootstrap::resolve_config(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    let workflow = bootstrap::build_workflow(&config)?;
    let progress = spawn_progress_reporter(workflow.subscribe());

    let all_ok = match &cli.input {
        Some(input) => submit_and_report(&workflow, input, cli.copy, out).await?,
        None => {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            let mut all_ok = true;
            while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
                if line.trim().is_empty() {
                    continue;
                }
                all_ok &= submit_and_report(&workflow, &line, cli.copy, out).await?;
            }
            all_ok
        }
    };

    progress.abort();
    Ok(if all_ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

async fn submit_and_report<W: Write + Send>(
    workflow: &ClipWorkflow,
    input: &str,
    copy: bool,
    out: &mut W,
) -> anyhow::Result<bool> {
    let outcome = workflow.submit(input).await;
    presenter::print(&presenter::render(&outcome), out).context("Failed to write result")?;

    if copy {
        if let Some(text) = presenter::clipboard_text(&outcome) {
            if let Err(e) = clipboard::copy_text(text) {
                tracing::warn!(error = %e, "Could not copy to clipboard");
            }
        }
    }

    Ok(presenter::is_ok(&outcome))
}

/// Echo step changes to stderr while a submission runs.
fn spawn_progress_reporter(mut states: watch::Receiver<WorkflowState>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut last = None;
        while states.changed().await.is_ok() {
            let status = states.borrow_and_update().status_text();
            if let Some(text) = status.filter(|text| last != Some(*text)) {
                eprintln!("{text}...");
            }
            last = status;
        }
    })
}
