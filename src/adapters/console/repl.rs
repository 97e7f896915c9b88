//! Line loop driving the intake service.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::application::handlers::intake::{IntakeRequest, IntakeService, TurnOutcome};
use crate::domain::foundation::{SessionKey, Timestamp};
use crate::domain::intake::{Role, Style};

/// Inputs that end the loop, compared case-insensitively.
pub const EXIT_WORDS: [&str; 2] = ["exit", "salir"];

/// Per-run console settings.
#[derive(Debug, Clone)]
pub struct ConsoleOptions {
    pub session_key: SessionKey,
    pub role: Role,
    pub style: Style,
    pub temperature: f32,
    /// Reports are saved here when set.
    pub report_output_dir: Option<PathBuf>,
    /// Runs the report trigger when an exit word is typed.
    pub report_on_exit: bool,
}

/// Runs the loop until an exit word or end of input.
pub async fn run_console<R, W>(
    service: Arc<IntakeService>,
    options: ConsoleOptions,
    input: R,
    mut output: W,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    output
        .write_all(
            format!(
                "💬 Session {}. Type 'exit' to quit.\n\n",
                options.session_key
            )
            .as_bytes(),
        )
        .await?;

    loop {
        output.write_all("👤 You: ".as_bytes()).await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if EXIT_WORDS.iter().any(|word| line.eq_ignore_ascii_case(word)) {
            if options.report_on_exit {
                report_before_exit(&service, &options, &mut output).await?;
            }
            break;
        }

        let outcome = service
            .submit(IntakeRequest {
                session_key: options.session_key.clone(),
                query: line.to_string(),
                role: options.role,
                style: options.style,
                temperature: options.temperature,
            })
            .await;

        render(&mut output, &outcome, options.report_output_dir.as_deref()).await?;
    }

    output.write_all("👋 Bye.\n".as_bytes()).await?;
    output.flush().await
}

/// Renders a closing report when the session has something to report.
async fn report_before_exit<W>(
    service: &IntakeService,
    options: &ConsoleOptions,
    output: &mut W,
) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    match service.generate_report(&options.session_key).await {
        Ok(outcome) if outcome.report.is_some() => {
            render(output, &outcome, options.report_output_dir.as_deref()).await
        }
        Ok(outcome) => {
            tracing::debug!(session = %options.session_key, kind = ?outcome.kind, "No report on exit");
            Ok(())
        }
        Err(err) => {
            tracing::debug!(session = %options.session_key, error = %err, "No report on exit");
            Ok(())
        }
    }
}

async fn render<W>(output: &mut W, outcome: &TurnOutcome, report_dir: Option<&Path>) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    output
        .write_all(format!("🤖 Agent: {}\n\n", outcome.reply).as_bytes())
        .await?;

    let Some(report) = outcome.report.as_deref() else {
        return Ok(());
    };

    output
        .write_all(format!("=== REPORT ===\n\n{}\n\n", report).as_bytes())
        .await?;

    if let Some(dir) = report_dir {
        match save_report(dir, outcome.session.key(), report).await {
            Ok(path) => {
                tracing::info!(session = %outcome.session.key(), path = %path.display(), "Report saved");
                output
                    .write_all(format!("📄 Saved to {}\n\n", path.display()).as_bytes())
                    .await?;
            }
            Err(err) => {
                tracing::warn!(session = %outcome.session.key(), error = %err, "Failed to save report");
                output
                    .write_all(format!("⚠️ Could not save the report: {}\n\n", err).as_bytes())
                    .await?;
            }
        }
    }
    Ok(())
}

/// Writes `report` to `<dir>/report-<key>-<timestamp>.md`.
async fn save_report(dir: &Path, key: &SessionKey, report: &str) -> io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(format!(
        "report-{}-{}.md",
        key.as_str(),
        Timestamp::now().file_stamp()
    ));
    tokio::fs::write(&path, report).await?;
    Ok(path)
}
