use std::sync::Arc;

use kanal::AsyncSender;
use tango_core::practice::{advance_delay, spawn_progress_update};
use tango_core::session::{AdvanceOutcome, Completion, InputOutcome, PracticeSession};
use tango_types::{AppEvent, View};
use tokio::time::Instant;

use crate::events::status;
use crate::io::LineEditor;
use crate::state::AppState;

/// Fresh session over the library as it is right now
pub async fn handle_start(
    state: &Arc<AppState>,
    practice: &mut Option<PracticeSession>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let words = state.library.snapshot().to_vec();
    let session = {
        let config = state.config.read().await;
        PracticeSession::new(words, &config.practice)
    };

    tracing::info!("Practice started with {} words", session.total());

    match session.prompt() {
        Some(prompt) => app_to_ui_tx.send(AppEvent::ShowPrompt(prompt)).await?,
        None => status(state, app_to_ui_tx, "practice.empty", &[]).await?,
    }

    *practice = Some(session);
    Ok(())
}

pub async fn handle_text_input(
    state: &Arc<AppState>,
    practice: &mut Option<PracticeSession>,
    session_id: u64,
    text: String,
    loopback: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let Some(session) = practice.as_mut() else {
        tracing::debug!("TextInput outside a practice session, ignoring");
        return Ok(());
    };

    match session.handle_input(&text, Instant::now()) {
        InputOutcome::Matched(update) => {
            // Not awaited: the advance is scheduled whether or not the write lands
            spawn_progress_update(state.store.clone(), state.library.clone(), update);

            let delay = advance_delay(&state.config.read().await.practice);
            let tx = loopback.clone();
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                if let Err(e) = tx.send(AppEvent::AdvanceDue(session_id)).await {
                    tracing::warn!("Failed to schedule advance: {}", e);
                }
            });
        }
        InputOutcome::NoMatch | InputOutcome::Pending => {}
        InputOutcome::Ignored => {
            tracing::debug!("Input after session end ignored");
        }
    }

    Ok(())
}

/// Returns the view to move to when the session finished. The input line is
/// cleared whenever the session moves on.
pub async fn handle_advance(
    practice: &mut Option<PracticeSession>,
    line: &mut LineEditor,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<Option<View>> {
    let Some(session) = practice.as_mut() else {
        // learner left the screen during the delay
        return Ok(None);
    };

    match session.advance(Instant::now()) {
        AdvanceOutcome::Advanced { .. } => {
            clear_line(line, app_to_ui_tx).await?;
            if let Some(prompt) = session.prompt() {
                app_to_ui_tx.send(AppEvent::ShowPrompt(prompt)).await?;
            }
            Ok(None)
        }
        AdvanceOutcome::Completed(Completion::Clean(stats)) => {
            clear_line(line, app_to_ui_tx).await?;
            app_to_ui_tx.send(AppEvent::PracticeCompleted(stats)).await?;
            Ok(Some(View::Stats))
        }
        AdvanceOutcome::Completed(Completion::Flagged) => {
            clear_line(line, app_to_ui_tx).await?;
            app_to_ui_tx.send(AppEvent::CheatDetected).await?;
            Ok(Some(View::Home))
        }
        AdvanceOutcome::NotPending => Ok(None),
    }
}

pub async fn clear_line(
    line: &mut LineEditor,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    line.clear();
    app_to_ui_tx.send(AppEvent::InputChanged(String::new())).await?;
    Ok(())
}

pub async fn handle_skip(
    practice: &mut Option<PracticeSession>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    if let Some(prompt) = practice.as_mut().and_then(|s| s.skip()) {
        app_to_ui_tx.send(AppEvent::ShowPrompt(prompt)).await?;
    }
    Ok(())
}
