use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tango_core::form::AddWordForm;
use tango_core::session::PracticeSession;
use tango_types::{AppEvent, KeyInput, View, WordSuggestion};

use crate::i18n::t;
use crate::io::{Edit, LineEditor, parse_line};
use crate::state::AppState;

pub mod add_word;
pub mod practice;
pub mod words;

use add_word::{handle_apply_suggestion, handle_smart_fill, handle_submit, handle_suggest};
use practice::{clear_line, handle_advance, handle_skip, handle_start, handle_text_input};
use words::handle_refresh;

/// Screen-local state owned by the event loop
#[derive(Default)]
pub struct Screens {
    pub view: Option<View>,
    pub practice: Option<PracticeSession>,
    /// Bumped on every start so stale advance timers can be told apart
    pub session_id: u64,
    pub line: LineEditor,
    pub form: AddWordForm,
    pub suggestions: Vec<WordSuggestion>,
}

/// App's main loop
///
/// `loopback` feeds events back into this loop; the practice screen uses it to
/// schedule the delayed advance after a match.
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    loopback: AsyncSender<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let mut screens = Screens::default();

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let mut next = Some(ui_to_app_rx.recv().await?);

        // a submitted command line yields one follow-up event
        while let Some(event) = next.take() {
            tracing::debug!(
                "[EVENT_LOOP] Event received: {:?}",
                std::mem::discriminant(&event)
            );

            if matches!(event, AppEvent::Quit) {
                tracing::info!("[EVENT_LOOP] Quit requested");
                return Ok(());
            }

            next = handle_events(&state, &mut screens, &loopback, &app_to_ui_tx, event).await?;
        }
    }
}

async fn handle_events(
    state: &Arc<AppState>,
    screens: &mut Screens,
    loopback: &AsyncSender<AppEvent>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<Option<AppEvent>> {
    match event {
        AppEvent::StartPractice => {
            navigate(screens, View::Practice, app_to_ui_tx).await?;
            screens.session_id += 1;
            clear_line(&mut screens.line, app_to_ui_tx).await?;
            handle_start(state, &mut screens.practice, app_to_ui_tx).await?;
        }
        AppEvent::Key(key) => {
            return handle_key(state, screens, key, loopback, app_to_ui_tx).await;
        }
        AppEvent::TextInput(text) => {
            handle_text_input(
                state,
                &mut screens.practice,
                screens.session_id,
                text,
                loopback,
            )
            .await?;
        }
        AppEvent::AdvanceDue(session_id) => {
            if session_id != screens.session_id {
                tracing::debug!("Advance for ended session {} ignored", session_id);
                return Ok(None);
            }
            if let Some(view) =
                handle_advance(&mut screens.practice, &mut screens.line, app_to_ui_tx).await?
            {
                navigate(screens, view, app_to_ui_tx).await?;
            }
        }
        AppEvent::Skip => {
            handle_skip(&mut screens.practice, app_to_ui_tx).await?;
        }
        AppEvent::RefreshWords => {
            handle_refresh(state, app_to_ui_tx).await?;
        }
        AppEvent::EditField { field, value } => {
            screens.form.set_field(field, value);
            app_to_ui_tx
                .send(AppEvent::DraftChanged(screens.form.draft()))
                .await?;
        }
        AppEvent::SmartFill => {
            handle_smart_fill(state, &mut screens.form, app_to_ui_tx).await?;
        }
        AppEvent::Suggest => {
            handle_suggest(state, &screens.form, &mut screens.suggestions, app_to_ui_tx).await?;
        }
        AppEvent::ApplySuggestion(index) => {
            handle_apply_suggestion(&mut screens.form, &screens.suggestions, index, app_to_ui_tx)
                .await?;
        }
        AppEvent::SubmitWord => {
            if handle_submit(state, &mut screens.form, app_to_ui_tx).await? {
                navigate(screens, View::Library, app_to_ui_tx).await?;
            }
        }
        AppEvent::Navigate(view) => {
            navigate(screens, view, app_to_ui_tx).await?;
        }
        AppEvent::Quit => {}
        // UI-only events, ignore in backend
        AppEvent::WordsLoaded(_)
        | AppEvent::ShowPrompt(_)
        | AppEvent::PracticeCompleted(_)
        | AppEvent::CheatDetected
        | AppEvent::DraftChanged(_)
        | AppEvent::ShowSuggestions(_)
        | AppEvent::WordAdded(_)
        | AppEvent::StatusUpdate(_)
        | AppEvent::InputChanged(_) => {}
    }

    Ok(None)
}

/// Edit the input line. Every change is a practice input event; Enter on a
/// `:` line returns the parsed command for the loop to run next.
async fn handle_key(
    state: &Arc<AppState>,
    screens: &mut Screens,
    key: KeyInput,
    loopback: &AsyncSender<AppEvent>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<Option<AppEvent>> {
    match screens.line.apply(key) {
        Edit::Unchanged => Ok(None),
        Edit::Changed(text) => {
            app_to_ui_tx.send(AppEvent::InputChanged(text.clone())).await?;
            // clearing the line isn't typing
            if !screens.line.is_command() && key != KeyInput::Clear {
                handle_text_input(
                    state,
                    &mut screens.practice,
                    screens.session_id,
                    text,
                    loopback,
                )
                .await?;
            }
            Ok(None)
        }
        Edit::Submitted(line) => {
            app_to_ui_tx.send(AppEvent::InputChanged(String::new())).await?;
            let command = parse_line(&line);
            if command.is_none() {
                status(state, app_to_ui_tx, "input.unknown_command", &[("line", line)]).await?;
            }
            Ok(command)
        }
    }
}

/// Leaving the practice screen drops its session. Progress writes already in
/// flight keep running.
pub async fn navigate(
    screens: &mut Screens,
    view: View,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    if view != View::Practice && screens.practice.take().is_some() {
        tracing::debug!("Practice session dropped on navigation to {:?}", view);
    }
    if view == View::AddWord && screens.view != Some(View::AddWord) {
        screens.form = AddWordForm::new();
        screens.suggestions.clear();
    }
    screens.view = Some(view);

    app_to_ui_tx.send(AppEvent::Navigate(view)).await?;
    Ok(())
}

pub async fn status(
    state: &AppState,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    key: &str,
    params: &[(&str, String)],
) -> anyhow::Result<()> {
    let locale = state.config.read().await.ui.locale.clone();
    app_to_ui_tx
        .send(AppEvent::StatusUpdate(t(key, params, &locale)))
        .await?;
    Ok(())
}
