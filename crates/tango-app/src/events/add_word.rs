use std::sync::Arc;

use kanal::AsyncSender;
use tango_core::error::FormError;
use tango_core::form::AddWordForm;
use tango_types::{AppEvent, WordSuggestion};

use crate::events::status;
use crate::state::AppState;

/// Fill kana, romaji and translation from the kanji field. Failures leave
/// the form as it was.
pub async fn handle_smart_fill(
    state: &Arc<AppState>,
    form: &mut AddWordForm,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let Some(word) = form.enrichment_query() else {
        return Ok(());
    };

    let Some(enricher) = state.enricher.as_ref() else {
        return status(state, app_to_ui_tx, "enrich.unavailable", &[]).await;
    };

    match enricher.enrich(&word).await {
        Ok(details) => {
            form.apply_details(details);
            app_to_ui_tx
                .send(AppEvent::DraftChanged(form.draft()))
                .await?;
        }
        Err(e) => {
            tracing::error!("AI generation failed for '{}': {}", word, e);
            status(state, app_to_ui_tx, "enrich.failed", &[]).await?;
        }
    }

    Ok(())
}

/// Related words when the kanji field is filled, beginner words otherwise
pub async fn handle_suggest(
    state: &Arc<AppState>,
    form: &AddWordForm,
    suggestions: &mut Vec<WordSuggestion>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let Some(enricher) = state.enricher.as_ref() else {
        return status(state, app_to_ui_tx, "enrich.unavailable", &[]).await;
    };

    let count = state.config.read().await.enrichment.suggestion_count;
    let seed = form.enrichment_query();

    match enricher.suggest(seed.as_deref(), &form.category, count).await {
        Ok(found) => {
            *suggestions = found;
            app_to_ui_tx
                .send(AppEvent::ShowSuggestions(suggestions.clone()))
                .await?;
        }
        Err(e) => {
            tracing::error!("AI suggestions failed: {}", e);
            status(state, app_to_ui_tx, "enrich.failed", &[]).await?;
        }
    }

    Ok(())
}

pub async fn handle_apply_suggestion(
    form: &mut AddWordForm,
    suggestions: &[WordSuggestion],
    index: usize,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let Some(suggestion) = suggestions.get(index) else {
        tracing::warn!("No suggestion at index {}", index);
        return Ok(());
    };

    form.apply_suggestion(suggestion.clone());
    app_to_ui_tx
        .send(AppEvent::DraftChanged(form.draft()))
        .await?;

    Ok(())
}

/// Validate and insert. Returns true once the store accepted the word.
pub async fn handle_submit(
    state: &Arc<AppState>,
    form: &mut AddWordForm,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<bool> {
    let item = match form.submit() {
        Ok(item) => item,
        Err(FormError::MissingField(field)) => {
            status(
                state,
                app_to_ui_tx,
                "add_word.missing",
                &[("field", field.to_string())],
            )
            .await?;
            return Ok(false);
        }
    };

    let Some(word) = state.store.insert_one(item).await else {
        status(state, app_to_ui_tx, "add_word.failed", &[]).await?;
        return Ok(false);
    };

    tracing::info!("Added word {} ({})", word.kanji, word.id);
    state.library.prepend(word.clone());
    *form = AddWordForm::new();

    status(
        state,
        app_to_ui_tx,
        "add_word.saved",
        &[("kanji", word.kanji.clone())],
    )
    .await?;
    app_to_ui_tx.send(AppEvent::WordAdded(word)).await?;

    Ok(true)
}
