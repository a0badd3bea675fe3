use std::sync::Arc;

use kanal::AsyncSender;
use tango_types::AppEvent;

use crate::state::AppState;

/// Reload the word list from the store. A failed fetch comes back empty and
/// still replaces the library, same as a fresh start with no connection.
pub async fn handle_refresh(
    state: &Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let words = state.store.fetch_all().await;
    let count = words.len();
    tracing::info!("Loaded {} words", count);

    state.library.replace(words);
    app_to_ui_tx.send(AppEvent::WordsLoaded(count)).await?;

    Ok(())
}
