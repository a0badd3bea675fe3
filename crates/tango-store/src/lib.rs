mod client;
mod row;

pub use client::SupabaseClient;
pub use row::{ProgressPatch, RowId, WordRow};

use std::sync::Arc;

use tango_core::store::{MemoryStore, WordStore};

/// Pick the store for this run: Supabase when configured, otherwise the
/// in-memory sample store
pub fn connect(config: &tango_config::store::StoreConfig, offline: bool) -> Arc<dyn WordStore> {
    if offline || !config.is_configured() {
        if !offline {
            tracing::warn!("Supabase URL or anon key missing, falling back to offline store");
        }
        return Arc::new(MemoryStore::with_samples());
    }

    Arc::new(SupabaseClient::new(
        config.url.clone(),
        config.anon_key.clone(),
        config.table.clone(),
    ))
}
