use std::sync::Arc;

use tango_config::Config;
use tango_core::library::WordLibrary;
use tango_core::store::WordStore;
use tango_enrich::Enricher;
use tango_lang_japanese::GeminiEnricher;
use tokio::sync::RwLock;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub library: Arc<WordLibrary>,
    pub store: Arc<dyn WordStore>,
    pub enricher: Option<Arc<dyn Enricher>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let store = tango_store::connect(&config.store, config.offline);

        let enricher: Option<Arc<dyn Enricher>> =
            if config.enrichment.enabled && !config.enrichment.api_key.is_empty() {
                Some(Arc::new(GeminiEnricher::new(
                    config.enrichment.api_key.clone(),
                    config.enrichment.api_url.clone(),
                    config.enrichment.model.clone(),
                )))
            } else {
                tracing::warn!("Enrichment disabled or no API key, smart fill unavailable");
                None
            };

        Self::with_parts(config, store, enricher)
    }

    pub fn with_parts(
        config: Config,
        store: Arc<dyn WordStore>,
        enricher: Option<Arc<dyn Enricher>>,
    ) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            library: Arc::new(WordLibrary::default()),
            store,
            enricher,
        }
    }
}
