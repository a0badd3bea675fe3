use std::env;

use serde::{Deserialize, Serialize};

use self::enrichment::EnrichmentConfig;
use self::practice::PracticeConfig;
use self::store::StoreConfig;
use self::ui::UiConfig;

pub mod enrichment;
pub mod practice;
pub mod store;
pub mod ui;

#[derive(Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub enrichment: EnrichmentConfig,
    pub practice: PracticeConfig,
    pub ui: UiConfig,

    /// Use the in-memory sample store instead of Supabase
    pub offline: bool,
}

impl Config {
    pub fn new() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Environment wins over profile values, so secrets never have to live
    /// in a profile file
    pub fn apply_env(&mut self) {
        self.store.apply_env();
        self.enrichment.apply_env();
        self.ui.apply_env();

        if let Some(delay) = env::var("TANGO_ADVANCE_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.practice.advance_delay_ms = delay;
        }

        if env::var("TANGO_OFFLINE").is_ok_and(|v| v == "1" || v == "true") {
            self.offline = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_profile_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "practice": { "advance_delay_ms": 50 } }"#).unwrap();

        assert_eq!(config.practice.advance_delay_ms, 50);
        assert_eq!(config.practice.progress_step, 10);
        assert_eq!(config.practice.anti_cheat.burst_min_keystrokes, 50);
        assert_eq!(config.store.table, "words");
        assert_eq!(config.enrichment.model, "gemini-3-flash-preview");
        assert_eq!(config.ui.locale, "zh-CN");
        assert!(!config.offline);
    }

    #[test]
    fn store_needs_url_and_key() {
        let mut store = StoreConfig::default();
        assert!(!store.is_configured());

        store.url = "https://example.supabase.co".to_string();
        assert!(!store.is_configured());

        store.anon_key = "anon".to_string();
        assert!(store.is_configured());
    }
}
