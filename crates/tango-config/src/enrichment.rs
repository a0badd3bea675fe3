use std::env;

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_suggestion_count() -> usize {
    3
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct EnrichmentConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// How many words a suggestion request asks for
    #[serde(default = "default_suggestion_count")]
    pub suggestion_count: usize,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            api_key: String::new(),
            api_url: default_api_url(),
            model: default_model(),
            suggestion_count: default_suggestion_count(),
        }
    }
}

impl EnrichmentConfig {
    pub fn apply_env(&mut self) {
        if let Ok(key) = env::var("GEMINI_API_KEY").or_else(|_| env::var("API_KEY")) {
            self.api_key = key;
        }
    }
}
