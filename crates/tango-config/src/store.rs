use std::env;

use serde::{Deserialize, Serialize};

fn default_table() -> String {
    "words".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StoreConfig {
    /// Supabase project URL
    #[serde(default)]
    pub url: String,
    /// Public anon key, sent as both `apikey` and bearer token
    #[serde(default)]
    pub anon_key: String,
    #[serde(default = "default_table")]
    pub table: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            table: default_table(),
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    pub fn apply_env(&mut self) {
        if let Ok(url) = env::var("SUPABASE_URL") {
            self.url = url;
        }
        if let Ok(key) = env::var("SUPABASE_ANON_KEY") {
            self.anon_key = key;
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.anon_key.is_empty()
    }
}
