use std::env;

use serde::{Deserialize, Serialize};

fn default_locale() -> String {
    "zh-CN".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
        }
    }
}

impl UiConfig {
    pub fn apply_env(&mut self) {
        if let Ok(locale) = env::var("TANGO_LOCALE") {
            self.locale = locale;
        }
    }
}
