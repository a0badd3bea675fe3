use serde::{Deserialize, Serialize};

fn default_advance_delay_ms() -> u64 {
    300
}

fn default_progress_step() -> u8 {
    10
}

fn default_chars_per_word() -> u32 {
    5
}

fn default_skip_wraps() -> bool {
    true
}

fn default_max_chars_per_second() -> f64 {
    10.0
}

fn default_burst_min_keystrokes() -> u64 {
    50
}

fn default_burst_max_seconds() -> f64 {
    2.0
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct PracticeConfig {
    /// Delay between an accepted match and moving to the next word
    #[serde(default = "default_advance_delay_ms")]
    pub advance_delay_ms: u64,
    /// Mastery gained per accepted match, capped at 100
    #[serde(default = "default_progress_step")]
    pub progress_step: u8,
    #[serde(default = "default_chars_per_word")]
    pub chars_per_word: u32,
    /// Skipping the last word jumps back to the first one
    #[serde(default = "default_skip_wraps")]
    pub skip_wraps: bool,
    #[serde(default)]
    pub anti_cheat: AntiCheatConfig,
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            advance_delay_ms: default_advance_delay_ms(),
            progress_step: default_progress_step(),
            chars_per_word: default_chars_per_word(),
            skip_wraps: default_skip_wraps(),
            anti_cheat: AntiCheatConfig::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
#[serde(default)]
pub struct AntiCheatConfig {
    /// Sustained input rate above this is flagged
    #[serde(default = "default_max_chars_per_second")]
    pub max_chars_per_second: f64,
    /// Burst rule: at least this many keystrokes...
    #[serde(default = "default_burst_min_keystrokes")]
    pub burst_min_keystrokes: u64,
    /// ...in less than this many seconds
    #[serde(default = "default_burst_max_seconds")]
    pub burst_max_seconds: f64,
}

impl Default for AntiCheatConfig {
    fn default() -> Self {
        Self {
            max_chars_per_second: default_max_chars_per_second(),
            burst_min_keystrokes: default_burst_min_keystrokes(),
            burst_max_seconds: default_burst_max_seconds(),
        }
    }
}
