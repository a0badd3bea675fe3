use tango_config::practice::AntiCheatConfig;

/// Which threshold a session crossed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheatRule {
    /// Sustained rate above `max_chars_per_second`
    Rate,
    /// Many keystrokes in a very short window, paste-like
    Burst,
}

/// Classifies a finished session as legitimate or suspicious.
///
/// Either rule alone is enough to flag. Very fast human typists can trip it.
#[derive(Debug, Clone, Copy)]
pub struct AntiCheatPolicy {
    max_chars_per_second: f64,
    burst_min_keystrokes: u64,
    burst_max_seconds: f64,
}

impl Default for AntiCheatPolicy {
    fn default() -> Self {
        Self::new(&AntiCheatConfig::default())
    }
}

impl AntiCheatPolicy {
    pub fn new(config: &AntiCheatConfig) -> Self {
        Self {
            max_chars_per_second: config.max_chars_per_second,
            burst_min_keystrokes: config.burst_min_keystrokes,
            burst_max_seconds: config.burst_max_seconds,
        }
    }

    pub fn is_cheating(&self, keystrokes: u64, elapsed_seconds: f64) -> bool {
        self.violated_rule(keystrokes, elapsed_seconds).is_some()
    }

    pub fn violated_rule(&self, keystrokes: u64, elapsed_seconds: f64) -> Option<CheatRule> {
        // 0/0 is NaN and compares false, n/0 is inf and compares true
        let rate = keystrokes as f64 / elapsed_seconds;
        if rate > self.max_chars_per_second {
            return Some(CheatRule::Rate);
        }

        if keystrokes >= self.burst_min_keystrokes && elapsed_seconds < self.burst_max_seconds {
            return Some(CheatRule::Burst);
        }

        None
    }
}
