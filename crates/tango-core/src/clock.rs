use tokio::time::Instant;

/// Wall-clock timer for a practice session.
///
/// Starts on the first keystroke, never pauses. Idle time counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionClock {
    started_at: Option<Instant>,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `now` as the start. No-op once started.
    pub fn start(&mut self, now: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Seconds since start, 0.0 if never started
    pub fn elapsed_seconds(&self, now: Instant) -> f64 {
        self.started_at
            .map(|start| now.saturating_duration_since(start).as_secs_f64())
            .unwrap_or(0.0)
    }
}
