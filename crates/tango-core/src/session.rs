//! Practice session state machine
//!
//! `Idle` until the first input event, then `Active` while the learner works
//! through `items`, ending in `CompletedOk` or `CompletedFlagged`.
//!
//! The session never touches the network or sleeps. An accepted match returns
//! a [`ProgressUpdate`] for the caller to dispatch and leaves the session
//! waiting for [`PracticeSession::advance`], which the caller fires after the
//! configured delay.

use tango_config::practice::PracticeConfig;
use tango_types::{PracticePrompt, PracticeStats, VocabularyItem};
use tokio::time::Instant;

use crate::anticheat::AntiCheatPolicy;
use crate::clock::SessionClock;
use crate::matcher::is_match;

/// Always 100: wrong answers are never counted, only exact matches advance
const FIXED_ACCURACY: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Active,
    CompletedOk(PracticeStats),
    CompletedFlagged,
}

impl SessionPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::CompletedOk(_) | Self::CompletedFlagged)
    }
}

/// New mastery value for one item, to be written to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub id: String,
    pub progress: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    NoMatch,
    Matched(ProgressUpdate),
    /// Counted, but a match is already waiting to advance
    Pending,
    /// Session is over
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Clean(PracticeStats),
    Flagged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Advanced { position: usize, total: usize },
    Completed(Completion),
    /// No accepted match was waiting
    NotPending,
}

#[derive(Debug, Clone, Copy)]
struct PendingAdvance {
    /// Captured at match time, so a skip during the delay can't change it
    completes: bool,
}

pub struct PracticeSession {
    items: Vec<VocabularyItem>,
    position: usize,
    input_buffer: String,
    keystroke_count: u64,
    clock: SessionClock,
    phase: SessionPhase,
    pending: Option<PendingAdvance>,
    policy: AntiCheatPolicy,
    progress_step: u8,
    chars_per_word: u32,
    skip_wraps: bool,
}

impl PracticeSession {
    pub fn new(items: Vec<VocabularyItem>, config: &PracticeConfig) -> Self {
        Self {
            items,
            position: 0,
            input_buffer: String::new(),
            keystroke_count: 0,
            clock: SessionClock::new(),
            phase: SessionPhase::Idle,
            pending: None,
            policy: AntiCheatPolicy::new(&config.anti_cheat),
            progress_step: config.progress_step,
            chars_per_word: config.chars_per_word.max(1),
            skip_wraps: config.skip_wraps,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    pub fn keystroke_count(&self) -> u64 {
        self.keystroke_count
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// `None` when the session has no items
    pub fn current_item(&self) -> Option<&VocabularyItem> {
        self.items.get(self.position)
    }

    pub fn prompt(&self) -> Option<PracticePrompt> {
        self.current_item().map(|item| PracticePrompt {
            position: self.position,
            total: self.items.len(),
            kanji: item.kanji.clone(),
            romaji: item.romaji.clone(),
        })
    }

    pub fn final_stats(&self) -> Option<PracticeStats> {
        match self.phase {
            SessionPhase::CompletedOk(stats) => Some(stats),
            _ => None,
        }
    }

    /// One input-change event with the full current buffer
    pub fn handle_input(&mut self, input: &str, now: Instant) -> InputOutcome {
        if self.phase.is_terminal() {
            return InputOutcome::Ignored;
        }

        self.keystroke_count += 1;
        self.clock.start(now);
        self.phase = SessionPhase::Active;
        self.input_buffer = input.to_lowercase();

        if self.pending.is_some() {
            return InputOutcome::Pending;
        }

        let Some(item) = self.items.get(self.position) else {
            return InputOutcome::NoMatch;
        };

        if !is_match(input, Some(item)) {
            return InputOutcome::NoMatch;
        }

        let update = ProgressUpdate {
            id: item.id.clone(),
            progress: item.progress.saturating_add(self.progress_step).min(100),
        };
        self.pending = Some(PendingAdvance {
            completes: self.position + 1 >= self.items.len(),
        });

        tracing::debug!(
            "Matched '{}' at {}/{}",
            item.kanji,
            self.position + 1,
            self.items.len()
        );

        InputOutcome::Matched(update)
    }

    /// Move past the last accepted match, or finish the session
    pub fn advance(&mut self, now: Instant) -> AdvanceOutcome {
        let Some(pending) = self.pending.take() else {
            return AdvanceOutcome::NotPending;
        };

        if !pending.completes {
            self.position += 1;
            self.input_buffer.clear();
            return AdvanceOutcome::Advanced {
                position: self.position,
                total: self.items.len(),
            };
        }

        match self.evaluate_completion(now) {
            Some(completion) => AdvanceOutcome::Completed(completion),
            None => AdvanceOutcome::NotPending,
        }
    }

    /// Jump to the next item without answering. Never completes the session.
    pub fn skip(&mut self) -> Option<PracticePrompt> {
        if self.phase.is_terminal() || self.items.is_empty() {
            return None;
        }

        let last = self.items.len() - 1;
        self.position = if self.skip_wraps {
            (self.position + 1) % self.items.len()
        } else {
            (self.position + 1).min(last)
        };

        self.prompt()
    }

    fn evaluate_completion(&mut self, now: Instant) -> Option<Completion> {
        if !self.clock.is_started() {
            tracing::warn!("Completion requested before the session clock started");
            return None;
        }

        let elapsed = self.clock.elapsed_seconds(now);
        let keystrokes = self.keystroke_count;

        if let Some(rule) = self.policy.violated_rule(keystrokes, elapsed) {
            tracing::warn!(
                "Session flagged ({:?}): {} keystrokes in {:.2}s",
                rule,
                keystrokes,
                elapsed
            );
            self.phase = SessionPhase::CompletedFlagged;
            return Some(Completion::Flagged);
        }

        let stats = PracticeStats {
            words_per_minute: words_per_minute(keystrokes, elapsed, self.chars_per_word),
            accuracy: FIXED_ACCURACY,
        };
        tracing::info!(
            "Session complete: {} wpm over {:.1}s",
            stats.words_per_minute,
            elapsed
        );
        self.phase = SessionPhase::CompletedOk(stats);

        Some(Completion::Clean(stats))
    }
}

/// `round((keystrokes / chars_per_word) / (elapsed / 60))`, 0 for no elapsed time
pub fn words_per_minute(keystrokes: u64, elapsed_seconds: f64, chars_per_word: u32) -> u32 {
    if elapsed_seconds <= 0.0 {
        return 0;
    }

    let words = keystrokes as f64 / chars_per_word as f64;
    (words / (elapsed_seconds / 60.0)).round() as u32
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn word(id: &str, kanji: &str, kana: &str, romaji: &str, progress: u8) -> VocabularyItem {
        VocabularyItem {
            id: id.to_string(),
            kanji: kanji.to_string(),
            kana: kana.to_string(),
            romaji: romaji.to_string(),
            translation: String::new(),
            category: "JLPT N5".to_string(),
            progress,
            last_practiced: None,
        }
    }

    fn three_words() -> Vec<VocabularyItem> {
        vec![
            word("1", "日本語", "にほんご", "nihongo", 45),
            word("2", "明日", "あした", "ashita", 95),
            word("3", "海", "うみ", "umi", 100),
        ]
    }

    fn secs(t0: Instant, s: u64) -> Instant {
        t0 + Duration::from_secs(s)
    }

    #[test]
    fn new_session_is_idle_with_clock_unset() {
        let session = PracticeSession::new(three_words(), &PracticeConfig::default());

        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(session.position(), 0);
        assert_eq!(session.keystroke_count(), 0);
        assert!(!session.clock().is_started());
    }

    #[test]
    fn keystrokes_count_every_event() {
        let t0 = Instant::now();
        let mut session = PracticeSession::new(three_words(), &PracticeConfig::default());

        let inputs = ["n", "ni", "nih", "niho", "nihon", "nihong", "nihongo"];
        for (i, input) in inputs.iter().enumerate() {
            session.handle_input(input, secs(t0, i as u64));
        }
        // typed during the advance delay
        session.handle_input("x", secs(t0, 8));

        assert_eq!(session.keystroke_count(), inputs.len() as u64 + 1);
        assert_eq!(session.phase(), SessionPhase::Active);
    }

    #[test]
    fn clock_starts_on_first_input_only() {
        let t0 = Instant::now();
        let mut session = PracticeSession::new(three_words(), &PracticeConfig::default());

        session.handle_input("a", t0);
        session.handle_input("ab", secs(t0, 3));
        session.handle_input("abc", secs(t0, 7));

        assert_eq!(session.clock().started_at(), Some(t0));
    }

    #[test]
    fn match_produces_capped_progress_update() {
        let t0 = Instant::now();
        let mut session = PracticeSession::new(three_words(), &PracticeConfig::default());

        let outcome = session.handle_input("NIHONGO", t0);
        assert_eq!(
            outcome,
            InputOutcome::Matched(ProgressUpdate {
                id: "1".to_string(),
                progress: 55,
            })
        );
        session.advance(secs(t0, 1));

        let outcome = session.handle_input("あした", secs(t0, 2));
        assert_eq!(
            outcome,
            InputOutcome::Matched(ProgressUpdate {
                id: "2".to_string(),
                progress: 100,
            })
        );
    }

    #[test]
    fn one_update_per_match_while_pending() {
        let t0 = Instant::now();
        let mut session = PracticeSession::new(three_words(), &PracticeConfig::default());

        assert!(matches!(
            session.handle_input("nihongo", t0),
            InputOutcome::Matched(_)
        ));
        assert_eq!(session.handle_input("nihongo", t0), InputOutcome::Pending);
        assert_eq!(session.handle_input("nihongo", t0), InputOutcome::Pending);
        assert_eq!(session.position(), 0);
    }

    #[test]
    fn non_match_keeps_position_and_buffer() {
        let t0 = Instant::now();
        let mut session = PracticeSession::new(three_words(), &PracticeConfig::default());

        assert_eq!(session.handle_input("niho", t0), InputOutcome::NoMatch);
        assert_eq!(session.position(), 0);
        assert_eq!(session.input_buffer(), "niho");
        assert_eq!(session.advance(t0), AdvanceOutcome::NotPending);
    }

    #[test]
    fn buffer_echoes_lowercased_input() {
        let t0 = Instant::now();
        let mut session = PracticeSession::new(three_words(), &PracticeConfig::default());

        assert_eq!(session.handle_input("NiHo", t0), InputOutcome::NoMatch);
        assert_eq!(session.input_buffer(), "niho");
    }

    #[test]
    fn advance_moves_forward_and_clears_buffer() {
        let t0 = Instant::now();
        let mut session = PracticeSession::new(three_words(), &PracticeConfig::default());

        session.handle_input("nihongo", t0);
        assert_eq!(session.input_buffer(), "nihongo");

        assert_eq!(
            session.advance(secs(t0, 1)),
            AdvanceOutcome::Advanced {
                position: 1,
                total: 3
            }
        );
        assert_eq!(session.input_buffer(), "");
        assert_eq!(session.current_item().map(|w| w.id.as_str()), Some("2"));
    }

    #[test]
    fn skip_wraps_from_last_to_first_without_completing() {
        let mut session = PracticeSession::new(three_words(), &PracticeConfig::default());

        session.skip();
        session.skip();
        assert_eq!(session.position(), 2);

        let prompt = session.skip().unwrap();
        assert_eq!(prompt.position, 0);
        assert_eq!(session.position(), 0);
        assert!(!session.phase().is_terminal());
        assert_eq!(session.final_stats(), None);
    }

    #[test]
    fn skip_can_be_configured_not_to_wrap() {
        let config = PracticeConfig {
            skip_wraps: false,
            ..PracticeConfig::default()
        };
        let mut session = PracticeSession::new(three_words(), &config);

        for _ in 0..5 {
            session.skip();
        }
        assert_eq!(session.position(), 2);
    }

    #[test]
    fn skip_does_not_start_the_clock() {
        let mut session = PracticeSession::new(three_words(), &PracticeConfig::default());
        session.skip();

        assert!(!session.clock().is_started());
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn single_item_session_completes_on_match() {
        let t0 = Instant::now();
        let items = vec![word("6", "海", "うみ", "umi", 0)];
        let mut session = PracticeSession::new(items, &PracticeConfig::default());

        session.handle_input("u", t0);
        session.handle_input("um", secs(t0, 1));
        session.handle_input("umi", secs(t0, 2));

        match session.advance(secs(t0, 3)) {
            AdvanceOutcome::Completed(Completion::Clean(stats)) => {
                // 3 keystrokes / 5 = 0.6 words over 0.05 minutes
                assert_eq!(stats.words_per_minute, 12);
                assert_eq!(stats.accuracy, 100);
            }
            other => panic!("expected clean completion, got {other:?}"),
        }
        assert_eq!(session.position(), 0);
        assert!(session.final_stats().is_some());
    }

    #[test]
    fn fast_session_is_flagged_and_stats_discarded() {
        let t0 = Instant::now();
        let items = vec![word("6", "海", "うみ", "umi", 0)];
        let mut session = PracticeSession::new(items, &PracticeConfig::default());

        for _ in 0..29 {
            session.handle_input("x", t0);
        }
        session.handle_input("umi", t0);

        assert_eq!(
            session.advance(secs(t0, 2)),
            AdvanceOutcome::Completed(Completion::Flagged)
        );
        assert_eq!(session.phase(), SessionPhase::CompletedFlagged);
        assert_eq!(session.final_stats(), None);
    }

    #[test]
    fn completion_is_decided_at_match_time() {
        let t0 = Instant::now();
        let mut session = PracticeSession::new(three_words(), &PracticeConfig::default());
        session.skip();
        session.skip();

        session.handle_input("umi", t0);
        // skipping during the delay wraps the position but the match still finishes
        session.skip();

        assert!(matches!(
            session.advance(secs(t0, 10)),
            AdvanceOutcome::Completed(_)
        ));
    }

    #[test]
    fn finished_session_ignores_events() {
        let t0 = Instant::now();
        let items = vec![word("6", "海", "うみ", "umi", 0)];
        let mut session = PracticeSession::new(items, &PracticeConfig::default());
        session.handle_input("umi", t0);
        session.advance(secs(t0, 5));

        let count = session.keystroke_count();
        assert_eq!(session.handle_input("umi", secs(t0, 6)), InputOutcome::Ignored);
        assert_eq!(session.skip(), None);
        assert_eq!(session.keystroke_count(), count);
    }

    #[test]
    fn empty_session_never_matches_or_panics() {
        let t0 = Instant::now();
        let mut session = PracticeSession::new(Vec::new(), &PracticeConfig::default());

        assert!(session.current_item().is_none());
        assert!(session.prompt().is_none());
        assert_eq!(session.handle_input("", t0), InputOutcome::NoMatch);
        assert_eq!(session.handle_input("umi", t0), InputOutcome::NoMatch);
        assert_eq!(session.skip(), None);
        assert_eq!(session.advance(t0), AdvanceOutcome::NotPending);
        assert_eq!(session.keystroke_count(), 2);
    }

    #[test]
    fn wpm_uses_five_chars_per_word() {
        assert_eq!(words_per_minute(100, 60.0, 5), 20);
        assert_eq!(words_per_minute(100, 30.0, 5), 40);
        assert_eq!(words_per_minute(7, 60.0, 5), 1);
        assert_eq!(words_per_minute(100, 0.0, 5), 0);
    }
}
