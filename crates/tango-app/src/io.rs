//! Terminal input
//!
//! Keys are read one at a time in raw mode and sent to the event loop as
//! [`AppEvent::Key`]. The loop owns the [`LineEditor`], so every change to the
//! line reaches the practice session as its own input event.

use std::io::BufRead;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use kanal::AsyncSender;
use tango_types::{AppEvent, FormField, KeyInput, View};
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

const POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Raw mode for as long as the guard lives
pub struct RawModeGuard;

impl RawModeGuard {
    /// `None` when stdin is not a terminal or raw mode can't be entered
    pub fn enable() -> Option<Self> {
        if !atty::is(atty::Stream::Stdin) {
            return None;
        }

        match terminal::enable_raw_mode() {
            Ok(()) => Some(Self),
            Err(e) => {
                tracing::warn!("Raw mode unavailable, reading whole lines: {}", e);
                None
            }
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            tracing::warn!("Failed to restore terminal: {}", e);
        }
    }
}

/// Forward terminal input to the app from a plain thread.
///
/// With `raw` set, keys are polled so the thread notices cancellation. Without
/// it (piped stdin) each line is replayed as its characters plus Enter.
pub fn spawn_key_reader(
    handle: Handle,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
    raw: bool,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let send = |event: AppEvent| -> bool {
            let quit = matches!(event, AppEvent::Quit);
            if let Err(e) = handle.block_on(event_tx.send(event)) {
                tracing::error!("Failed to send input to app: {}", e);
                return false;
            }
            !quit
        };

        if raw {
            read_keys(&cancel, send);
        } else {
            read_lines(&cancel, send);
        }

        tracing::info!("Input reader stopping");
    })
}

fn read_keys(cancel: &CancellationToken, mut send: impl FnMut(AppEvent) -> bool) {
    while !cancel.is_cancelled() {
        match event::poll(POLL_TIMEOUT) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => {
                tracing::error!("Failed to poll terminal: {}", e);
                return;
            }
        }

        let key = match event::read() {
            Ok(Event::Key(key)) => key,
            Ok(_) => continue,
            Err(e) => {
                tracing::error!("Failed to read terminal event: {}", e);
                return;
            }
        };

        if let Some(event) = key_event(&key) {
            if !send(event) {
                return;
            }
        }
    }
}

fn read_lines(cancel: &CancellationToken, mut send: impl FnMut(AppEvent) -> bool) {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        if cancel.is_cancelled() {
            return;
        }

        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("Failed to read stdin: {}", e);
                return;
            }
        };

        for event in keys_for_line(&line) {
            if !send(event) {
                return;
            }
        }
    }
}

/// Map one terminal key to an app event. Releases and repeats are dropped.
pub fn key_event(key: &KeyEvent) -> Option<AppEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let event = match key.code {
        // raw mode swallows SIGINT
        KeyCode::Char('c') if ctrl => AppEvent::Quit,
        KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            AppEvent::Key(KeyInput::Char(c))
        }
        KeyCode::Backspace => AppEvent::Key(KeyInput::Backspace),
        KeyCode::Enter => AppEvent::Key(KeyInput::Enter),
        KeyCode::Esc => AppEvent::Key(KeyInput::Clear),
        KeyCode::Tab => AppEvent::Skip,
        _ => return None,
    };

    Some(event)
}

/// A whole line typed as separate key presses
pub fn keys_for_line(line: &str) -> Vec<AppEvent> {
    line.chars()
        .map(|c| AppEvent::Key(KeyInput::Char(c)))
        .chain(std::iter::once(AppEvent::Key(KeyInput::Enter)))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// The line changed; carries the new contents
    Changed(String),
    /// Enter on a `:` command; carries the command line
    Submitted(String),
    Unchanged,
}

/// Single-line input buffer behind the prompt
#[derive(Debug, Default)]
pub struct LineEditor {
    buffer: String,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn is_command(&self) -> bool {
        self.buffer.starts_with(':')
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn apply(&mut self, key: KeyInput) -> Edit {
        match key {
            KeyInput::Char(c) => {
                self.buffer.push(c);
                Edit::Changed(self.buffer.clone())
            }
            KeyInput::Backspace => match self.buffer.pop() {
                Some(_) => Edit::Changed(self.buffer.clone()),
                None => Edit::Unchanged,
            },
            KeyInput::Clear if self.buffer.is_empty() => Edit::Unchanged,
            KeyInput::Clear => {
                self.buffer.clear();
                Edit::Changed(String::new())
            }
            // answers are checked on every change, Enter only runs commands
            KeyInput::Enter if self.is_command() => {
                Edit::Submitted(std::mem::take(&mut self.buffer))
            }
            KeyInput::Enter => Edit::Unchanged,
        }
    }
}

/// Parse a submitted `:command` line. Anything else is `None`.
pub fn parse_line(line: &str) -> Option<AppEvent> {
    let command = line.strip_prefix(':')?;

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command.trim(), ""),
    };

    let field = |field| AppEvent::EditField {
        field,
        value: arg.to_string(),
    };

    let event = match name {
        "practice" | "p" => AppEvent::StartPractice,
        "skip" | "s" => AppEvent::Skip,
        "words" => AppEvent::RefreshWords,
        "home" => AppEvent::Navigate(View::Home),
        "library" => AppEvent::Navigate(View::Library),
        "stats" => AppEvent::Navigate(View::Stats),
        "profile" => AppEvent::Navigate(View::Profile),
        "add" => AppEvent::Navigate(View::AddWord),
        "kanji" => field(FormField::Kanji),
        "kana" => field(FormField::Kana),
        "romaji" => field(FormField::Romaji),
        "translation" => field(FormField::Translation),
        "category" => field(FormField::Category),
        "fill" => AppEvent::SmartFill,
        "suggest" => AppEvent::Suggest,
        "pick" => {
            // 1-based on screen
            let n: usize = arg.parse().ok()?;
            AppEvent::ApplySuggestion(n.checked_sub(1)?)
        }
        "save" => AppEvent::SubmitWord,
        "quit" | "q" => AppEvent::Quit,
        _ => return None,
    };

    Some(event)
}
