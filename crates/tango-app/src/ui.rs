use std::io::{Write, stdout};
use std::sync::Arc;

use crossterm::{
    cursor, queue,
    style::Print,
    terminal::{self, ClearType},
};
use kanal::AsyncReceiver;
use tango_config::Config;
use tango_types::{AppEvent, View, VocabularyItem};
use tokio::sync::{RwLock, watch};

use crate::i18n::t;

/// Terminal rendering of the app's screens, one line per event, with the
/// input line redrawn underneath
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    mut words_rx: watch::Receiver<Arc<Vec<VocabularyItem>>>,
    config: Arc<RwLock<Config>>,
) -> anyhow::Result<()> {
    let locale = config.read().await.ui.locale.clone();
    let mut view = View::Home;
    let mut input = String::new();

    loop {
        tokio::select! {
            event = app_to_ui_rx.recv() => {
                let event = event?;
                match &event {
                    AppEvent::InputChanged(text) => input = text.clone(),
                    AppEvent::Navigate(next) => {
                        view = *next;
                        if view == View::Library {
                            let listing = library_listing(&words_rx.borrow(), &locale);
                            print_lines(&listing, &input)?;
                        }
                    }
                    _ => {}
                }
                if let Some(line) = render(&event, &locale) {
                    print_lines(&line, &input)?;
                } else if matches!(event, AppEvent::InputChanged(_)) {
                    redraw_input(&input)?;
                }
            }
            changed = words_rx.changed() => {
                if changed.is_err() {
                    tracing::debug!("Word library closed");
                    return Ok(());
                }
                if view == View::Library {
                    let listing = library_listing(&words_rx.borrow_and_update(), &locale);
                    print_lines(&listing, &input)?;
                }
            }
        }
    }
}

/// Print above the input line. Raw mode needs explicit carriage returns.
fn print_lines(text: &str, input: &str) -> std::io::Result<()> {
    let mut out = stdout();
    queue!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(text.replace('\n', "\r\n")),
        Print("\r\n"),
        Print(format!("> {input}"))
    )?;
    out.flush()
}

fn redraw_input(input: &str) -> std::io::Result<()> {
    let mut out = stdout();
    queue!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(format!("> {input}"))
    )?;
    out.flush()
}

fn library_listing(words: &[VocabularyItem], locale: &str) -> String {
    let mut out = t("library.count", &[("count", words.len().to_string())], locale);
    for word in words {
        out.push_str(&format!(
            "\n  {} 【{}】 {}  {}  {}%",
            word.kanji, word.kana, word.romaji, word.translation, word.progress
        ));
    }
    out
}

pub fn render(event: &AppEvent, locale: &str) -> Option<String> {
    let line = match event {
        AppEvent::Navigate(view) => {
            let key = match view {
                View::Home => "home.title",
                View::Library => "library.title",
                View::Stats | View::Practice | View::Profile | View::EditProfile => {
                    return None;
                }
                View::AddWord => "add_word.title",
            };
            format!("== {} ==", t(key, &[], locale))
        }
        AppEvent::ShowPrompt(prompt) => t(
            "practice.prompt",
            &[
                ("position", (prompt.position + 1).to_string()),
                ("total", prompt.total.to_string()),
                ("kanji", prompt.kanji.clone()),
                ("romaji", prompt.romaji.clone()),
            ],
            locale,
        ),
        AppEvent::PracticeCompleted(stats) => format!(
            "== {} ==\n{}: {}  {}: {}%",
            t("stats.title", &[], locale),
            t("stats.wpm", &[], locale),
            stats.words_per_minute,
            t("stats.accuracy", &[], locale),
            stats.accuracy
        ),
        AppEvent::CheatDetected => format!("!! {}", t("practice.cheat_detected", &[], locale)),
        AppEvent::WordsLoaded(count) => {
            t("words.loaded", &[("count", count.to_string())], locale)
        }
        AppEvent::DraftChanged(draft) => format!(
            "  {} | {} | {} | {} | {}",
            draft.kanji, draft.kana, draft.romaji, draft.translation, draft.category
        ),
        AppEvent::ShowSuggestions(suggestions) => {
            let mut out = t("add_word.suggestions", &[], locale);
            for (i, s) in suggestions.iter().enumerate() {
                out.push_str(&format!("\n  {}. {} 【{}】 {}", i + 1, s.kanji, s.kana, s.translation));
            }
            out
        }
        AppEvent::StatusUpdate(text) => text.clone(),
        _ => return None,
    };

    Some(line)
}

#[cfg(test)]
mod tests {
    use tango_types::{PracticePrompt, PracticeStats};

    use super::*;

    #[test]
    fn prompt_is_one_based() {
        let line = render(
            &AppEvent::ShowPrompt(PracticePrompt {
                position: 0,
                total: 6,
                kanji: "日本語".to_string(),
                romaji: "nihongo".to_string(),
            }),
            "zh-CN",
        )
        .unwrap();

        assert_eq!(line, "1 / 6  日本語  (nihongo)");
    }

    #[test]
    fn stats_show_wpm_and_accuracy() {
        let line = render(
            &AppEvent::PracticeCompleted(PracticeStats {
                words_per_minute: 20,
                accuracy: 100,
            }),
            "zh-CN",
        )
        .unwrap();

        assert!(line.contains("速度 (WPM): 20"));
        assert!(line.contains("正确率: 100%"));
    }

    #[test]
    fn library_listing_has_one_line_per_word() {
        let words = tango_core::store::sample_words();
        let listing = library_listing(&words, "zh-CN");

        assert_eq!(listing.lines().count(), 7);
        assert!(listing.starts_with("共 6 个单词"));
        assert!(listing.contains("海 【うみ】 umi"));
    }

    #[test]
    fn backend_only_events_render_nothing() {
        assert!(render(&AppEvent::AdvanceDue(1), "zh-CN").is_none());
        assert!(render(&AppEvent::InputChanged("ni".to_string()), "zh-CN").is_none());
        assert!(render(&AppEvent::Navigate(View::Practice), "zh-CN").is_none());
    }
}
