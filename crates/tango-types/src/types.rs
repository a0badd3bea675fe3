use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Suggested values for [`VocabularyItem::category`]
pub const CATEGORIES: [&str; 5] = ["N5", "N4", "基础词汇", "动词", "旅行常用语"];

#[derive(Debug, Clone)]
pub enum AppEvent {
    // Input side
    StartPractice,
    /// One key press from the terminal, fed to the line editor
    Key(KeyInput),
    /// Input buffer changed on the practice screen
    TextInput(String),
    Skip,
    /// Fired by the delayed task scheduled after an accepted match, tagged
    /// with the id of the session that matched
    AdvanceDue(u64),
    RefreshWords,
    EditField {
        field: FormField,
        value: String,
    },
    SmartFill,
    Suggest,
    ApplySuggestion(usize),
    SubmitWord,
    Navigate(View),
    Quit,

    // Output side
    WordsLoaded(usize),
    ShowPrompt(PracticePrompt),
    PracticeCompleted(PracticeStats),
    CheatDetected,
    /// Current, unvalidated contents of the add-word form
    DraftChanged(NewVocabularyItem),
    ShowSuggestions(Vec<WordSuggestion>),
    WordAdded(VocabularyItem),
    StatusUpdate(String),
    /// Current contents of the line editor, for echo
    InputChanged(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Backspace,
    Enter,
    /// Drop the whole line
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Kanji,
    Kana,
    Romaji,
    Translation,
    Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    Home,
    Stats,
    Library,
    Profile,
    Practice,
    AddWord,
    EditProfile,
}

/// A unit of study material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyItem {
    pub id: String,
    pub kanji: String,
    pub kana: String,
    pub romaji: String,
    pub translation: String,
    pub category: String,
    /// Mastery, 0..=100
    pub progress: u8,
    pub last_practiced: Option<DateTime<Utc>>,
}

/// Insert payload; the store assigns `id` and starts `progress` at 0
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVocabularyItem {
    pub kanji: String,
    pub kana: String,
    pub romaji: String,
    pub translation: String,
    pub category: String,
}

impl NewVocabularyItem {
    pub fn into_item(self, id: String) -> VocabularyItem {
        VocabularyItem {
            id,
            kanji: self.kanji,
            kana: self.kana,
            romaji: self.romaji,
            translation: self.translation,
            category: self.category,
            progress: 0,
            last_practiced: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeStats {
    pub words_per_minute: u32,
    pub accuracy: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticePrompt {
    pub position: usize,
    pub total: usize,
    pub kanji: String,
    pub romaji: String,
}

/// Enrichment result for a single word. Empty fields are left as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordDetails {
    pub kana: Option<String>,
    pub romaji: Option<String>,
    pub translation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSuggestion {
    pub kanji: String,
    pub kana: String,
    pub translation: String,
}
