//! Field state for the add-word flow

use tango_types::{CATEGORIES, FormField, NewVocabularyItem, WordDetails, WordSuggestion};

use crate::error::FormError;
use crate::preprocess::{FieldPreprocessor, Preprocessor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddWordForm {
    pub kanji: String,
    pub kana: String,
    pub romaji: String,
    pub translation: String,
    pub category: String,
}

impl Default for AddWordForm {
    fn default() -> Self {
        Self {
            kanji: String::new(),
            kana: String::new(),
            romaji: String::new(),
            translation: String::new(),
            category: CATEGORIES[0].to_string(),
        }
    }
}

impl AddWordForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_field(&mut self, field: FormField, value: String) {
        let slot = match field {
            FormField::Kanji => &mut self.kanji,
            FormField::Kana => &mut self.kana,
            FormField::Romaji => &mut self.romaji,
            FormField::Translation => &mut self.translation,
            FormField::Category => &mut self.category,
        };
        *slot = value;
    }

    /// Raw field contents for display, nothing validated
    pub fn draft(&self) -> NewVocabularyItem {
        NewVocabularyItem {
            kanji: self.kanji.clone(),
            kana: self.kana.clone(),
            romaji: self.romaji.clone(),
            translation: self.translation.clone(),
            category: self.category.clone(),
        }
    }

    /// The word to send for smart fill, `None` when the kanji field is blank
    pub fn enrichment_query(&self) -> Option<String> {
        let kanji = FieldPreprocessor.process(&self.kanji);
        (!kanji.is_empty()).then_some(kanji)
    }

    /// Only non-empty fields overwrite what the learner already typed
    pub fn apply_details(&mut self, details: WordDetails) {
        let fields = [
            (details.kana, &mut self.kana),
            (details.romaji, &mut self.romaji),
            (details.translation, &mut self.translation),
        ];

        for (value, field) in fields {
            if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
                *field = value;
            }
        }
    }

    /// Romaji is cleared so smart fill or the learner can supply it
    pub fn apply_suggestion(&mut self, suggestion: WordSuggestion) {
        self.kanji = suggestion.kanji;
        self.kana = suggestion.kana;
        self.translation = suggestion.translation;
        self.romaji.clear();
    }

    pub fn submit(&self) -> Result<NewVocabularyItem, FormError> {
        let p = FieldPreprocessor;
        let kanji = p.process(&self.kanji);
        let kana = p.process(&self.kana);
        let translation = p.process(&self.translation);
        let romaji = p.process(&self.romaji);
        let category = p.process(&self.category);

        if kanji.is_empty() {
            return Err(FormError::MissingField("kanji"));
        }
        if kana.is_empty() {
            return Err(FormError::MissingField("kana"));
        }
        if translation.is_empty() {
            return Err(FormError::MissingField("translation"));
        }

        Ok(NewVocabularyItem {
            romaji: if romaji.is_empty() { kanji.clone() } else { romaji },
            kanji,
            kana,
            translation,
            category: if category.is_empty() {
                CATEGORIES[0].to_string()
            } else {
                category
            },
        })
    }
}
