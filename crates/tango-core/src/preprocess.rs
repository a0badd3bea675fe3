use unicode_normalization::UnicodeNormalization;

/// Cleans a user-entered form field before it is validated or sent anywhere
pub trait Preprocessor {
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // NFKC folds full-width latin and half-width kana typed through an IME
        let text: String = text.nfkc().collect();

        text.replace(['\n', '\r', '\t'], " ").trim().to_string()
    }
}

pub struct FieldPreprocessor;
impl Preprocessor for FieldPreprocessor {}
