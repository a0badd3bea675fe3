//! Validation of model output before anything touches form state.
//!
//! The model is asked for JSON matching a schema but nothing guarantees it,
//! so the text is parsed into typed values here or rejected.

use serde::Deserialize;
use serde_json::Value;
use tango_types::{WordDetails, WordSuggestion};

use crate::EnrichError;

#[derive(Deserialize)]
struct RawDetails {
    #[serde(default)]
    kana: Option<String>,
    #[serde(default)]
    romaji: Option<String>,
    #[serde(default)]
    translation: Option<String>,
}

#[derive(Deserialize)]
struct RawSuggestion {
    kanji: String,
    kana: String,
    translation: String,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn parse_details(text: &str) -> Result<WordDetails, EnrichError> {
    let value: Value = serde_json::from_str(text.trim())
        .map_err(|e| EnrichError::InvalidResponse(format!("not JSON: {e}")))?;

    if !value.is_object() {
        return Err(EnrichError::InvalidResponse(
            "expected an object of word details".to_string(),
        ));
    }

    let raw: RawDetails = serde_json::from_value(value)
        .map_err(|e| EnrichError::InvalidResponse(format!("bad field type: {e}")))?;

    Ok(WordDetails {
        kana: non_empty(raw.kana),
        romaji: non_empty(raw.romaji),
        translation: non_empty(raw.translation),
    })
}

/// Entries missing a required field are dropped, not fatal
pub fn parse_suggestions(text: &str) -> Result<Vec<WordSuggestion>, EnrichError> {
    let value: Value = serde_json::from_str(text.trim())
        .map_err(|e| EnrichError::InvalidResponse(format!("not JSON: {e}")))?;

    let Value::Array(entries) = value else {
        return Err(EnrichError::InvalidResponse(
            "expected an array of suggestions".to_string(),
        ));
    };

    let suggestions = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<RawSuggestion>(entry) {
            Ok(raw) if !raw.kanji.trim().is_empty() => Some(WordSuggestion {
                kanji: raw.kanji.trim().to_string(),
                kana: raw.kana.trim().to_string(),
                translation: raw.translation.trim().to_string(),
            }),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("Dropping malformed suggestion: {}", e);
                None
            }
        })
        .collect();

    Ok(suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_accept_partial_objects() {
        let details = parse_details(r#"{"kana": "ねこ", "romaji": " neko ", "translation": ""}"#)
            .unwrap();

        assert_eq!(details.kana.as_deref(), Some("ねこ"));
        assert_eq!(details.romaji.as_deref(), Some("neko"));
        assert_eq!(details.translation, None);
    }

    #[test]
    fn details_reject_wrong_shapes() {
        for text in ["", "not json", "[]", r#""ねこ""#, r#"{"kana": 3}"#] {
            assert!(
                matches!(parse_details(text), Err(EnrichError::InvalidResponse(_))),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn suggestions_drop_incomplete_entries() {
        let text = r#"[
            {"kanji": "犬", "kana": "いぬ", "translation": "狗"},
            {"kanji": "猫", "kana": "ねこ"},
            {"kanji": "", "kana": "", "translation": ""},
            42
        ]"#;

        let suggestions = parse_suggestions(text).unwrap();
        assert_eq!(
            suggestions,
            vec![WordSuggestion {
                kanji: "犬".to_string(),
                kana: "いぬ".to_string(),
                translation: "狗".to_string(),
            }]
        );
    }

    #[test]
    fn suggestions_need_an_array() {
        assert!(parse_suggestions(r#"{"kanji": "犬"}"#).is_err());
        assert!(parse_suggestions("").is_err());
        assert!(parse_suggestions("[]").unwrap().is_empty());
    }
}
