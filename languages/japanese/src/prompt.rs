use serde_json::{Value, json};

pub fn details_prompt(word: &str) -> String {
    format!(
        "Provide the furigana (kana), romaji, and Chinese translation for the Japanese word: \"{word}\"."
    )
}

pub fn suggestions_prompt(seed: Option<&str>, category: &str, count: usize) -> String {
    match seed.map(str::trim).filter(|s| !s.is_empty()) {
        Some(seed) => format!(
            "List {count} Japanese words related to \"{seed}\" in category \"{category}\"."
        ),
        None => format!(
            "List {count} common Japanese words for beginners in category \"{category}\"."
        ),
    }
}

pub fn details_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "kana": { "type": "STRING" },
            "romaji": { "type": "STRING" },
            "translation": { "type": "STRING" }
        },
        "required": ["kana", "romaji", "translation"]
    })
}

pub fn suggestions_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "kanji": { "type": "STRING" },
                "kana": { "type": "STRING" },
                "translation": { "type": "STRING" }
            },
            "required": ["kanji", "kana", "translation"]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestion_prompt_uses_seed_when_present() {
        assert_eq!(
            suggestions_prompt(Some("猫"), "N5", 3),
            "List 3 Japanese words related to \"猫\" in category \"N5\"."
        );
        assert_eq!(
            suggestions_prompt(Some("  "), "动词", 2),
            "List 2 common Japanese words for beginners in category \"动词\"."
        );
        assert_eq!(
            suggestions_prompt(None, "N4", 3),
            "List 3 common Japanese words for beginners in category \"N4\"."
        );
    }

    #[test]
    fn schemas_require_every_field() {
        assert_eq!(details_schema()["required"].as_array().unwrap().len(), 3);
        assert_eq!(suggestions_schema()["items"]["required"][0], "kanji");
    }
}
