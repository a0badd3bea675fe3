use tango_types::VocabularyItem;

/// Whether `input` is an accepted answer for `item`.
///
/// The input is lowercased and compared exactly against the romanized and
/// phonetic forms. No partial credit. A missing item never matches.
pub fn is_match(input: &str, item: Option<&VocabularyItem>) -> bool {
    let Some(item) = item else {
        return false;
    };

    let input = input.to_lowercase();
    input == item.romaji || input == item.kana
}

#[cfg(test)]
mod tests {
    use super::*;

    fn umi() -> VocabularyItem {
        VocabularyItem {
            id: "6".to_string(),
            kanji: "海".to_string(),
            kana: "うみ".to_string(),
            romaji: "umi".to_string(),
            translation: "大海".to_string(),
            category: "JLPT N5".to_string(),
            progress: 0,
            last_practiced: None,
        }
    }

    #[test]
    fn accepts_romaji_in_any_case() {
        let item = umi();
        assert!(is_match("umi", Some(&item)));
        assert!(is_match("UMI", Some(&item)));
        assert!(is_match("Umi", Some(&item)));
    }

    #[test]
    fn accepts_kana() {
        assert!(is_match("うみ", Some(&umi())));
    }

    #[test]
    fn rejects_everything_else() {
        let item = umi();
        for input in ["", "u", "um", "umii", " umi", "海", "ウミ"] {
            assert!(!is_match(input, Some(&item)), "{input:?} should not match");
        }
    }

    #[test]
    fn missing_item_is_a_non_match() {
        assert!(!is_match("umi", None));
        assert!(!is_match("", None));
    }
}
