use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tango_types::{NewVocabularyItem, VocabularyItem};

/// One row of the `words` table as PostgREST returns it.
///
/// Text and progress columns are nullable in the table; a NULL decodes to
/// the empty value so one bad row can't fail the whole list.
#[derive(Debug, Deserialize)]
pub struct WordRow {
    pub id: RowId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub kanji: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub kana: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub romaji: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub translation: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub progress: i64,
    #[serde(default)]
    pub last_practiced: Option<DateTime<Utc>>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Serial and uuid primary keys both show up in the wild
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Int(i64),
    Text(String),
}

impl From<RowId> for String {
    fn from(id: RowId) -> Self {
        match id {
            RowId::Int(n) => n.to_string(),
            RowId::Text(s) => s,
        }
    }
}

impl From<WordRow> for VocabularyItem {
    fn from(row: WordRow) -> Self {
        Self {
            id: row.id.into(),
            kanji: row.kanji,
            kana: row.kana,
            romaji: row.romaji,
            translation: row.translation,
            category: row.category,
            progress: row.progress.clamp(0, 100) as u8,
            last_practiced: row.last_practiced,
        }
    }
}

/// Insert body; `progress` starts at 0 on the server side too
#[derive(Debug, Serialize)]
pub(crate) struct InsertRow<'a> {
    pub kanji: &'a str,
    pub kana: &'a str,
    pub romaji: &'a str,
    pub translation: &'a str,
    pub category: &'a str,
    pub progress: u8,
}

impl<'a> From<&'a NewVocabularyItem> for InsertRow<'a> {
    fn from(item: &'a NewVocabularyItem) -> Self {
        Self {
            kanji: &item.kanji,
            kana: &item.kana,
            romaji: &item.romaji,
            translation: &item.translation,
            category: &item.category,
            progress: 0,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProgressPatch {
    pub progress: u8,
    pub last_practiced: DateTime<Utc>,
}
