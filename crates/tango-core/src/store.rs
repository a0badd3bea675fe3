use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tango_types::{NewVocabularyItem, VocabularyItem};
use tokio::sync::RwLock;

/// Durable word list the practice engine reads from and writes progress to.
///
/// Every operation fails open: implementations log their own errors and
/// return an empty list, `None` or `false` instead of propagating.
#[async_trait]
pub trait WordStore: Send + Sync {
    /// All words, newest first
    async fn fetch_all(&self) -> Vec<VocabularyItem>;

    /// Insert a word. The store assigns the id and starts progress at 0.
    async fn insert_one(&self, item: NewVocabularyItem) -> Option<VocabularyItem>;

    /// Set mastery progress and stamp `last_practiced`. Not retried.
    async fn update_progress(&self, id: &str, progress: u8) -> bool;
}

/// Store kept in process memory, used for offline mode
#[derive(Clone, Default)]
pub struct MemoryStore {
    words: Arc<RwLock<Vec<VocabularyItem>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_words(words: Vec<VocabularyItem>) -> Self {
        Self {
            words: Arc::new(RwLock::new(words)),
        }
    }

    /// Seeded with a handful of beginner words
    pub fn with_samples() -> Self {
        Self::with_words(sample_words())
    }
}

#[async_trait]
impl WordStore for MemoryStore {
    async fn fetch_all(&self) -> Vec<VocabularyItem> {
        self.words.read().await.clone()
    }

    async fn insert_one(&self, item: NewVocabularyItem) -> Option<VocabularyItem> {
        let word = item.into_item(uuid::Uuid::new_v4().to_string());
        self.words.write().await.insert(0, word.clone());
        Some(word)
    }

    async fn update_progress(&self, id: &str, progress: u8) -> bool {
        let mut words = self.words.write().await;
        match words.iter_mut().find(|w| w.id == id) {
            Some(word) => {
                word.progress = progress.min(100);
                word.last_practiced = Some(Utc::now());
                true
            }
            None => {
                tracing::warn!("No word with id {} to update", id);
                false
            }
        }
    }
}

pub fn sample_words() -> Vec<VocabularyItem> {
    [
        ("1", "日本語", "にほんご", "nihongo", "日语", 45),
        ("2", "勉強", "べんきょう", "benkyou", "学习", 80),
        ("3", "食べ物", "たべもの", "tabemono", "食物", 45),
        ("4", "旅行", "りょこう", "ryokou", "旅行", 20),
        ("5", "明日", "あした", "ashita", "明天", 10),
        ("6", "海", "うみ", "umi", "大海", 0),
    ]
    .into_iter()
    .map(|(id, kanji, kana, romaji, translation, progress)| VocabularyItem {
        id: id.to_string(),
        kanji: kanji.to_string(),
        kana: kana.to_string(),
        romaji: romaji.to_string(),
        translation: translation.to_string(),
        category: "JLPT N5".to_string(),
        progress,
        last_practiced: None,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_goes_first_with_fresh_id() {
        let store = MemoryStore::with_samples();
        let added = store
            .insert_one(NewVocabularyItem {
                kanji: "猫".to_string(),
                kana: "ねこ".to_string(),
                romaji: "neko".to_string(),
                translation: "猫".to_string(),
                category: "N5".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(added.progress, 0);
        assert!(!added.id.is_empty());

        let words = store.fetch_all().await;
        assert_eq!(words.len(), 7);
        assert_eq!(words[0].id, added.id);
    }

    #[tokio::test]
    async fn update_stamps_last_practiced() {
        let store = MemoryStore::with_samples();

        assert!(store.update_progress("6", 10).await);
        assert!(!store.update_progress("missing", 10).await);

        let words = store.fetch_all().await;
        let umi = words.iter().find(|w| w.id == "6").unwrap();
        assert_eq!(umi.progress, 10);
        assert!(umi.last_practiced.is_some());
    }
}
