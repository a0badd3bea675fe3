use std::sync::Arc;

use chrono::Utc;
use tango_types::VocabularyItem;
use tokio::sync::watch;

/// The one canonical word list every screen observes.
///
/// Updates go through the methods here; observers get a fresh snapshot on
/// each change via [`WordLibrary::subscribe`].
pub struct WordLibrary {
    tx: watch::Sender<Arc<Vec<VocabularyItem>>>,
}

impl Default for WordLibrary {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl WordLibrary {
    pub fn new(words: Vec<VocabularyItem>) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(words));
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<VocabularyItem>>> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> Arc<Vec<VocabularyItem>> {
        self.tx.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.tx.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn replace(&self, words: Vec<VocabularyItem>) {
        self.tx.send_replace(Arc::new(words));
    }

    /// New words show up first, same order the store returns them in
    pub fn prepend(&self, word: VocabularyItem) {
        self.tx.send_modify(|words| {
            Arc::make_mut(words).insert(0, word);
        });
    }

    /// Mirror a progress write the store acknowledged. Returns false for an
    /// unknown id.
    pub fn apply_progress(&self, id: &str, progress: u8) -> bool {
        self.tx.send_if_modified(|words| {
            let Some(index) = words.iter().position(|w| w.id == id) else {
                return false;
            };

            let word = &mut Arc::make_mut(words)[index];
            word.progress = progress.min(100);
            word.last_practiced = Some(Utc::now());
            true
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::sample_words;

    #[tokio::test]
    async fn observers_see_replacements() {
        let library = WordLibrary::default();
        let mut rx = library.subscribe();
        assert!(library.is_empty());

        library.replace(sample_words());

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().len(), 6);
    }

    #[tokio::test]
    async fn progress_changes_are_published() {
        let library = WordLibrary::new(sample_words());
        let mut rx = library.subscribe();

        assert!(library.apply_progress("4", 30));

        rx.changed().await.unwrap();
        let words = rx.borrow_and_update().clone();
        let ryokou = words.iter().find(|w| w.id == "4").unwrap();
        assert_eq!(ryokou.progress, 30);
        assert!(ryokou.last_practiced.is_some());
    }

    #[test]
    fn unknown_id_does_not_notify() {
        let library = WordLibrary::new(sample_words());
        let rx = library.subscribe();

        assert!(!library.apply_progress("nope", 30));
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn snapshots_are_not_affected_by_later_writes() {
        let library = WordLibrary::new(sample_words());
        let before = library.snapshot();

        library.prepend(before[5].clone());

        assert_eq!(before.len(), 6);
        assert_eq!(library.len(), 7);
    }
}
