use std::sync::Arc;
use std::time::Duration;

use tango_config::practice::PracticeConfig;
use tokio::task::JoinHandle;

use crate::library::WordLibrary;
use crate::session::ProgressUpdate;
use crate::store::WordStore;

pub fn advance_delay(config: &PracticeConfig) -> Duration {
    Duration::from_millis(config.advance_delay_ms)
}

/// Send a progress write without waiting for it.
///
/// Delivery is best-effort: a failed write is logged and dropped, and nothing
/// cancels the task if the learner leaves the practice screen. The library
/// copy only changes once the store acknowledges.
pub fn spawn_progress_update(
    store: Arc<dyn WordStore>,
    library: Arc<WordLibrary>,
    update: ProgressUpdate,
) -> JoinHandle<bool> {
    tokio::spawn(async move {
        let ok = store.update_progress(&update.id, update.progress).await;
        if ok {
            library.apply_progress(&update.id, update.progress);
        } else {
            tracing::warn!(
                "Progress update for {} dropped ({}%)",
                update.id,
                update.progress
            );
        }
        ok
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tango_types::{NewVocabularyItem, VocabularyItem};

    use super::*;
    use crate::store::{MemoryStore, sample_words};

    struct FailingStore {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl WordStore for FailingStore {
        async fn fetch_all(&self) -> Vec<VocabularyItem> {
            Vec::new()
        }

        async fn insert_one(&self, _item: NewVocabularyItem) -> Option<VocabularyItem> {
            None
        }

        async fn update_progress(&self, _id: &str, _progress: u8) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            false
        }
    }

    #[tokio::test]
    async fn acknowledged_update_reaches_library() {
        let store = Arc::new(MemoryStore::with_samples());
        let library = Arc::new(WordLibrary::new(sample_words()));

        let update = ProgressUpdate {
            id: "1".to_string(),
            progress: 55,
        };
        let ok = spawn_progress_update(store.clone(), library.clone(), update)
            .await
            .unwrap();

        assert!(ok);
        assert_eq!(library.snapshot()[0].progress, 55);
        assert_eq!(store.fetch_all().await[0].progress, 55);
    }

    #[tokio::test]
    async fn failed_update_leaves_library_alone() {
        let store = Arc::new(FailingStore {
            calls: AtomicUsize::new(0),
        });
        let library = Arc::new(WordLibrary::new(sample_words()));

        let update = ProgressUpdate {
            id: "1".to_string(),
            progress: 55,
        };
        let ok = spawn_progress_update(store.clone(), library.clone(), update)
            .await
            .unwrap();

        assert!(!ok);
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
        assert_eq!(library.snapshot()[0].progress, 45);
    }

    #[test]
    fn delay_comes_from_config() {
        assert_eq!(
            advance_delay(&PracticeConfig::default()),
            Duration::from_millis(300)
        );
    }
}
