//! The question bank: cached in memory, seeded from a source, persisted to a
//! key-value store.

use tracing::{debug, info, warn};

use crate::models::Question;

use super::loader::{derive_categories, parse_questions};
use super::source::QuestionSource;
use super::storage::KeyValueStore;
use super::{LoadError, StorageError};

/// Storage key holding the serialized question list.
pub const QUESTIONS_KEY: &str = "germanAviationQuizQuestions";

/// Owns the loaded question bank for the life of the application.
pub struct QuestionStore {
    storage: Box<dyn KeyValueStore + Send>,
    source: Box<dyn QuestionSource>,
    questions: Option<Vec<Question>>,
    categories: Vec<String>,
}

impl QuestionStore {
    pub fn new<K, S>(storage: K, source: S) -> Self
    where
        K: KeyValueStore + Send + 'static,
        S: QuestionSource + 'static,
    {
        Self {
            storage: Box::new(storage),
            source: Box::new(source),
            questions: None,
            categories: Vec::new(),
        }
    }

    /// Load the question bank.
    ///
    /// Returns the cached list when already loaded. Otherwise the stored list
    /// is used, and only when storage holds nothing usable is the source
    /// fetched and its list written back to storage. On error the store stays
    /// unpopulated.
    pub async fn load(&mut self) -> Result<&[Question], LoadError> {
        if self.questions.is_none() {
            let questions = match self.read_stored() {
                Some(questions) => questions,
                None => self.fetch_and_seed().await?,
            };
            self.categories = derive_categories(&questions);
            self.questions = Some(questions);
        }

        Ok(self.questions())
    }

    /// The loaded list, or an empty slice before a successful `load`.
    pub fn questions(&self) -> &[Question] {
        self.questions.as_deref().unwrap_or(&[])
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn is_loaded(&self) -> bool {
        self.questions.is_some()
    }

    /// Replace the question with the same id and persist the whole list.
    ///
    /// An unknown id leaves the bank untouched. The in-memory list only
    /// changes once the write succeeded.
    pub fn update(&mut self, question: Question) -> Result<&[Question], StorageError> {
        let Some(current) = self.questions.as_ref() else {
            return Ok(&[]);
        };
        let Some(position) = current.iter().position(|q| q.id == question.id) else {
            debug!(id = question.id, "ignoring update for unknown question");
            return Ok(self.questions());
        };

        let mut updated = current.clone();
        updated[position] = question;

        let json = serde_json::to_string(&updated)?;
        self.storage.set(QUESTIONS_KEY, json)?;
        info!(id = updated[position].id, "persisted question edit");

        self.categories = derive_categories(&updated);
        self.questions = Some(updated);
        Ok(self.questions())
    }

    fn read_stored(&self) -> Option<Vec<Question>> {
        let json = match self.storage.get(QUESTIONS_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "could not read stored questions");
                return None;
            }
        };

        match parse_questions(&json) {
            Ok(questions) => {
                info!(count = questions.len(), "loaded questions from storage");
                Some(questions)
            }
            Err(e) => {
                warn!(error = %e, "discarding unusable stored questions");
                None
            }
        }
    }

    async fn fetch_and_seed(&mut self) -> Result<Vec<Question>, LoadError> {
        let location = self.source.describe();
        let raw = self.source.fetch().await.inspect_err(|e| {
            warn!(source = %location, error = %e, "question fetch failed");
        })?;
        let questions = parse_questions(&raw)?;
        info!(source = %location, count = questions.len(), "fetched questions");

        match serde_json::to_string(&questions) {
            Ok(json) => {
                if let Err(e) = self.storage.set(QUESTIONS_KEY, json) {
                    warn!(error = %e, "could not seed storage with fetched questions");
                }
            }
            Err(e) => warn!(error = %e, "could not serialize fetched questions"),
        }

        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::data::loader::fixtures::question;
    use crate::data::storage::{FileStore, MemoryStore};

    /// Serves a fixed document and counts how often it was asked.
    struct StaticSource {
        body: Result<String, u16>,
        calls: Arc<AtomicUsize>,
    }

    impl StaticSource {
        fn ok(questions: &[Question]) -> Self {
            Self {
                body: Ok(serde_json::to_string(questions).unwrap()),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                body: Err(status),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl QuestionSource for StaticSource {
        async fn fetch(&self) -> Result<String, LoadError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.body.clone().map_err(LoadError::Status)
        }

        fn describe(&self) -> String {
            "static".to_string()
        }
    }

    #[tokio::test]
    async fn test_load_fetches_sorts_and_seeds_storage() {
        let source = StaticSource::ok(&[
            question(2, "B-1", "a"),
            question(1, "A-1", "b"),
            question(3, "A-2", "c"),
        ]);
        let calls = Arc::clone(&source.calls);
        let mut store = QuestionStore::new(MemoryStore::new(), source);

        let ids: Vec<u32> = store.load().await.unwrap().iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(store.categories(), &["A".to_string(), "B".to_string()]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let stored = store.storage.get(QUESTIONS_KEY).unwrap().unwrap();
        let stored: Vec<Question> = serde_json::from_str(&stored).unwrap();
        assert_eq!(stored[0].id, 1);

        // Second load is served from the cache.
        store.load().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_load_prefers_storage_over_source() {
        let mut storage = MemoryStore::new();
        let stored = vec![question(9, "MET-1", "a")];
        storage
            .set(QUESTIONS_KEY, serde_json::to_string(&stored).unwrap())
            .unwrap();

        let source = StaticSource::ok(&[question(1, "A-1", "a")]);
        let calls = Arc::clone(&source.calls);
        let mut store = QuestionStore::new(storage, source);

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 9);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_load_failure_leaves_store_unpopulated() {
        let mut store = QuestionStore::new(MemoryStore::new(), StaticSource::failing(500));

        assert!(matches!(store.load().await, Err(LoadError::Status(500))));
        assert!(!store.is_loaded());
        assert!(store.questions().is_empty());
        assert!(store.categories().is_empty());
    }

    #[tokio::test]
    async fn test_load_rejects_duplicate_ids_from_source() {
        let source = StaticSource::ok(&[question(1, "A-1", "a"), question(1, "A-2", "b")]);
        let mut store = QuestionStore::new(MemoryStore::new(), source);

        assert!(matches!(store.load().await, Err(LoadError::Invalid(_))));
        assert_eq!(store.storage.get(QUESTIONS_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_storage_falls_back_to_source() {
        let mut storage = MemoryStore::new();
        storage.set(QUESTIONS_KEY, "garbage".to_string()).unwrap();

        let mut store = QuestionStore::new(storage, StaticSource::ok(&[question(1, "A-1", "a")]));
        assert_eq!(store.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_storage_file_is_reseeded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "{ truncated").unwrap();
        let bank = [question(1, "A-1", "a"), question(2, "B-1", "b")];

        let mut store = QuestionStore::new(FileStore::new(&path), StaticSource::ok(&bank));
        assert_eq!(store.load().await.unwrap().len(), 2);

        let mut edited = bank[1].clone();
        edited.text = "Edited after repair".to_string();
        store.update(edited).unwrap();
        drop(store);

        let source = StaticSource::ok(&bank);
        let calls = Arc::clone(&source.calls);
        let mut restarted = QuestionStore::new(FileStore::new(&path), source);
        let loaded = restarted.load().await.unwrap();
        assert_eq!(loaded[1].text, "Edited after repair");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_update_replaces_and_persists() {
        let source = StaticSource::ok(&[question(1, "A-1", "a"), question(2, "A-2", "b")]);
        let mut store = QuestionStore::new(MemoryStore::new(), source);
        store.load().await.unwrap();

        let mut edited = question(2, "A-2", "c");
        edited.text = "Edited".to_string();
        let updated = store.update(edited).unwrap();
        assert_eq!(updated[1].text, "Edited");
        assert_eq!(updated[1].correct_answer, "c");
        assert_eq!(updated[0].text, "Question 1");

        let stored: Vec<Question> =
            serde_json::from_str(&store.storage.get(QUESTIONS_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(stored[1].text, "Edited");
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_noop() {
        let mut store =
            QuestionStore::new(MemoryStore::new(), StaticSource::ok(&[question(1, "A-1", "a")]));
        store.load().await.unwrap();

        let updated = store.update(question(42, "Z-1", "a")).unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].id, 1);
    }

    #[tokio::test]
    async fn test_edit_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let bank = [question(1, "A-1", "a"), question(2, "B-1", "b")];

        let mut store = QuestionStore::new(FileStore::new(&path), StaticSource::ok(&bank));
        store.load().await.unwrap();
        let mut edited = bank[0].clone();
        edited.text = "Updated text".to_string();
        store.update(edited).unwrap();
        drop(store);

        let mut restarted = QuestionStore::new(FileStore::new(&path), StaticSource::ok(&bank));
        let loaded = restarted.load().await.unwrap();
        assert_eq!(loaded[0].text, "Updated text");
        assert_eq!(loaded[1].text, "Question 2");
    }
}
