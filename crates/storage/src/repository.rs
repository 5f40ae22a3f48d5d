use async_trait::async_trait;
use quiz_core::model::SessionSnapshot;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Entry holding the score as a decimal integer.
pub const SCORE_KEY: &str = "quizScore";
/// Entry holding the current question index as a decimal integer.
pub const CURRENT_INDEX_KEY: &str = "currentQuestionIndex";
/// Entry holding the recorded answers as JSON.
pub const ANSWERS_KEY: &str = "userAnswers";

/// Every key owned by a quiz session.
pub const SESSION_KEYS: [&str; 3] = [SCORE_KEY, CURRENT_INDEX_KEY, ANSWERS_KEY];

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Raw persisted session entries, one optional string per key.
///
/// Values are kept undecoded so callers can decide how to treat malformed data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionEntries {
    pub score: Option<String>,
    pub current_index: Option<String>,
    pub answers: Option<String>,
}

impl SessionEntries {
    /// Encode a snapshot into its three entries.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the answers cannot be encoded.
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Result<Self, StorageError> {
        let answers = snapshot
            .encode_answers()
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        Ok(Self {
            score: Some(snapshot.encode_score()),
            current_index: Some(snapshot.encode_current_index()),
            answers: Some(answers),
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.score.is_none() && self.current_index.is_none() && self.answers.is_none()
    }

    fn present(&self) -> Vec<(&'static str, &str)> {
        [
            (SCORE_KEY, self.score.as_deref()),
            (CURRENT_INDEX_KEY, self.current_index.as_deref()),
            (ANSWERS_KEY, self.answers.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect()
    }
}

/// String-keyed durable storage for the quiz session.
#[async_trait]
pub trait SessionStateRepository: Send + Sync {
    /// Read a single entry.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get_entry(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or overwrite a single entry.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the entry cannot be stored.
    async fn set_entry(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a single entry. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn remove_entry(&self, key: &str) -> Result<(), StorageError>;

    /// Read all session entries.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if any entry cannot be read.
    async fn load_entries(&self) -> Result<SessionEntries, StorageError> {
        Ok(SessionEntries {
            score: self.get_entry(SCORE_KEY).await?,
            current_index: self.get_entry(CURRENT_INDEX_KEY).await?,
            answers: self.get_entry(ANSWERS_KEY).await?,
        })
    }

    /// Write every present entry; absent ones are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if any entry cannot be stored.
    async fn save_entries(&self, entries: &SessionEntries) -> Result<(), StorageError> {
        for (key, value) in entries.present() {
            self.set_entry(key, value).await?;
        }
        Ok(())
    }

    /// Remove all session entries.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the entries cannot be removed.
    async fn clear_entries(&self) -> Result<(), StorageError> {
        for key in SESSION_KEYS {
            self.remove_entry(key).await?;
        }
        Ok(())
    }
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Number of stored entries, across all keys.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn len(&self) -> Result<usize, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.len())
    }
}

#[async_trait]
impl SessionStateRepository for InMemoryRepository {
    async fn get_entry(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn set_entry(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove_entry(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub session: Arc<dyn SessionStateRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let session: Arc<dyn SessionStateRepository> = Arc::new(InMemoryRepository::new());
        Self { session }
    }
}
