//! Persistence collaborator for the game comment.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing::{debug, info, instrument};

/// Opaque concurrency token identifying one persisted revision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub struct Version(String);

impl Version {
    /// Wraps a token returned by the backing document store.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A comment as last persisted, with its version.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct StoredComment {
    /// Full comment text.
    comment: String,
    /// Version of that text.
    version: Version,
}

impl StoredComment {
    /// Creates a stored comment.
    pub fn new(comment: impl Into<String>, version: Version) -> Self {
        Self {
            comment: comment.into(),
            version,
        }
    }
}

/// Result of a save request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Accepted; the document now has this version.
    Saved(Version),
    /// Rejected because the document moved on; this is what is stored now.
    Conflict(StoredComment),
}

/// The document store holding one game comment.
#[async_trait::async_trait]
pub trait CommentStore: Send + Sync {
    /// Fetches the current comment.
    async fn fetch(&self) -> Result<StoredComment, StoreError>;

    /// Saves `comment` if the stored version still equals `expected`.
    async fn save(&self, comment: &str, expected: &Version) -> Result<SaveOutcome, StoreError>;
}

/// Persistence failure.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// In-process store with a monotonically increasing version counter.
///
/// Useful for tests and for the CLI; `overwrite` simulates another client
/// saving first.
#[derive(Debug)]
pub struct MemoryStore {
    state: Mutex<(StoredComment, u64)>,
}

impl MemoryStore {
    /// Creates a store holding `comment` at version `0`.
    #[instrument(skip(comment))]
    pub fn new(comment: impl Into<String>) -> Self {
        Self {
            state: Mutex::new((StoredComment::new(comment, Version::new("0")), 0)),
        }
    }

    /// Replaces the stored comment as if another client saved it.
    #[instrument(skip(self, comment))]
    pub fn overwrite(&self, comment: impl Into<String>) -> Result<Version, StoreError> {
        let mut state = self.lock()?;
        let next = state.1 + 1;
        let version = Version::new(next.to_string());
        *state = (StoredComment::new(comment, version.clone()), next);
        debug!(%version, "Comment overwritten");
        Ok(version)
    }

    /// The currently stored comment.
    pub fn current(&self) -> Result<StoredComment, StoreError> {
        Ok(self.lock()?.0.clone())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, (StoredComment, u64)>, StoreError> {
        self.state
            .lock()
            .map_err(|e| StoreError::new(format!("Store lock poisoned: {}", e)))
    }
}

#[async_trait::async_trait]
impl CommentStore for MemoryStore {
    async fn fetch(&self) -> Result<StoredComment, StoreError> {
        self.current()
    }

    async fn save(&self, comment: &str, expected: &Version) -> Result<SaveOutcome, StoreError> {
        let mut state = self.lock()?;
        if state.0.version() != expected {
            debug!(expected = %expected, actual = %state.0.version(), "Version conflict");
            return Ok(SaveOutcome::Conflict(state.0.clone()));
        }
        let next = state.1 + 1;
        let version = Version::new(next.to_string());
        *state = (StoredComment::new(comment, version.clone()), next);
        info!(%version, "Comment saved");
        Ok(SaveOutcome::Saved(version))
    }
}
