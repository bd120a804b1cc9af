//! Settings persistence adapters.
//!
//! This crate is allowed to do database IO. Storage errors are surfaced unchanged; the
//! store never retries or suppresses them.
//!
//! `save` is check-then-insert without locking. Two requests enabling the same quiz at
//! once can race; the loser gets the host's duplicate-row error, and the surviving row is
//! identical either way.

#![forbid(unsafe_code)]

mod memory;
mod sqlite;

use failgrade_types::{QuizId, QuizPolicyConfig};
use std::collections::BTreeMap;
use thiserror::Error;

pub use memory::MemorySettingsStore;
pub use sqlite::SqliteSettingsStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error("invalid table prefix: {0:?} (expected ASCII letters, digits or '_')")]
    InvalidPrefix(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Persistence of the per-quiz switch.
pub trait SettingsStore {
    /// Disabled deletes the row (no error if absent). Enabled inserts a row only when
    /// none exists.
    fn save(&mut self, quiz: QuizId, enabled: bool) -> Result<()>;

    /// Remove the row unconditionally; used when the quiz itself is deleted.
    fn delete(&mut self, quiz: QuizId) -> Result<()>;

    fn get(&self, quiz: QuizId) -> Result<Option<QuizPolicyConfig>>;

    /// One lookup for many quizzes. Every requested id appears in the result; quizzes
    /// without a row map to `false`.
    fn load_for_quiz_list(&self, quizzes: &[QuizId]) -> Result<BTreeMap<QuizId, bool>>;

    /// Number of rows stored for `quiz`. At most one when the invariant holds.
    fn row_count(&self, quiz: QuizId) -> Result<usize>;
}
