//! Backup and restore of the per-quiz switch.
//!
//! The setting travels inside the quiz's subplugin tree:
//!
//! ```xml
//! <quiz id="12">
//!   <subplugin_quizaccess_failgrade_quiz>
//!     <quizaccess_failgrade>
//!       <failgradeenabled>1</failgradeenabled>
//!     </quizaccess_failgrade>
//!   </subplugin_quizaccess_failgrade_quiz>
//! </quiz>
//! ```
//!
//! The quiz element carries the activity id at export time. On restore the caller maps
//! it to the id the host assigned to the new quiz; nothing else is transformed.

#![forbid(unsafe_code)]

mod read;
mod write;

use failgrade_store::{SettingsStore, StoreError};
use failgrade_types::{QuizId, ids};
use thiserror::Error;

pub use read::read_backup;
pub use write::write_backup;

#[derive(Debug, Error)]
pub enum BackupError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("malformed backup xml: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("write backup: {0}")]
    Io(#[from] std::io::Error),
    #[error("backup is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("<{element}> is missing {what}")]
    Missing {
        element: &'static str,
        what: &'static str,
    },
    #[error("invalid {field} value: {value:?}")]
    InvalidValue { field: &'static str, value: String },
    #[error("<{0}> found outside of its parent element")]
    Misplaced(&'static str),
    #[error("expected exactly one quiz in backup, found {0}")]
    QuizCount(usize),
    #[error("no restore mapping for quiz {0}")]
    Unmapped(QuizId),
}

pub type Result<T> = std::result::Result<T, BackupError>;

/// One quiz's entry in a backup. `enabled` is `None` when the quiz had no settings row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuizBackup {
    pub activity_id: QuizId,
    pub enabled: Option<bool>,
}

/// Result of restoring one quiz.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Restored {
    pub old_id: QuizId,
    pub new_id: QuizId,
    pub enabled: bool,
}

/// Name of the wrapper element the host expects for this subplugin.
pub fn subplugin_element_name() -> String {
    format!(
        "subplugin_{}_{}_{}",
        ids::BACKUP_SUBPLUGIN_TYPE,
        ids::BACKUP_SUBPLUGIN_NAME,
        ids::BACKUP_CONNECTION_POINT
    )
}

/// Serialize the stored setting for `activity_id`.
pub fn export_quiz(store: &dyn SettingsStore, activity_id: QuizId) -> Result<String> {
    let enabled = store.get(activity_id)?.map(|c| c.enabled);
    tracing::debug!(quiz = %activity_id, ?enabled, "exporting settings");
    write_backup(&[QuizBackup {
        activity_id,
        enabled,
    }])
}

/// Restore every quiz in `xml`, remapping ids through `map`.
///
/// Every quiz must map before anything is written, so an unmapped quiz leaves the
/// store untouched.
pub fn restore_with_mapping<F>(
    store: &mut dyn SettingsStore,
    xml: &str,
    map: F,
) -> Result<Vec<Restored>>
where
    F: Fn(QuizId) -> Option<QuizId>,
{
    let mut planned = Vec::new();
    for entry in read_backup(xml)? {
        let new_id = map(entry.activity_id).ok_or(BackupError::Unmapped(entry.activity_id))?;
        if let Some(enabled) = entry.enabled {
            planned.push(Restored {
                old_id: entry.activity_id,
                new_id,
                enabled,
            });
        }
    }

    for r in &planned {
        store.save(r.new_id, r.enabled)?;
        tracing::debug!(old = %r.old_id, new = %r.new_id, enabled = r.enabled, "restored settings");
    }
    Ok(planned)
}

/// Restore a single-quiz backup onto `new_id`.
pub fn restore_quiz(
    store: &mut dyn SettingsStore,
    xml: &str,
    new_id: QuizId,
) -> Result<Option<Restored>> {
    let entries = read_backup(xml)?;
    if entries.len() != 1 {
        return Err(BackupError::QuizCount(entries.len()));
    }
    let mut restored = restore_with_mapping(store, xml, |_| Some(new_id))?;
    Ok(restored.pop())
}
