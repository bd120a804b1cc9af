//! Backup use cases.

use anyhow::Context;
use failgrade_backup::Restored;
use failgrade_store::SettingsStore;
use failgrade_types::QuizId;

pub fn export_backup(store: &dyn SettingsStore, quiz: QuizId) -> anyhow::Result<String> {
    failgrade_backup::export_quiz(store, quiz).with_context(|| format!("export quiz {quiz}"))
}

/// Restore a single-quiz backup onto the id the host assigned to the restored quiz.
pub fn import_backup(
    store: &mut dyn SettingsStore,
    xml: &str,
    new_quiz: QuizId,
) -> anyhow::Result<Option<Restored>> {
    failgrade_backup::restore_quiz(store, xml, new_quiz)
        .with_context(|| format!("restore backup onto quiz {new_quiz}"))
}
