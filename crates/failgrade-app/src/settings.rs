//! Settings use cases: what the host calls from its quiz settings lifecycle.

use anyhow::Context;
use failgrade_domain::QuizContext;
use failgrade_store::SettingsStore;
use failgrade_types::{CourseId, QuizId, ids};
use std::collections::BTreeMap;

/// Persist the submitted form value for `quiz`.
pub fn save_settings(
    store: &mut dyn SettingsStore,
    quiz: QuizId,
    enabled: bool,
) -> anyhow::Result<()> {
    store
        .save(quiz, enabled)
        .with_context(|| format!("save settings for quiz {quiz}"))?;
    tracing::info!(quiz = %quiz, enabled, "settings saved");
    Ok(())
}

/// Drop the settings of a deleted quiz.
pub fn delete_settings(store: &mut dyn SettingsStore, quiz: QuizId) -> anyhow::Result<()> {
    store
        .delete(quiz)
        .with_context(|| format!("delete settings for quiz {quiz}"))?;
    tracing::info!(quiz = %quiz, "settings deleted");
    Ok(())
}

/// Flags for many quizzes in one lookup.
pub fn load_settings(
    store: &dyn SettingsStore,
    quizzes: &[QuizId],
) -> anyhow::Result<BTreeMap<QuizId, bool>> {
    store
        .load_for_quiz_list(quizzes)
        .context("load settings for quiz list")
}

/// Build the domain's view of one quiz. A quiz without a row gets no entry, which the
/// rule factory reads as "not applicable".
pub fn load_quiz_context(
    store: &dyn SettingsStore,
    quiz: QuizId,
    course: CourseId,
) -> anyhow::Result<QuizContext> {
    let mut ctx = QuizContext::new(quiz, course);
    if let Some(config) = store.get(quiz)? {
        ctx.settings.insert(ids::FIELD_ENABLED.to_string(), config.enabled);
    }
    Ok(ctx)
}
