//! The `check` use case: may this learner start another attempt?

use anyhow::Context;
use failgrade_domain::{
    AccessManager, AttemptHistory, AttemptHistorySnapshot, GradeLookup, LookupError, QuizContext,
    RuleEvaluation, RuleRegistry,
};
use failgrade_store::SettingsStore;
use failgrade_types::{CourseId, GradeThreshold, PolicyDecision, QuizId, UserId};
use serde::Serialize;

use crate::settings::load_quiz_context;

/// Input for the check use case.
pub struct CheckInput<'a> {
    pub registry: &'a RuleRegistry,
    pub store: &'a dyn SettingsStore,
    pub grades: &'a dyn GradeLookup,
    pub attempts: &'a dyn AttemptHistory,
    pub quiz_id: QuizId,
    pub course_id: CourseId,
    pub user_id: UserId,
}

/// Output from the check use case.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CheckOutput {
    pub quiz_id: QuizId,
    pub user_id: UserId,
    pub attempt_count: u32,
    pub active_rules: Vec<&'static str>,
    pub finished: bool,
    pub decision: PolicyDecision,
    pub descriptions: Vec<String>,
}

/// Run the check: load the quiz's rule flags, build the applicable rules, read the
/// learner's history and decide.
///
/// Storage errors propagate. Host lookups that fail resolve to "allow".
pub fn check_new_attempt(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let quiz = load_quiz_context(input.store, input.quiz_id, input.course_id)
        .context("load quiz settings")?;
    let manager = AccessManager::new(input.registry, &quiz, input.grades);

    let history = if manager.active_rule_ids().is_empty() {
        AttemptHistorySnapshot::default()
    } else {
        read_history(input.attempts, input.quiz_id, input.user_id)
    };
    let last = history.last_completed.as_ref();

    let RuleEvaluation { finished, decision } = manager.evaluate(history.attempt_count, last);

    tracing::info!(
        quiz = %input.quiz_id,
        user = %input.user_id,
        attempts = history.attempt_count,
        allowed = decision.allowed,
        "attempt check"
    );

    Ok(CheckOutput {
        quiz_id: input.quiz_id,
        user_id: input.user_id,
        attempt_count: history.attempt_count,
        active_rules: manager.active_rule_ids(),
        finished,
        decision,
        descriptions: manager.describe_rules(),
    })
}

fn read_history(
    attempts: &dyn AttemptHistory,
    quiz: QuizId,
    user: UserId,
) -> AttemptHistorySnapshot {
    match attempts.attempt_history(quiz, user) {
        Ok(history) => history,
        Err(err) => {
            tracing::warn!(
                quiz = %quiz,
                user = %user,
                error = %err,
                "attempt history unavailable; allowing attempt"
            );
            AttemptHistorySnapshot::default()
        }
    }
}

struct NoGrades;

impl GradeLookup for NoGrades {
    fn grade_for(
        &self,
        _: CourseId,
        _: QuizId,
        _: UserId,
    ) -> Result<Option<GradeThreshold>, LookupError> {
        Ok(None)
    }
}

/// Descriptions shown on the quiz view page for the rules active on `quiz_id`.
pub fn describe_quiz(
    registry: &RuleRegistry,
    store: &dyn SettingsStore,
    quiz_id: QuizId,
    course_id: CourseId,
) -> anyhow::Result<Vec<String>> {
    let quiz: QuizContext =
        load_quiz_context(store, quiz_id, course_id).context("load quiz settings")?;
    let manager = AccessManager::new(registry, &quiz, &NoGrades);
    Ok(manager.describe_rules())
}

/// Map a decision to an exit code: 0 = allowed, 2 = denied.
pub fn decision_exit_code(decision: &PolicyDecision) -> i32 {
    if decision.allowed { 0 } else { 2 }
}
