//! Block further attempts once the learner has reached the pass grade.

use crate::policy::{PolicyRule, RuleEvaluation};
use crate::ports::GradeLookup;
use failgrade_types::strings::{STR_DESCRIPTION, STR_PREVENT_MORE_ATTEMPTS};
use failgrade_types::{
    AttemptSummary, CourseId, GradeThreshold, PolicyDecision, QuizId, QuizPolicyConfig, get_string,
    ids,
};

/// Pure pass check.
///
/// Zero attempts, a missing threshold and a missing grade all answer `false`. The
/// comparison is inclusive.
pub fn is_finished(attempts: u32, aggregated_grade: Option<f64>, pass_grade: Option<f64>) -> bool {
    if attempts == 0 {
        return false;
    }
    match (aggregated_grade, pass_grade) {
        (Some(grade), Some(pass)) => grade >= pass,
        _ => false,
    }
}

/// Pure decision built on [`is_finished`].
pub fn decide(attempts: u32, threshold: Option<&GradeThreshold>) -> PolicyDecision {
    let (grade, pass) = threshold
        .map(|t| (t.aggregated_grade, t.pass_grade))
        .unwrap_or((None, None));
    if is_finished(attempts, grade, pass) {
        PolicyDecision::deny(denial_message())
    } else {
        PolicyDecision::allow()
    }
}

pub fn denial_message() -> &'static str {
    get_string(STR_PREVENT_MORE_ATTEMPTS).unwrap_or("You have already passed this quiz.")
}

/// The rule bound to one quiz.
pub struct FailGradeRule<'a> {
    quiz_id: QuizId,
    course_id: CourseId,
    grades: &'a dyn GradeLookup,
}

impl<'a> FailGradeRule<'a> {
    /// Returns the rule when `config` exists and is enabled, otherwise `None`.
    pub fn create_if_applicable(
        config: Option<&QuizPolicyConfig>,
        course_id: CourseId,
        grades: &'a dyn GradeLookup,
    ) -> Option<Self> {
        let config = config.filter(|c| c.enabled)?;
        Some(Self {
            quiz_id: config.quiz_id,
            course_id,
            grades,
        })
    }

    pub fn quiz_id(&self) -> QuizId {
        self.quiz_id
    }

    pub fn course_id(&self) -> CourseId {
        self.course_id
    }

    /// Resolve grades for the learner of `last`. Lookup failures fail open.
    fn threshold_for(&self, last: &AttemptSummary) -> Option<GradeThreshold> {
        match self.grades.grade_for(self.course_id, self.quiz_id, last.user_id) {
            Ok(threshold) => threshold,
            Err(err) => {
                tracing::warn!(
                    course = %self.course_id,
                    quiz = %self.quiz_id,
                    user = %last.user_id,
                    error = %err,
                    "grade lookup failed; allowing attempt"
                );
                None
            }
        }
    }
}

impl PolicyRule for FailGradeRule<'_> {
    fn id(&self) -> &'static str {
        ids::RULE_FAILGRADE
    }

    fn prevent_new_attempt(&self, attempts: u32, last: Option<&AttemptSummary>) -> PolicyDecision {
        self.evaluate(attempts, last).decision
    }

    fn is_finished(&self, attempts: u32, last: Option<&AttemptSummary>) -> bool {
        self.evaluate(attempts, last).finished
    }

    fn evaluate(&self, attempts: u32, last: Option<&AttemptSummary>) -> RuleEvaluation {
        // No history means nothing to look up.
        let threshold = match last {
            Some(last) if attempts > 0 => self.threshold_for(last),
            _ => None,
        };
        let finished = is_finished(
            attempts,
            threshold.and_then(|t| t.aggregated_grade),
            threshold.and_then(|t| t.pass_grade),
        );
        tracing::debug!(
            quiz = %self.quiz_id,
            user = ?last.map(|a| a.user_id),
            attempts,
            finished,
            "evaluated pass status"
        );
        let decision = if finished {
            PolicyDecision::deny(denial_message())
        } else {
            PolicyDecision::allow()
        };
        RuleEvaluation { finished, decision }
    }

    fn description(&self) -> String {
        get_string(STR_DESCRIPTION).unwrap_or_default().to_string()
    }
}
