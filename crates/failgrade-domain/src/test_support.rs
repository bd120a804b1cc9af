use crate::model::QuizContext;
use crate::ports::{GradeLookup, LookupError};
use failgrade_types::{AttemptSummary, CourseId, GradeThreshold, QuizId, UserId, ids};
use std::cell::Cell;

pub const QUIZ: QuizId = QuizId(11);
pub const COURSE: CourseId = CourseId(3);
pub const LEARNER: UserId = UserId(7);

/// Grade lookup answering the same threshold for everyone.
pub struct StaticGrades {
    pub threshold: Option<GradeThreshold>,
}

impl StaticGrades {
    pub fn none() -> Self {
        Self { threshold: None }
    }

    pub fn with(aggregated: Option<f64>, pass: Option<f64>) -> Self {
        Self {
            threshold: Some(GradeThreshold::new(pass, aggregated)),
        }
    }

    pub fn passing() -> Self {
        Self::with(Some(8.0), Some(6.0))
    }
}

impl GradeLookup for StaticGrades {
    fn grade_for(
        &self,
        _: CourseId,
        _: QuizId,
        _: UserId,
    ) -> Result<Option<GradeThreshold>, LookupError> {
        Ok(self.threshold)
    }
}

pub struct UnavailableGrades;

impl GradeLookup for UnavailableGrades {
    fn grade_for(
        &self,
        _: CourseId,
        _: QuizId,
        _: UserId,
    ) -> Result<Option<GradeThreshold>, LookupError> {
        Err(LookupError::grades("gradebook offline"))
    }
}

/// Passes the learner on the first lookup, then goes offline. Counts every call.
#[derive(Default)]
pub struct CountingGrades {
    pub calls: Cell<u32>,
}

impl GradeLookup for CountingGrades {
    fn grade_for(
        &self,
        _: CourseId,
        _: QuizId,
        _: UserId,
    ) -> Result<Option<GradeThreshold>, LookupError> {
        self.calls.set(self.calls.get() + 1);
        if self.calls.get() == 1 {
            Ok(Some(GradeThreshold::new(Some(6.0), Some(8.0))))
        } else {
            Err(LookupError::grades("gradebook offline"))
        }
    }
}

pub fn quiz(enabled: bool) -> QuizContext {
    QuizContext::new(QUIZ, COURSE).with_setting(ids::FIELD_ENABLED, enabled)
}

pub fn attempt(number: u32) -> AttemptSummary {
    AttemptSummary {
        attempt_number: number,
        user_id: LEARNER,
        outcome_grade: None,
    }
}
