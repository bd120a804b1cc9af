//! Host collaborators the evaluator depends on.
//!
//! Both are passed in explicitly; the domain never reaches for ambient host state.

use failgrade_types::{AttemptSummary, CourseId, GradeThreshold, QuizId, UserId};
use thiserror::Error;

/// A host collaborator could not answer.
#[derive(Debug, Error)]
#[error("{collaborator} unavailable: {reason}")]
pub struct LookupError {
    pub collaborator: &'static str,
    pub reason: String,
}

impl LookupError {
    pub fn grades(reason: impl Into<String>) -> Self {
        Self {
            collaborator: "grade lookup",
            reason: reason.into(),
        }
    }

    pub fn attempts(reason: impl Into<String>) -> Self {
        Self {
            collaborator: "attempt history",
            reason: reason.into(),
        }
    }
}

/// Resolves a learner's aggregated grade and the quiz pass threshold.
///
/// Grade items live in the course gradebook, so the course is part of the key.
/// `Ok(None)` means the quiz has no grade item. How attempts are aggregated is the
/// host's business.
pub trait GradeLookup {
    fn grade_for(
        &self,
        course: CourseId,
        quiz: QuizId,
        user: UserId,
    ) -> Result<Option<GradeThreshold>, LookupError>;
}

/// Count of previous attempts plus the most recent completed one.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AttemptHistorySnapshot {
    pub attempt_count: u32,
    pub last_completed: Option<AttemptSummary>,
}

pub trait AttemptHistory {
    fn attempt_history(
        &self,
        quiz: QuizId,
        user: UserId,
    ) -> Result<AttemptHistorySnapshot, LookupError>;
}

impl<T: GradeLookup + ?Sized> GradeLookup for &T {
    fn grade_for(
        &self,
        course: CourseId,
        quiz: QuizId,
        user: UserId,
    ) -> Result<Option<GradeThreshold>, LookupError> {
        (**self).grade_for(course, quiz, user)
    }
}

impl<T: AttemptHistory + ?Sized> AttemptHistory for &T {
    fn attempt_history(
        &self,
        quiz: QuizId,
        user: UserId,
    ) -> Result<AttemptHistorySnapshot, LookupError> {
        (**self).attempt_history(quiz, user)
    }
}
