//! Shared test fixtures for the failgrade workspace.
//!
//! The policy core never aggregates grades itself, but the interesting end-to-end
//! scenarios depend on how the host does it. [`ReferenceGradebook`] reproduces the
//! host's grading methods over an in-memory attempt log and answers both host ports.

use failgrade_domain::{AttemptHistory, AttemptHistorySnapshot, GradeLookup, LookupError};
use failgrade_types::{AttemptSummary, CourseId, GradeThreshold, QuizId, UserId};
use std::collections::BTreeMap;

/// How the host combines several attempt grades into the quiz grade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GradeMethod {
    Highest,
    Average,
    First,
    Last,
}

impl GradeMethod {
    pub fn aggregate(self, grades: &[f64]) -> Option<f64> {
        match self {
            GradeMethod::Highest => grades.iter().copied().reduce(f64::max),
            GradeMethod::Average => {
                if grades.is_empty() {
                    None
                } else {
                    Some(grades.iter().sum::<f64>() / grades.len() as f64)
                }
            }
            GradeMethod::First => grades.first().copied(),
            GradeMethod::Last => grades.last().copied(),
        }
    }
}

#[derive(Clone, Debug)]
struct GradeItem {
    method: GradeMethod,
    pass_grade: Option<f64>,
}

/// In-memory gradebook plus attempt log.
#[derive(Clone, Debug, Default)]
pub struct ReferenceGradebook {
    items: BTreeMap<(CourseId, QuizId), GradeItem>,
    attempts: BTreeMap<(QuizId, UserId), Vec<Option<f64>>>,
}

impl ReferenceGradebook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the grade item for `quiz` in `course`. Quizzes without one are ungraded.
    pub fn add_grade_item(
        &mut self,
        course: CourseId,
        quiz: QuizId,
        method: GradeMethod,
        pass_grade: Option<f64>,
    ) {
        self.items.insert((course, quiz), GradeItem { method, pass_grade });
    }

    pub fn set_pass_grade(&mut self, course: CourseId, quiz: QuizId, pass_grade: Option<f64>) {
        if let Some(item) = self.items.get_mut(&(course, quiz)) {
            item.pass_grade = pass_grade;
        }
    }

    /// Record a finished attempt. `grade` is `None` for an attempt still awaiting marking.
    pub fn finish_attempt(
        &mut self,
        quiz: QuizId,
        user: UserId,
        grade: Option<f64>,
    ) -> AttemptSummary {
        let log = self.attempts.entry((quiz, user)).or_default();
        log.push(grade);
        AttemptSummary {
            attempt_number: log.len() as u32,
            user_id: user,
            outcome_grade: grade,
        }
    }

    pub fn attempt_count(&self, quiz: QuizId, user: UserId) -> u32 {
        self.attempts
            .get(&(quiz, user))
            .map(|log| log.len() as u32)
            .unwrap_or(0)
    }

    fn aggregated(&self, quiz: QuizId, user: UserId, method: GradeMethod) -> Option<f64> {
        let graded: Vec<f64> = self
            .attempts
            .get(&(quiz, user))
            .map(|log| log.iter().flatten().copied().collect())
            .unwrap_or_default();
        method.aggregate(&graded)
    }
}

impl GradeLookup for ReferenceGradebook {
    fn grade_for(
        &self,
        course: CourseId,
        quiz: QuizId,
        user: UserId,
    ) -> Result<Option<GradeThreshold>, LookupError> {
        let Some(item) = self.items.get(&(course, quiz)) else {
            return Ok(None);
        };
        Ok(Some(GradeThreshold::new(
            item.pass_grade,
            self.aggregated(quiz, user, item.method),
        )))
    }
}

impl AttemptHistory for ReferenceGradebook {
    fn attempt_history(
        &self,
        quiz: QuizId,
        user: UserId,
    ) -> Result<AttemptHistorySnapshot, LookupError> {
        let last_completed = self.attempts.get(&(quiz, user)).and_then(|log| {
            log.last().map(|grade| AttemptSummary {
                attempt_number: log.len() as u32,
                user_id: user,
                outcome_grade: *grade,
            })
        });
        Ok(AttemptHistorySnapshot {
            attempt_count: self.attempt_count(quiz, user),
            last_completed,
        })
    }
}

/// Both host ports down.
#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineHost;

impl GradeLookup for OfflineHost {
    fn grade_for(
        &self,
        _: CourseId,
        _: QuizId,
        _: UserId,
    ) -> Result<Option<GradeThreshold>, LookupError> {
        Err(LookupError::grades("gradebook offline"))
    }
}

impl AttemptHistory for OfflineHost {
    fn attempt_history(&self, _: QuizId, _: UserId) -> Result<AttemptHistorySnapshot, LookupError> {
        Err(LookupError::attempts("attempt store offline"))
    }
}
