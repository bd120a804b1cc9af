use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Host identifier of a quiz instance.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(transparent)]
pub struct QuizId(pub i64);

/// Host identifier of the course a quiz belongs to.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(transparent)]
pub struct CourseId(pub i64);

/// Host identifier of a learner.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for QuizId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-quiz switch for the rule.
///
/// At most one exists per quiz; `enabled = false` means the same as no row at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QuizPolicyConfig {
    pub quiz_id: QuizId,
    pub enabled: bool,
}

impl QuizPolicyConfig {
    pub fn new(quiz_id: QuizId, enabled: bool) -> Self {
        Self { quiz_id, enabled }
    }
}

/// Read-only snapshot of a learner's most recent completed attempt, supplied by the host.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AttemptSummary {
    pub attempt_number: u32,
    pub user_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome_grade: Option<f64>,
}

/// Grade data resolved for one learner on one quiz.
///
/// `aggregated_grade` is already combined per the quiz grading method; the core never
/// sees individual attempt grades.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GradeThreshold {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_grade: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregated_grade: Option<f64>,
}

impl GradeThreshold {
    pub fn new(pass_grade: Option<f64>, aggregated_grade: Option<f64>) -> Self {
        Self {
            pass_grade,
            aggregated_grade,
        }
    }
}

/// Outcome of asking whether a new attempt may start. Never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyDecision {
    pub allowed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PolicyDecision {
    pub fn allow() -> Self {
        Self {
            allowed: true,
            message: None,
        }
    }

    pub fn deny(message: impl Into<String>) -> Self {
        Self {
            allowed: false,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_serializes_without_message_when_allowed() {
        let json = serde_json::to_value(PolicyDecision::allow()).unwrap();
        assert_eq!(json, serde_json::json!({ "allowed": true }));
    }

    #[test]
    fn ids_serialize_transparently() {
        let cfg = QuizPolicyConfig::new(QuizId(42), true);
        let json = serde_json::to_value(cfg).unwrap();
        assert_eq!(json, serde_json::json!({ "quiz_id": 42, "enabled": true }));
    }
}
