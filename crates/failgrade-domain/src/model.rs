use failgrade_types::{CourseId, QuizId, QuizPolicyConfig};
use std::collections::BTreeMap;

/// What the host knows about a quiz when it asks which access rules apply.
///
/// `settings` holds the rule flags loaded through the settings-join contract, keyed by
/// field name. A missing key and a `false` value mean the same thing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuizContext {
    pub quiz_id: QuizId,
    pub course_id: CourseId,
    pub settings: BTreeMap<String, bool>,
}

impl QuizContext {
    pub fn new(quiz_id: QuizId, course_id: CourseId) -> Self {
        Self {
            quiz_id,
            course_id,
            settings: BTreeMap::new(),
        }
    }

    pub fn with_setting(mut self, field: &str, enabled: bool) -> Self {
        self.settings.insert(field.to_string(), enabled);
        self
    }

    pub fn flag(&self, field: &str) -> bool {
        self.settings.get(field).copied().unwrap_or(false)
    }

    /// Policy config for the rule stored under `field`, or `None` when the row is absent.
    pub fn policy_config(&self, field: &str) -> Option<QuizPolicyConfig> {
        self.settings
            .get(field)
            .map(|enabled| QuizPolicyConfig::new(self.quiz_id, *enabled))
    }
}
