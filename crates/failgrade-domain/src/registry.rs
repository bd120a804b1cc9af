//! Static registry of access rules.
//!
//! Each registration pairs a stable id with a factory. Configuration picks which ids
//! are active; the factories decide per quiz whether the rule applies.

use crate::model::QuizContext;
use crate::policy::PolicyRule;
use crate::ports::GradeLookup;
use crate::rules::failgrade::FailGradeRule;
use failgrade_types::strings::STR_PRIVACY_METADATA;
use failgrade_types::{get_string, ids};
use thiserror::Error;

pub type RuleFactory =
    for<'a> fn(&QuizContext, &'a dyn GradeLookup) -> Option<Box<dyn PolicyRule + 'a>>;

pub struct RuleRegistration {
    pub id: &'static str,
    /// Settings field the rule is switched on by.
    pub settings_field: &'static str,
    /// String key explaining what personal data the rule keeps.
    pub privacy_key: &'static str,
    pub make: RuleFactory,
}

static BUILTIN: &[RuleRegistration] = &[RuleRegistration {
    id: ids::RULE_FAILGRADE,
    settings_field: ids::FIELD_ENABLED,
    privacy_key: STR_PRIVACY_METADATA,
    make: make_failgrade,
}];

fn make_failgrade<'a>(
    quiz: &QuizContext,
    grades: &'a dyn GradeLookup,
) -> Option<Box<dyn PolicyRule + 'a>> {
    let config = quiz.policy_config(ids::FIELD_ENABLED);
    FailGradeRule::create_if_applicable(config.as_ref(), quiz.course_id, grades)
        .map(|rule| Box::new(rule) as Box<dyn PolicyRule + 'a>)
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown access rule: {id} (known: {known})")]
pub struct UnknownRule {
    pub id: String,
    pub known: String,
}

#[derive(Clone)]
pub struct RuleRegistry {
    rules: Vec<&'static RuleRegistration>,
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.ids()).finish()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RuleRegistry {
    /// Every rule compiled into this build.
    pub fn builtin() -> Self {
        Self {
            rules: BUILTIN.iter().collect(),
        }
    }

    /// Only the named rules, in the order given. Duplicates are collapsed.
    pub fn with_rules<S: AsRef<str>>(rule_ids: &[S]) -> Result<Self, UnknownRule> {
        let mut rules: Vec<&'static RuleRegistration> = Vec::new();
        for id in rule_ids {
            let id = id.as_ref();
            let reg = BUILTIN.iter().find(|r| r.id == id).ok_or_else(|| UnknownRule {
                id: id.to_string(),
                known: Self::known_ids().join(", "),
            })?;
            if !rules.iter().any(|r| r.id == reg.id) {
                rules.push(reg);
            }
        }
        Ok(Self { rules })
    }

    pub fn known_ids() -> Vec<&'static str> {
        BUILTIN.iter().map(|r| r.id).collect()
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id).collect()
    }

    pub fn registrations(&self) -> impl Iterator<Item = &'static RuleRegistration> + '_ {
        self.rules.iter().copied()
    }

    /// Privacy declaration of each active rule, as `(rule id, text)`.
    pub fn privacy_declarations(&self) -> Vec<(&'static str, &'static str)> {
        self.rules
            .iter()
            .map(|r| (r.id, get_string(r.privacy_key).unwrap_or(r.privacy_key)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Build every active rule that applies to `quiz`.
    pub fn applicable<'a>(
        &self,
        quiz: &QuizContext,
        grades: &'a dyn GradeLookup,
    ) -> Vec<Box<dyn PolicyRule + 'a>> {
        self.rules
            .iter()
            .filter_map(|reg| (reg.make)(quiz, grades))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{StaticGrades, quiz};

    #[test]
    fn builtin_contains_failgrade() {
        assert_eq!(RuleRegistry::builtin().ids(), vec![ids::RULE_FAILGRADE]);
    }

    #[test]
    fn unknown_rule_is_rejected() {
        let err = RuleRegistry::with_rules(&["quizaccess_nope"]).unwrap_err();
        assert_eq!(err.id, "quizaccess_nope");
        assert!(err.to_string().contains(ids::RULE_FAILGRADE));
    }

    #[test]
    fn duplicates_collapse() {
        let reg = RuleRegistry::with_rules(&[ids::RULE_FAILGRADE, ids::RULE_FAILGRADE]).unwrap();
        assert_eq!(reg.ids().len(), 1);
    }

    #[test]
    fn applicable_follows_quiz_flag() {
        let grades = StaticGrades::none();
        let reg = RuleRegistry::builtin();

        assert!(reg.applicable(&quiz(false), &grades).is_empty());
        let rules = reg.applicable(&quiz(true), &grades);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].id(), ids::RULE_FAILGRADE);
    }

    #[test]
    fn failgrade_stores_no_personal_data() {
        let decl = RuleRegistry::builtin().privacy_declarations();
        assert_eq!(decl.len(), 1);
        assert_eq!(decl[0].0, ids::RULE_FAILGRADE);
        assert!(decl[0].1.contains("does not store any personal data"));
    }

    #[test]
    fn empty_registry_applies_nothing() {
        let grades = StaticGrades::none();
        let reg = RuleRegistry::with_rules::<&str>(&[]).unwrap();
        assert!(reg.is_empty());
        assert!(reg.applicable(&quiz(true), &grades).is_empty());
    }
}
