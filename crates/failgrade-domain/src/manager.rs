//! Combines every applicable rule for one quiz, the way the host consults its access
//! rules: any denial blocks, and all denial messages are reported.

use crate::model::QuizContext;
use crate::policy::{PolicyRule, RuleEvaluation};
use crate::ports::GradeLookup;
use crate::registry::RuleRegistry;
use failgrade_types::{AttemptSummary, PolicyDecision};

pub struct AccessManager<'a> {
    rules: Vec<Box<dyn PolicyRule + 'a>>,
}

impl<'a> AccessManager<'a> {
    pub fn new(registry: &RuleRegistry, quiz: &QuizContext, grades: &'a dyn GradeLookup) -> Self {
        let rules = registry.applicable(quiz, grades);
        tracing::debug!(
            quiz = %quiz.quiz_id,
            active = rules.len(),
            "built access rules"
        );
        Self { rules }
    }

    pub fn from_rules(rules: Vec<Box<dyn PolicyRule + 'a>>) -> Self {
        Self { rules }
    }

    pub fn active_rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// Denial messages from every rule that blocks. Empty means allowed.
    pub fn prevent_new_attempt(&self, attempts: u32, last: Option<&AttemptSummary>) -> Vec<String> {
        self.rules
            .iter()
            .map(|r| r.prevent_new_attempt(attempts, last))
            .filter(|d| !d.allowed)
            .filter_map(|d| d.message)
            .collect()
    }

    /// Ask every rule once and combine: any denial blocks, any finished rule finishes.
    pub fn evaluate(&self, attempts: u32, last: Option<&AttemptSummary>) -> RuleEvaluation {
        let mut finished = false;
        let mut denied = false;
        let mut reasons = Vec::new();
        for rule in &self.rules {
            let evaluation = rule.evaluate(attempts, last);
            finished |= evaluation.finished;
            if !evaluation.decision.allowed {
                denied = true;
                reasons.extend(evaluation.decision.message);
            }
        }
        let decision = if denied {
            PolicyDecision::deny(reasons.join("\n"))
        } else {
            PolicyDecision::allow()
        };
        RuleEvaluation { finished, decision }
    }

    /// Single decision for callers that want one answer.
    pub fn decide(&self, attempts: u32, last: Option<&AttemptSummary>) -> PolicyDecision {
        self.evaluate(attempts, last).decision
    }

    pub fn is_finished(&self, attempts: u32, last: Option<&AttemptSummary>) -> bool {
        self.rules.iter().any(|r| r.is_finished(attempts, last))
    }

    /// Non-empty descriptions of the active rules.
    pub fn describe_rules(&self) -> Vec<String> {
        self.rules
            .iter()
            .map(|r| r.description())
            .filter(|d| !d.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CountingGrades, StaticGrades, attempt, quiz};
    use failgrade_types::strings::STR_PREVENT_MORE_ATTEMPTS;
    use failgrade_types::{PolicyDecision, get_string};

    struct Silent;

    impl PolicyRule for Silent {
        fn id(&self) -> &'static str {
            "quizaccess_silent"
        }

        fn prevent_new_attempt(&self, _: u32, _: Option<&AttemptSummary>) -> PolicyDecision {
            PolicyDecision::deny("closed")
        }

        fn is_finished(&self, _: u32, _: Option<&AttemptSummary>) -> bool {
            false
        }
    }

    #[test]
    fn disabled_quiz_has_no_rules() {
        let grades = StaticGrades::passing();
        let manager = AccessManager::new(&RuleRegistry::builtin(), &quiz(false), &grades);
        assert!(manager.active_rule_ids().is_empty());
        assert!(manager.decide(3, Some(&attempt(3))).allowed);
        assert!(manager.describe_rules().is_empty());
    }

    #[test]
    fn passing_learner_is_denied_with_message() {
        let grades = StaticGrades::passing();
        let manager = AccessManager::new(&RuleRegistry::builtin(), &quiz(true), &grades);

        let reasons = manager.prevent_new_attempt(1, Some(&attempt(1)));
        assert_eq!(reasons, vec![get_string(STR_PREVENT_MORE_ATTEMPTS).unwrap()]);
        assert!(manager.is_finished(1, Some(&attempt(1))));
        assert!(!manager.decide(1, Some(&attempt(1))).allowed);
    }

    #[test]
    fn evaluate_consults_the_gradebook_once() {
        let grades = CountingGrades::default();
        let manager = AccessManager::new(&RuleRegistry::builtin(), &quiz(true), &grades);

        let evaluation = manager.evaluate(1, Some(&attempt(1)));
        assert_eq!(grades.calls.get(), 1);
        assert!(evaluation.finished);
        assert!(!evaluation.decision.allowed);
    }

    #[test]
    fn empty_descriptions_are_dropped_and_denials_collected() {
        let grades = StaticGrades::passing();
        let mut rules = RuleRegistry::builtin().applicable(&quiz(true), &grades);
        rules.push(Box::new(Silent));
        let manager = AccessManager::from_rules(rules);

        assert_eq!(manager.describe_rules().len(), 1);
        let decision = manager.decide(1, Some(&attempt(1)));
        assert!(!decision.allowed);
        assert!(decision.message.unwrap().ends_with("\nclosed"));
    }
}
