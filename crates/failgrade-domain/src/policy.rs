use failgrade_types::{AttemptSummary, PolicyDecision};

/// Both answers a rule gives for one learner, taken from a single look at the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleEvaluation {
    pub finished: bool,
    pub decision: PolicyDecision,
}

/// Capability set every quiz access rule provides.
///
/// Rules are constructed per quiz by a factory in the [`crate::registry`]; the trait only
/// covers what a constructed rule can answer.
pub trait PolicyRule {
    /// Stable rule id, as listed in the registry.
    fn id(&self) -> &'static str;

    /// Whether a learner with `attempts` previous attempts may start another one.
    fn prevent_new_attempt(&self, attempts: u32, last: Option<&AttemptSummary>) -> PolicyDecision;

    /// True if this rule will never allow this learner another attempt.
    fn is_finished(&self, attempts: u32, last: Option<&AttemptSummary>) -> bool;

    /// `finished` and the decision together. Rules that consult a host port override
    /// this so both answers come from one lookup.
    fn evaluate(&self, attempts: u32, last: Option<&AttemptSummary>) -> RuleEvaluation {
        RuleEvaluation {
            finished: self.is_finished(attempts, last),
            decision: self.prevent_new_attempt(attempts, last),
        }
    }

    /// Text shown on the quiz view page. Rules with nothing to say return an empty string.
    fn description(&self) -> String {
        String::new()
    }
}
