//! Property-based tests for the pass decision.
//!
//! These check the invariants the host relies on:
//! - the first attempt is never blocked
//! - missing grade data never blocks
//! - blocking happens exactly at or above the pass grade
//! - the decision agrees with the pass check and is deterministic

use crate::policy::PolicyRule;
use crate::rules::failgrade::{FailGradeRule, decide, is_finished};
use crate::test_support::{COURSE, QUIZ, StaticGrades, attempt};
use failgrade_types::{GradeThreshold, QuizPolicyConfig};
use proptest::prelude::*;

fn arb_grade() -> impl Strategy<Value = f64> {
    prop_oneof![0.0f64..=100.0, (0u32..=100).prop_map(f64::from)]
}

fn arb_optional_grade() -> impl Strategy<Value = Option<f64>> {
    prop::option::of(arb_grade())
}

proptest! {
    #[test]
    fn zero_attempts_is_never_finished(grade in arb_optional_grade(), pass in arb_optional_grade()) {
        prop_assert!(!is_finished(0, grade, pass));
        prop_assert!(decide(0, Some(&GradeThreshold::new(pass, grade))).allowed);
    }

    #[test]
    fn missing_grade_or_threshold_is_never_finished(
        attempts in 1u32..50,
        present in arb_grade(),
        missing_grade in any::<bool>(),
    ) {
        let (grade, pass) = if missing_grade { (None, Some(present)) } else { (Some(present), None) };
        prop_assert!(!is_finished(attempts, grade, pass));
        prop_assert!(decide(attempts, None).allowed);
    }

    #[test]
    fn finished_iff_grade_reaches_pass(attempts in 1u32..50, grade in arb_grade(), pass in arb_grade()) {
        prop_assert_eq!(is_finished(attempts, Some(grade), Some(pass)), grade >= pass);
    }

    #[test]
    fn decision_agrees_with_pass_check(
        attempts in 0u32..50,
        grade in arb_optional_grade(),
        pass in arb_optional_grade(),
    ) {
        let decision = decide(attempts, Some(&GradeThreshold::new(pass, grade)));
        if is_finished(attempts, grade, pass) {
            prop_assert!(!decision.allowed);
            prop_assert!(decision.message.as_deref().is_some_and(|m| !m.is_empty()));
        } else {
            prop_assert!(decision.allowed);
            prop_assert!(decision.message.is_none());
        }
    }

    #[test]
    fn evaluation_is_deterministic(attempts in 0u32..50, grade in arb_optional_grade(), pass in arb_optional_grade()) {
        let grades = StaticGrades::with(grade, pass);
        let config = QuizPolicyConfig::new(QUIZ, true);
        let rule = FailGradeRule::create_if_applicable(Some(&config), COURSE, &grades).unwrap();
        let last = attempt(attempts.max(1));

        let first = rule.prevent_new_attempt(attempts, Some(&last));
        let second = rule.prevent_new_attempt(attempts, Some(&last));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn create_if_applicable_follows_enabled(enabled in any::<bool>()) {
        let grades = StaticGrades::none();
        let config = QuizPolicyConfig::new(QUIZ, enabled);
        prop_assert_eq!(
            FailGradeRule::create_if_applicable(Some(&config), COURSE, &grades).is_some(),
            enabled
        );
    }
}
