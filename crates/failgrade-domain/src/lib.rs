//! Pure policy evaluation (no IO).
//!
//! Input: a quiz context, the learner's attempt count and last attempt, plus a
//! grade lookup supplied by the host.
//! Output: allow/deny decisions and user-facing messages.

#![forbid(unsafe_code)]

pub mod manager;
pub mod model;
pub mod policy;
pub mod ports;
pub mod registry;
pub mod rules;

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod proptest;

pub use manager::AccessManager;
pub use model::QuizContext;
pub use policy::{PolicyRule, RuleEvaluation};
pub use ports::{AttemptHistory, AttemptHistorySnapshot, GradeLookup, LookupError};
pub use registry::{RuleRegistration, RuleRegistry, UnknownRule};
pub use rules::failgrade::{self, FailGradeRule};
