//! Stable DTOs and IDs used across the failgrade workspace.
//!
//! This crate is intentionally boring:
//! - data types exchanged between the host and the policy core
//! - stable string IDs (plugin, table, field and backup element names)
//! - the locale string registry shown to users

#![forbid(unsafe_code)]

pub mod ids;
pub mod model;
pub mod strings;

pub use model::{
    AttemptSummary, CourseId, GradeThreshold, PolicyDecision, QuizId, QuizPolicyConfig, UserId,
};
pub use strings::{all_string_keys, get_string};
