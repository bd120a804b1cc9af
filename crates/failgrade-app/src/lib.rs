//! Use case orchestration for failgrade.
//!
//! This crate provides the application layer: use cases that coordinate the domain,
//! store, and backup layers on behalf of the host's attempt-start workflow and settings
//! pages. It is intentionally thin.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod backup;
mod check;
mod settings;
mod strings;

pub use backup::{export_backup, import_backup};
pub use check::{CheckInput, CheckOutput, check_new_attempt, decision_exit_code, describe_quiz};
pub use settings::{delete_settings, load_quiz_context, load_settings, save_settings};
pub use strings::{StringsOutput, format_strings, run_strings};
