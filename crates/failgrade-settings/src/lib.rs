//! Config parsing, the quiz settings form field, and the settings-join contract.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as
//! strings, and describes SQL without running it.

#![forbid(unsafe_code)]

mod form;
mod model;
mod resolve;
mod sql;

pub use form::{FieldKind, FormField, settings_form_fields};
pub use model::FailgradeConfigV1;
pub use resolve::{Overrides, ResolvedConfig};
pub use sql::{SettingsSql, expand_table_refs, is_valid_table_prefix, settings_sql};

/// Parse `failgrade.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<FailgradeConfigV1> {
    let cfg: FailgradeConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config (defaults + file + overrides).
pub fn resolve_config(
    cfg: FailgradeConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
