use crate::model::FailgradeConfigV1;
use crate::sql::is_valid_table_prefix;
use anyhow::Context;
use camino::Utf8PathBuf;
use failgrade_domain::RuleRegistry;
use failgrade_types::ids;

pub const DEFAULT_DATABASE: &str = "failgrade.sqlite";
pub const DEFAULT_TABLE_PREFIX: &str = "mdl_";
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub database: Option<String>,
    pub table_prefix: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub database: Utf8PathBuf,
    pub table_prefix: String,
    pub log_filter: String,
    pub registry: RuleRegistry,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            database: Utf8PathBuf::from(DEFAULT_DATABASE),
            table_prefix: DEFAULT_TABLE_PREFIX.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            registry: RuleRegistry::builtin(),
        }
    }
}

pub fn resolve_config(
    cfg: FailgradeConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != ids::SCHEMA_CONFIG_V1
    {
        anyhow::bail!(
            "unsupported config schema: {schema} (expected {})",
            ids::SCHEMA_CONFIG_V1
        );
    }

    let mut resolved = ResolvedConfig::default();

    if let Some(db) = overrides.database.or(cfg.database) {
        if db.trim().is_empty() {
            anyhow::bail!("database path must not be empty");
        }
        resolved.database = Utf8PathBuf::from(db);
    }

    if let Some(prefix) = overrides.table_prefix.or(cfg.table_prefix) {
        validate_table_prefix(&prefix)?;
        resolved.table_prefix = prefix;
    }

    if let Some(filter) = cfg.log_filter {
        resolved.log_filter = filter;
    }

    if let Some(rules) = cfg.rules {
        resolved.registry = RuleRegistry::with_rules(rules.as_slice()).context("resolve rules")?;
    }

    Ok(resolved)
}

fn validate_table_prefix(prefix: &str) -> anyhow::Result<()> {
    if is_valid_table_prefix(prefix) {
        Ok(())
    } else {
        anyhow::bail!("invalid table_prefix: {prefix:?} (expected ASCII letters, digits or '_')")
    }
}
