use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `failgrade.toml` schema v1.
///
/// Every key is optional; defaults apply when absent. Unknown keys are ignored so older
/// binaries can read newer files.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FailgradeConfigV1 {
    /// Optional schema string for tooling (`failgrade.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// SQLite database holding the settings table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,

    /// Prefix substituted into `{table}` placeholders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_prefix: Option<String>,

    /// Default tracing filter when `FAILGRADE_LOG` is unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,

    /// Active access rules. Absent means every built-in rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<String>>,
}
