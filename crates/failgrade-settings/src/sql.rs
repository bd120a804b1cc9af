//! Settings-join contract.
//!
//! The host batch-loads every access rule's settings in one query: it selects from the
//! quiz table aliased as `quiz`, appends each rule's fields and LEFT JOINs, and binds the
//! union of their named parameters. Table names are written as `{name}` and expanded
//! with the site prefix by [`expand_table_refs`].

use failgrade_types::ids;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq)]
pub struct SettingsSql {
    /// Select-list entries, aliased to start with the plugin name where needed.
    pub fields: Vec<String>,
    /// LEFT JOIN fragment against the `quiz` alias.
    pub joins: String,
    /// Named placeholders; names start with the plugin name.
    pub params: BTreeMap<String, Value>,
}

/// Contract for this rule. `quiz_id` is available to the SQL as `quiz.id`, so it is
/// not bound here.
pub fn settings_sql() -> SettingsSql {
    SettingsSql {
        fields: vec![ids::FIELD_ENABLED.to_string()],
        joins: format!(
            "LEFT JOIN {{{table}}} {alias} ON {alias}.{quiz_field} = {quiz}.id",
            table = ids::TABLE_SETTINGS,
            alias = ids::SETTINGS_TABLE_ALIAS,
            quiz_field = ids::FIELD_QUIZ_ID,
            quiz = ids::QUIZ_TABLE_ALIAS,
        ),
        params: BTreeMap::new(),
    }
}

/// Whether `prefix` is safe to splice into table names: ASCII letters, digits and `_`.
pub fn is_valid_table_prefix(prefix: &str) -> bool {
    prefix
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Replace `{table}` references with `prefix` + `table`.
///
/// Braces not enclosing a plain identifier are left as they are.
pub fn expand_table_refs(sql: &str, prefix: &str) -> String {
    let mut out = String::with_capacity(sql.len() + prefix.len() * 2);
    let mut rest = sql;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close)
                if close > 0
                    && after[..close]
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '_') =>
            {
                out.push_str(prefix);
                out.push_str(&after[..close]);
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_matches_host_shape() {
        let sql = settings_sql();
        assert_eq!(sql.fields, vec!["failgradeenabled"]);
        assert_eq!(
            sql.joins,
            "LEFT JOIN {quizaccess_failgrade} failgrade ON failgrade.quizid = quiz.id"
        );
        assert!(sql.params.is_empty());
    }

    #[test]
    fn table_refs_get_prefix() {
        let joins = settings_sql().joins;
        assert_eq!(
            expand_table_refs(&joins, "mdl_"),
            "LEFT JOIN mdl_quizaccess_failgrade failgrade ON failgrade.quizid = quiz.id"
        );
    }

    #[test]
    fn non_identifier_braces_are_kept() {
        assert_eq!(expand_table_refs("a {b c} {} {", "p_"), "a {b c} {} {");
        assert_eq!(expand_table_refs("{x}{y}", ""), "xy");
    }

    #[test]
    fn table_prefix_charset() {
        assert!(is_valid_table_prefix("mdl_"));
        assert!(is_valid_table_prefix(""));
        assert!(!is_valid_table_prefix("mdl-"));
        assert!(!is_valid_table_prefix("x;--"));
    }
}
