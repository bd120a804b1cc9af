//! Stable identifiers shared with the host platform.
//!
//! These names are part of the persisted and exported formats; changing one breaks
//! existing databases and backups.

// Rules
pub const RULE_FAILGRADE: &str = "quizaccess_failgrade";

// Storage
pub const TABLE_SETTINGS: &str = "quizaccess_failgrade";
pub const FIELD_QUIZ_ID: &str = "quizid";
pub const FIELD_ENABLED: &str = "failgradeenabled";

/// Alias the host gives the quiz table when batch-loading access rule settings.
pub const QUIZ_TABLE_ALIAS: &str = "quiz";

/// Alias of the settings table inside the join fragment.
pub const SETTINGS_TABLE_ALIAS: &str = "failgrade";

// Backup
pub const BACKUP_ELEMENT: &str = "quizaccess_failgrade";
pub const BACKUP_SUBPLUGIN_TYPE: &str = "quizaccess";
pub const BACKUP_SUBPLUGIN_NAME: &str = "failgrade";
pub const BACKUP_CONNECTION_POINT: &str = "quiz";

// Settings form
pub const FORM_SECTION_SECURITY: &str = "security";

// Config
pub const SCHEMA_CONFIG_V1: &str = "failgrade.config.v1";
