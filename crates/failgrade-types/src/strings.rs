//! Locale string registry.
//!
//! Keys match the host's language pack for the plugin. Strings are literal; the host
//! may substitute a translated pack, but no runtime templating happens here.

pub const STR_PLUGIN_NAME: &str = "pluginname";
pub const STR_PRIVACY_METADATA: &str = "privacy:metadata";
pub const STR_ENABLED_LABEL: &str = "failgradeenabled";
pub const STR_ENABLED_HELP: &str = "failgradeenabled_help";
pub const STR_DESCRIPTION: &str = "failgradedescription";
pub const STR_PREVENT_MORE_ATTEMPTS: &str = "preventmoreattempts";

/// Look up an English string by key.
///
/// Returns `None` if the key is not recognized.
pub fn get_string(key: &str) -> Option<&'static str> {
    match key {
        STR_PLUGIN_NAME => Some("Fail grade"),
        STR_PRIVACY_METADATA => Some("The Fail grade plugin does not store any personal data."),
        STR_ENABLED_LABEL => Some("Block extra attempts if passing grade"),
        STR_ENABLED_HELP => Some(
            "If enabled, a student must not have a passing grade to attempt the quiz more times.",
        ),
        STR_DESCRIPTION => Some("Attempts available until reaching the passing grade."),
        STR_PREVENT_MORE_ATTEMPTS => {
            Some("You have already passed this quiz, and may not make further attempts.")
        }
        _ => None,
    }
}

/// List all known string keys.
pub fn all_string_keys() -> &'static [&'static str] {
    &[
        STR_PLUGIN_NAME,
        STR_PRIVACY_METADATA,
        STR_ENABLED_LABEL,
        STR_ENABLED_HELP,
        STR_DESCRIPTION,
        STR_PREVENT_MORE_ATTEMPTS,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_resolves_to_non_empty_text() {
        for key in all_string_keys() {
            let text = get_string(key);
            assert!(
                text.is_some_and(|t| !t.trim().is_empty()),
                "string '{key}' is missing or empty"
            );
        }
    }

    #[test]
    fn unknown_key_is_none() {
        assert_eq!(get_string("nope"), None);
    }
}
