//! The `strings` use case: look up user-facing text.

use failgrade_types::strings;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StringsOutput {
    /// One string.
    Found { key: String, text: &'static str },
    /// Every string, in registry order.
    All(Vec<(&'static str, &'static str)>),
    NotFound {
        key: String,
        available: &'static [&'static str],
    },
}

pub fn run_strings(key: Option<&str>) -> StringsOutput {
    match key {
        None => StringsOutput::All(
            strings::all_string_keys()
                .iter()
                .filter_map(|k| strings::get_string(k).map(|t| (*k, t)))
                .collect(),
        ),
        Some(key) => match strings::get_string(key) {
            Some(text) => StringsOutput::Found {
                key: key.to_string(),
                text,
            },
            None => StringsOutput::NotFound {
                key: key.to_string(),
                available: strings::all_string_keys(),
            },
        },
    }
}

/// Format for terminal display.
pub fn format_strings(output: &StringsOutput) -> String {
    let mut out = String::new();
    match output {
        StringsOutput::Found { text, .. } => {
            out.push_str(text);
            out.push('\n');
        }
        StringsOutput::All(entries) => {
            for (key, text) in entries {
                out.push_str(&format!("{key}: {text}\n"));
            }
        }
        StringsOutput::NotFound { key, available } => {
            out.push_str(&format!("Unknown string key: {key}\n\nAvailable keys:\n"));
            for k in available.iter() {
                out.push_str(&format!("  {k}\n"));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_every_key() {
        let StringsOutput::All(entries) = run_strings(None) else {
            panic!("expected all strings");
        };
        assert_eq!(entries.len(), strings::all_string_keys().len());
    }

    #[test]
    fn unknown_key_lists_alternatives() {
        let output = run_strings(Some("bogus"));
        let text = format_strings(&output);
        assert!(text.contains("Unknown string key: bogus"));
        assert!(text.contains("preventmoreattempts"));
    }

    #[test]
    fn found_prints_text_only() {
        let text = format_strings(&run_strings(Some("pluginname")));
        assert_eq!(text, "Fail grade\n");
    }
}
