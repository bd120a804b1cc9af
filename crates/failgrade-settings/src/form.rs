use failgrade_types::strings::{STR_ENABLED_HELP, STR_ENABLED_LABEL};
use failgrade_types::ids;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    SelectYesNo,
}

/// A control the host adds to the quiz settings form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub kind: FieldKind,
    pub section: &'static str,
    pub label_key: &'static str,
    pub help_key: &'static str,
    pub default: bool,
}

/// Fields for the quiz security section.
pub fn settings_form_fields() -> Vec<FormField> {
    vec![FormField {
        name: ids::FIELD_ENABLED,
        kind: FieldKind::SelectYesNo,
        section: ids::FORM_SECTION_SECURITY,
        label_key: STR_ENABLED_LABEL,
        help_key: STR_ENABLED_HELP,
        default: false,
    }]
}
