//! Field kinds and the per-column field model.

use serde::Serialize;

/// Input category; drives markup shape and submit-time transforms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    TextArea,
    Number,
    Dropdown,
    Radio,
    Date,
    Checkbox,
    Password,
}

impl FieldKind {
    /// Kinds whose options come from an enum argument list.
    pub fn has_options(self) -> bool {
        matches!(self, FieldKind::Dropdown | FieldKind::Radio)
    }

    /// Kinds where an empty string is a legitimate value.
    pub fn is_textual(self) -> bool {
        matches!(self, FieldKind::Text | FieldKind::TextArea | FieldKind::Password)
    }
}

/// Maximum input length used when the column does not declare one.
pub const DEFAULT_MAX_LENGTH: u32 = 255;

/// One form field derived from one column.
///
/// `possible_values` is `Some` exactly when `kind` is `Dropdown` or `Radio`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldModel {
    pub name: String,
    pub kind: FieldKind,
    /// Custom label; when `None` the renderer derives one from `name`.
    pub label: Option<String>,
    pub required: bool,
    pub max_length: u32,
    pub default_value: Option<String>,
    pub possible_values: Option<Vec<String>>,
    pub accepts_multiple: bool,
    /// Lower-cased SQL type keyword without arguments, e.g. `varchar`.
    pub base_type: String,
    /// Date stored as unix epoch seconds in a `bigint` column.
    pub unix_timestamp: bool,
}

impl FieldModel {
    /// Label text shown to the user: the custom label, or the column name
    /// with underscores as spaces and every word capitalised.
    pub fn display_label(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => title_case(&self.name.replace('_', " ")),
        }
    }

    /// `json` columns and `[json]`-flagged columns are entered as a
    /// comma-delimited list and stored as a JSON array.
    pub fn is_json(&self) -> bool {
        self.accepts_multiple
    }
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = c.is_whitespace();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str) -> FieldModel {
        FieldModel {
            name: name.into(),
            kind: FieldKind::Text,
            label: None,
            required: false,
            max_length: DEFAULT_MAX_LENGTH,
            default_value: None,
            possible_values: None,
            accepts_multiple: false,
            base_type: "varchar".into(),
            unix_timestamp: false,
        }
    }

    #[test]
    fn test_display_label_title_cases_name() {
        assert_eq!(field("first_name").display_label(), "First Name");
        assert_eq!(field("email").display_label(), "Email");
    }

    #[test]
    fn test_display_label_prefers_custom_label() {
        let mut f = field("dob");
        f.label = Some("Date of birth".into());
        assert_eq!(f.display_label(), "Date of birth");
    }
}
