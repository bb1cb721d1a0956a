use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The closed set of field kinds a form can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Choice,
    Toggle,
    OrderedList,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => write!(f, "text"),
            FieldKind::Choice => write!(f, "choice"),
            FieldKind::Toggle => write!(f, "toggle"),
            FieldKind::OrderedList => write!(f, "ordered-list"),
        }
    }
}

/// Static configuration for one form field.
///
/// Descriptors are created once and never mutated; the form engine builds a
/// live widget from each one at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldDescriptor {
    Text(TextField),
    Choice(ChoiceField),
    Toggle(ToggleField),
    OrderedList(OrderedListField),
}

impl FieldDescriptor {
    pub fn id(&self) -> &str {
        match self {
            FieldDescriptor::Text(field) => &field.id,
            FieldDescriptor::Choice(field) => &field.id,
            FieldDescriptor::Toggle(field) => &field.id,
            FieldDescriptor::OrderedList(field) => &field.id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            FieldDescriptor::Text(field) => &field.label,
            FieldDescriptor::Choice(field) => &field.label,
            FieldDescriptor::Toggle(field) => &field.label,
            FieldDescriptor::OrderedList(field) => &field.label,
        }
    }

    /// Description text, `None` when the descriptor has none to show.
    pub fn description(&self) -> Option<&str> {
        let text = match self {
            FieldDescriptor::Text(field) => &field.description,
            FieldDescriptor::Choice(field) => &field.description,
            FieldDescriptor::Toggle(field) => &field.description,
            FieldDescriptor::OrderedList(field) => &field.description,
        };
        if text.is_empty() { None } else { Some(text) }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            FieldDescriptor::Text(_) => FieldKind::Text,
            FieldDescriptor::Choice(_) => FieldKind::Choice,
            FieldDescriptor::Toggle(_) => FieldKind::Toggle,
            FieldDescriptor::OrderedList(_) => FieldKind::OrderedList,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextField {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default, deserialize_with = "opaque_string")]
    pub default: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceField {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub options: Vec<ChoiceOption>,
    #[serde(
        default,
        deserialize_with = "optional_opaque_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<String>,
}

impl ChoiceField {
    /// Index of the option whose value equals `value`.
    pub fn position_of(&self, value: &str) -> Option<usize> {
        self.options.iter().position(|option| option.value == value)
    }
}

/// One entry of a choice field. Values are opaque strings; a catalog may
/// spell them as numbers and they are stringified on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    #[serde(deserialize_with = "opaque_string")]
    pub value: String,
    pub label: String,
}

impl ChoiceOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleField {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub default: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderedListField {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub item_placeholder: String,
    #[serde(default)]
    pub default: Vec<String>,
}

fn opaque_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(stringify(&value))
}

fn optional_opaque_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.filter(|value| !value.is_null()).map(|value| stringify(&value)))
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Number(num) => number_text(num),
        other => other.to_string(),
    }
}

/// Shortest decimal text for a JSON number. Whole floats drop the `.0`
/// so `1.0` and `1` name the same option.
pub(crate) fn number_text(num: &serde_json::Number) -> String {
    match num.as_f64() {
        Some(n) if num.is_f64() && n == 0.0 => "0".to_string(),
        Some(n) if num.is_f64() && n.is_finite() && n.fract() == 0.0 && n.abs() < 1e21 => {
            format!("{n:.0}")
        }
        _ => num.to_string(),
    }
}
