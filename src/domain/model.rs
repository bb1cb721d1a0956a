use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::io::{DocumentFormat, parse_document_str};

use super::descriptor::{
    ChoiceField, ChoiceOption, FieldDescriptor, OrderedListField, TextField, ToggleField,
};

/// Ordered, append-only registry of field descriptors.
///
/// Insertion order is render order and serialization order. Ids are not
/// checked for uniqueness; lookups resolve to the first descriptor
/// registered under an id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormModel {
    fields: Vec<FieldDescriptor>,
}

impl FormModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog document (`{"fields": [...]}`) in the given format.
    pub fn from_document_str(contents: &str, format: DocumentFormat) -> Result<Self> {
        let value = parse_document_str(contents, format)?;
        serde_json::from_value(value).context("catalog document does not describe a field list")
    }

    pub fn push(mut self, descriptor: FieldDescriptor) -> Self {
        self.fields.push(descriptor);
        self
    }

    pub fn add_text_field(
        self,
        id: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
        placeholder: impl Into<String>,
        default: impl Into<String>,
    ) -> Self {
        self.push(FieldDescriptor::Text(TextField {
            id: id.into(),
            label: label.into(),
            description: description.into(),
            placeholder: placeholder.into(),
            default: default.into(),
        }))
    }

    pub fn add_choice_field(
        self,
        id: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
        options: impl IntoIterator<Item = ChoiceOption>,
        default: Option<String>,
    ) -> Self {
        self.push(FieldDescriptor::Choice(ChoiceField {
            id: id.into(),
            label: label.into(),
            description: description.into(),
            options: options.into_iter().collect(),
            default,
        }))
    }

    pub fn add_toggle_field(
        self,
        id: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
        default: bool,
    ) -> Self {
        self.push(FieldDescriptor::Toggle(ToggleField {
            id: id.into(),
            label: label.into(),
            description: description.into(),
            default,
        }))
    }

    pub fn add_ordered_list_field(
        self,
        id: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
        item_placeholder: impl Into<String>,
        default: Vec<String>,
    ) -> Self {
        self.push(FieldDescriptor::OrderedList(OrderedListField {
            id: id.into(),
            label: label.into(),
            description: description.into(),
            item_placeholder: item_placeholder.into(),
            default,
        }))
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.id() == id)
    }

    /// Ids registered more than once, in first-seen order.
    pub fn duplicate_ids(&self) -> Vec<String> {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for field in &self.fields {
            *counts.entry(field.id()).or_insert(0) += 1;
        }
        counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(id, _)| id.to_string())
            .collect()
    }
}
