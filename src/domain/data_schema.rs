use serde_json::{Map, Value, json};

use super::{FieldDescriptor, FormModel};

const JSON_SCHEMA_DRAFT: &str = "http://json-schema.org/draft-07/schema#";

impl FormModel {
    /// JSON Schema describing the data object produced by serialization.
    ///
    /// Every property is optional: importing data only touches the fields it
    /// names.
    pub fn data_schema(&self) -> Value {
        let mut properties = Map::new();
        for field in self.fields() {
            if properties.contains_key(field.id()) {
                continue;
            }
            properties.insert(field.id().to_string(), property_schema(field));
        }
        json!({
            "$schema": JSON_SCHEMA_DRAFT,
            "type": "object",
            "properties": properties,
        })
    }
}

fn property_schema(field: &FieldDescriptor) -> Value {
    let mut schema = match field {
        FieldDescriptor::Text(text) => json!({
            "type": "string",
            "default": text.default,
        }),
        FieldDescriptor::Choice(choice) => {
            let values: Vec<&str> = choice
                .options
                .iter()
                .map(|option| option.value.as_str())
                .collect();
            let mut schema = json!({"type": "string"});
            if !values.is_empty() {
                schema["enum"] = json!(values);
            }
            if let Some(default) = &choice.default {
                schema["default"] = json!(default);
            }
            schema
        }
        FieldDescriptor::Toggle(toggle) => json!({
            "type": "boolean",
            "default": toggle.default,
        }),
        FieldDescriptor::OrderedList(list) => json!({
            "type": "array",
            "items": {"type": "string", "minLength": 1},
            "default": list.default,
        }),
    };
    schema["title"] = json!(field.label());
    if let Some(description) = field.description() {
        schema["description"] = json!(description);
    }
    schema
}
