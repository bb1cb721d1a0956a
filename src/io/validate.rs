use jsonschema::validator_for;
use serde_json::Value;

use crate::domain::FormModel;

/// Check a data object against the schema derived from `model`.
///
/// Each error is rendered as `<pointer>: <message>`, with `<root>` standing
/// in for the empty pointer.
pub fn validate_data(model: &FormModel, data: &Value) -> Result<(), Vec<String>> {
    let schema = model.data_schema();
    let validator = validator_for(&schema)
        .map_err(|err| vec![format!("failed to compile data schema: {err}")])?;
    let issues: Vec<String> = validator
        .iter_errors(data)
        .map(|error| {
            let pointer = error.instance_path.to_string();
            let prefix = if pointer.is_empty() {
                "<root>".to_string()
            } else {
                pointer
            };
            format!("{prefix}: {error}")
        })
        .collect();
    if issues.is_empty() { Ok(()) } else { Err(issues) }
}
