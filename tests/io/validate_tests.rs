use serde_json::json;
use tvform::{
    DocumentFormat, tv_settings_model, validate_data,
    io::{encode_document, parse_document_any},
};

#[test]
fn rejects_out_of_catalog_values() {
    let data = json!({
        "channels": ["https://a", ""],
        "timeoutSwitchLine": "7",
        "bingBg": "true",
    });
    let issues = validate_data(&tv_settings_model(), &data).unwrap_err();
    assert_eq!(issues.len(), 3);
    assert!(issues.iter().any(|issue| issue.starts_with("/channels/1")));
    assert!(issues.iter().any(|issue| issue.starts_with("/timeoutSwitchLine")));
    assert!(issues.iter().any(|issue| issue.starts_with("/bingBg")));
}

#[test]
fn non_object_data_fails_at_the_root() {
    let issues = validate_data(&tv_settings_model(), &json!([1])).unwrap_err();
    assert_eq!(issues.len(), 1);
    assert!(issues[0].starts_with("<root>"));
}

#[test]
fn documents_parse_and_encode_as_json() {
    let value = parse_document_any("{\"autoUpdate\": true}", DocumentFormat::Json).unwrap();
    assert_eq!(value, json!({ "autoUpdate": true }));

    let compact = encode_document(&value, DocumentFormat::Json, false).unwrap();
    assert_eq!(compact, "{\"autoUpdate\":true}");
    assert!(parse_document_any("{not json", DocumentFormat::Json).is_err());
}
