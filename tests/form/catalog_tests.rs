use serde_json::{Value, json};
use tvform::{
    FieldKind, FormEngine, FormModel, tv_settings_model, validate_data,
    form::{ControlNode, PLACEHOLDER_LABEL},
};

#[test]
fn catalog_defaults_serialize_to_valid_data() {
    let mut engine = FormEngine::new(tv_settings_model());
    let mut nodes = Vec::new();
    engine.render(&mut nodes);

    let data = Value::Object(engine.serialize());
    assert_eq!(data["channels"], json!([]));
    assert_eq!(data["dataValueProxy"], json!("1"));
    assert_eq!(data["timeoutSwitchLine"], json!("15"));
    assert_eq!(data["leftRightSelect"], json!(true));
    assert_eq!(data["fontScale"], json!("1"));
    assert_eq!(data["bingBg"], json!(false));
    assert_eq!(data["lightVersionCheck"], json!(true));
    assert!(
        data["appFontFamily"]
            .as_str()
            .is_some_and(|font| font.contains("\"font_key\":\"system\""))
    );
    assert_eq!(validate_data(engine.model(), &data), Ok(()));
}

#[test]
fn catalog_kinds_match_the_shipped_settings() {
    let model = tv_settings_model();
    let kinds: Vec<FieldKind> = model.fields().iter().map(|field| field.kind()).collect();
    assert_eq!(kinds[0], FieldKind::OrderedList);
    assert_eq!(
        kinds.iter().filter(|kind| **kind == FieldKind::Choice).count(),
        4
    );
    assert_eq!(
        kinds.iter().filter(|kind| **kind == FieldKind::Toggle).count(),
        4
    );
}

#[test]
fn unmatched_choice_default_shows_first_label() {
    let model = FormModel::new().add_choice_field(
        "scale",
        "Scale",
        "",
        [
            tvform::ChoiceOption::new("1", "1x"),
            tvform::ChoiceOption::new("2", "2x"),
        ],
        Some("3".into()),
    );
    let engine = FormEngine::new(model);
    let nodes = engine.nodes();
    let ControlNode::Choice {
        selected_label,
        options,
        ..
    } = &nodes[0].control
    else {
        panic!("expected a choice");
    };
    assert_eq!(selected_label, "1x");
    assert!(options.iter().all(|option| !option.selected));
    assert_ne!(selected_label, PLACEHOLDER_LABEL);
}

#[test]
fn duplicate_ids_are_reported_not_rejected() {
    let model = FormModel::new()
        .add_toggle_field("flag", "First", "", true)
        .add_toggle_field("flag", "Second", "", false);
    assert_eq!(model.duplicate_ids(), vec!["flag".to_string()]);

    let mut engine = FormEngine::new(model);
    let mut nodes = Vec::new();
    engine.render(&mut nodes);
    assert_eq!(nodes.len(), 2);
    assert_eq!(engine.serialize()["flag"], json!(true));
}

#[test]
fn model_loads_from_a_json_catalog() {
    let catalog = r#"{"fields": [
        {"kind": "orderedList", "id": "channels", "label": "Sources", "default": ["https://a"]},
        {"kind": "toggle", "id": "autoUpdate", "label": "Auto update", "default": true}
    ]}"#;
    let model = FormModel::from_document_str(catalog, tvform::DocumentFormat::Json)
        .expect("catalog parses");
    assert_eq!(model.len(), 2);

    let engine = FormEngine::new(model);
    assert_eq!(
        Value::Object(engine.serialize()),
        json!({ "channels": ["https://a"], "autoUpdate": true })
    );
}
