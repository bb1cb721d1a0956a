use serde_json::json;

use crate::{
    domain::{ChoiceOption, FormModel, tv_settings_model},
    form::{FieldWidget, FormCommand, FormEngine, FormState},
};

fn duplicated_model() -> FormModel {
    FormModel::new()
        .add_text_field("name", "Name", "", "", "first")
        .add_toggle_field("flag", "Flag", "", true)
        .add_text_field("name", "Name again", "", "", "second")
}

#[test]
fn duplicate_ids_resolve_to_the_first_field() {
    let state = FormState::from_model(&duplicated_model());
    assert_eq!(state.len(), 3);

    let data = state.to_data();
    assert_eq!(data.len(), 2);
    assert_eq!(data["name"], json!("first"));
    assert_eq!(
        data.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["name", "flag"],
        "keys follow model order"
    );
}

#[test]
fn seeding_touches_only_known_keys() {
    let mut state = FormState::from_model(&tv_settings_model());
    state
        .seed_from_data(
            json!({
                "fontScale": 1.4,
                "autoUpdate": "yes",
                "mystery": 42,
            })
            .as_object()
            .expect("object literal"),
        )
        .expect("seed");

    let data = state.to_data();
    assert_eq!(data["fontScale"], json!("1.4"));
    assert_eq!(data["autoUpdate"], json!(true));
    assert_eq!(data["dataValueProxy"], json!("1"));
    assert!(!data.contains_key("mystery"));
}

#[test]
fn unknown_choice_value_keeps_previous_label() {
    let model = FormModel::new().add_choice_field(
        "proxy",
        "Proxy",
        "",
        [ChoiceOption::new("0", "Off"), ChoiceOption::new("1", "On")],
        Some("1".into()),
    );
    let mut engine = FormEngine::new(model);
    engine.deserialize(&json!({ "proxy": "7" })).expect("seed");

    let Some(FieldWidget::Choice(choice)) = engine.state().field("proxy").map(|f| f.widget())
    else {
        panic!("expected a choice widget");
    };
    assert_eq!(choice.value(), "7");
    assert_eq!(choice.display_label(), "On");
    assert_eq!(choice.highlighted(), None);
    assert_eq!(engine.serialize()["proxy"], json!("7"));
}

#[test]
fn non_array_list_value_empties_the_list() {
    let mut engine = FormEngine::new(tv_settings_model());
    engine
        .deserialize(&json!({ "channels": ["https://a", "https://b"] }))
        .expect("seed");
    engine
        .deserialize(&json!({ "channels": "https://c" }))
        .expect("seed");

    let list = engine
        .state()
        .field("channels")
        .and_then(|field| field.list().ok())
        .expect("list widget");
    assert!(list.is_empty());
}

#[test]
fn list_values_skip_blank_items_but_keep_unchecked_text() {
    let mut engine = FormEngine::new(tv_settings_model());
    engine
        .deserialize(&json!({ "channels": ["  ", "ftp://legacy", " https://a "] }))
        .expect("seed");

    assert_eq!(
        engine.serialize()["channels"],
        json!(["ftp://legacy", "https://a"])
    );
    let list = engine
        .state()
        .field("channels")
        .and_then(|field| field.list().ok())
        .expect("list widget");
    assert_eq!(list.len(), 3);
    assert_eq!(list.items()[2].name(), "channels[2]");
}

#[test]
fn selecting_a_missing_option_still_closes_the_dropdown() {
    let mut engine = FormEngine::new(tv_settings_model());
    let mut sink = Vec::new();
    engine
        .dispatch(
            FormCommand::ToggleDropdown {
                id: "fontScale".into(),
            },
            &mut sink,
        )
        .expect("toggle");
    let result = engine.dispatch(
        FormCommand::SelectOption {
            id: "fontScale".into(),
            index: 99,
        },
        &mut sink,
    );

    assert!(result.is_err());
    assert_eq!(engine.state().open_dropdown(), None);
    assert_eq!(engine.serialize()["fontScale"], json!("1"));
}

#[test]
fn whole_float_choice_value_resyncs_the_label() {
    let mut engine = FormEngine::new(tv_settings_model());
    engine.deserialize(&json!({ "fontScale": "1.4" })).expect("seed");
    engine.deserialize(&json!({ "fontScale": 1.0 })).expect("seed");

    let Some(FieldWidget::Choice(choice)) = engine.state().field("fontScale").map(|f| f.widget())
    else {
        panic!("expected a choice widget");
    };
    assert_eq!(choice.value(), "1");
    assert_eq!(choice.display_label(), "1x");
    assert_eq!(choice.highlighted(), Some(0));
    assert_eq!(engine.serialize()["fontScale"], json!("1"));
}

#[test]
fn falsy_list_entries_become_blank_items() {
    let mut engine = FormEngine::new(tv_settings_model());
    engine
        .deserialize(&json!({ "channels": [null, 0, false, "http://a"] }))
        .expect("seed");

    assert_eq!(engine.serialize()["channels"], json!(["http://a"]));
    let list = engine
        .state()
        .field("channels")
        .and_then(|field| field.list().ok())
        .expect("list widget");
    assert_eq!(list.len(), 4);
    assert_eq!(list.items()[0].text(), "");
}
