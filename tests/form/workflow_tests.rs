use serde_json::json;
use tvform::{
    FieldNode, FormCommand, FormEngine, FormModel, Notification,
    form::{ControlNode, ItemKey},
};

fn channels_and_toggle() -> FormModel {
    FormModel::new()
        .add_ordered_list_field("channels", "Channels", "", "https://...", vec![])
        .add_toggle_field("autoUpdate", "Auto update", "", false)
}

fn item_keys(nodes: &[FieldNode]) -> Vec<ItemKey> {
    match &nodes[0].control {
        ControlNode::OrderedList { items } => items.iter().map(|item| item.key).collect(),
        other => panic!("expected a list, got {other:?}"),
    }
}

#[test]
fn typing_adding_and_toggling_serializes_the_edits() {
    let mut engine = FormEngine::new(channels_and_toggle());
    let mut nodes = Vec::new();
    engine.render(&mut nodes);
    let mut toasts: Vec<Notification> = Vec::new();

    assert_eq!(nodes.len(), 2);
    let first = item_keys(&nodes);
    assert_eq!(first.len(), 1);
    assert!(matches!(nodes[1].control, ControlNode::Toggle { checked: false }));

    engine
        .dispatch(
            FormCommand::EditItem {
                id: "channels".into(),
                key: first[0],
                value: "http://a.com".into(),
            },
            &mut toasts,
        )
        .unwrap();
    engine
        .dispatch(FormCommand::AddItem { id: "channels".into() }, &mut toasts)
        .unwrap();
    let keys = item_keys(&engine.nodes());
    engine
        .dispatch(
            FormCommand::EditItem {
                id: "channels".into(),
                key: keys[1],
                value: "http://b.com".into(),
            },
            &mut toasts,
        )
        .unwrap();
    engine
        .dispatch(FormCommand::FlipToggle { id: "autoUpdate".into() }, &mut toasts)
        .unwrap();

    assert!(toasts.is_empty());
    assert_eq!(
        serde_json::Value::Object(engine.serialize()),
        json!({ "channels": ["http://a.com", "http://b.com"], "autoUpdate": true })
    );
}

#[test]
fn deserialize_then_serialize_round_trips_normalized_data() {
    let mut engine = FormEngine::new(tvform::tv_settings_model());
    engine.render(&mut Vec::new());
    let data = json!({
        "channels": ["https://one.example/list", "http://two.example"],
        "dataValueProxy": "2",
        "timeoutSwitchLine": "30",
        "leftRightSelect": false,
        "fontScale": "1.6",
        "appFontFamily": "{\"id\":\"1\",\"font_name\":\"楷体\",\"font_key\":\"kaiti\",\"font_type\":\"ttf\"}",
        "bingBg": true,
        "autoUpdate": true,
        "lightVersionCheck": false,
    });

    assert!(engine.initialize_with_data(&data));
    assert_eq!(serde_json::Value::Object(engine.serialize()), data);
}

#[test]
fn missing_keys_leave_fields_untouched() {
    let mut engine = FormEngine::new(tvform::tv_settings_model());
    engine.render(&mut Vec::new());
    engine
        .dispatch(FormCommand::FlipToggle { id: "bingBg".into() }, &mut Vec::new())
        .unwrap();

    assert!(engine.initialize_with_data(&json!({ "autoUpdate": 1 })));
    let data = engine.get_data();
    assert_eq!(data["bingBg"], json!(true));
    assert_eq!(data["autoUpdate"], json!(true));
}

#[test]
fn null_and_scalar_payloads_are_refused() {
    let mut engine = FormEngine::new(tvform::tv_settings_model());
    engine.render(&mut Vec::new());
    let before = engine.serialize();

    assert!(!engine.initialize_with_data(&json!(null)));
    assert!(!engine.initialize_with_data(&json!("channels")));
    assert_eq!(engine.serialize(), before);
}

#[test]
fn projection_can_target_any_container() {
    #[derive(Default)]
    struct Labels(Vec<String>, usize);

    impl tvform::Container for Labels {
        fn clear(&mut self) {
            self.0.clear();
            self.1 += 1;
        }

        fn append(&mut self, node: FieldNode) {
            self.0.push(node.label);
        }
    }

    let mut engine = FormEngine::new(channels_and_toggle());
    let mut labels = Labels::default();
    engine.render(&mut labels);
    engine.render(&mut labels);

    assert_eq!(labels.0, vec!["Channels", "Auto update"]);
    assert_eq!(labels.1, 2);
}
