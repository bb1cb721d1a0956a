use tvform::form::{
    AddRejection, EMPTY_SOURCE_MESSAGE, INVALID_SOURCE_MESSAGE, ItemBounds, SortableListState,
};

fn list(values: &[&str]) -> SortableListState {
    let values: Vec<String> = values.iter().map(|value| value.to_string()).collect();
    SortableListState::new("channels", "https://...", &values)
}

fn texts(state: &SortableListState) -> Vec<String> {
    state.items().iter().map(|item| item.text().to_string()).collect()
}

fn assert_contiguous(state: &SortableListState) {
    for (index, item) in state.items().iter().enumerate() {
        assert_eq!(item.position(), index);
        assert_eq!(item.name(), format!("channels[{index}]"));
    }
}

fn drag(state: &mut SortableListState, from: usize, pointer_y: f64) {
    let key = state.key_at(from).expect("item to drag");
    assert_eq!(state.drag_start(key), Some(from));
    let bounds = ItemBounds::rows(0.0, state.len());
    state.drag_over(pointer_y, &bounds);
}

#[test]
fn positions_stay_contiguous_across_mixed_operations() {
    let mut state = list(&["https://a", "https://b", "https://c"]);
    assert_contiguous(&state);

    let key = state.add_item().expect("all items valid");
    state.set_text(key, "https://d");
    assert_contiguous(&state);

    let second = state.key_at(1).expect("second item");
    assert!(state.remove_item(second));
    assert_contiguous(&state);

    drag(&mut state, 0, 2.9);
    assert!(state.drop_dragged().is_some());
    assert_contiguous(&state);
    assert_eq!(texts(&state), ["https://c", "https://d", "https://a"]);

    let last = state.key_at(2).expect("last item");
    assert!(state.move_item(last, -2));
    assert_contiguous(&state);
    assert_eq!(texts(&state), ["https://a", "https://c", "https://d"]);
}

#[test]
fn add_refuses_bad_existing_entries() {
    for bad in ["", "ftp://x", "notaurl"] {
        let mut state = list(&["https://ok", bad]);
        let rejection = state.add_item().expect_err("add must be refused");
        assert_eq!(state.len(), 2, "value {bad:?}");
        match rejection {
            AddRejection::Empty { position } => {
                assert_eq!(position, 1);
                assert_eq!(rejection.message(), EMPTY_SOURCE_MESSAGE);
            }
            AddRejection::NotUrl { position, .. } => {
                assert_eq!(position, 1);
                assert_eq!(rejection.message(), INVALID_SOURCE_MESSAGE);
            }
        }
    }

    let mut state = list(&["https://ok", "http://also.ok"]);
    assert!(state.add_item().is_ok());
    assert_eq!(state.len(), 3);
    assert_eq!(state.items()[2].text(), "");
}

#[test]
fn drag_over_places_item_before_first_lower_midpoint() {
    let mut state = list(&["https://a", "https://b", "https://c", "https://d"]);
    drag(&mut state, 3, 0.2);
    assert_eq!(
        texts(&state),
        ["https://d", "https://a", "https://b", "https://c"]
    );
    assert!(state.items()[0].is_dragging());

    // Dropping reindexes the live order.
    let outcome = state.drop_dragged().expect("drag in progress");
    assert_eq!((outcome.from, outcome.to), (3, 0));
    assert!(state.items().iter().all(|item| !item.is_dragging()));
    assert_contiguous(&state);
}

#[test]
fn drag_over_with_stale_bounds_is_ignored() {
    let mut state = list(&["https://a", "https://b"]);
    let key = state.key_at(0).expect("first item");
    state.drag_start(key);
    assert!(!state.drag_over(5.0, &ItemBounds::rows(0.0, 5)));
    assert_eq!(texts(&state), ["https://a", "https://b"]);
    assert!(state.drag_end());
    assert!(!state.drag_end());
}

#[test]
fn replacing_items_keeps_literal_values() {
    let mut state = list(&[]);
    assert_eq!(state.len(), 1);
    state.replace_all(vec!["ftp://legacy".into(), " ".into(), "https://a".into()]);
    assert_eq!(state.len(), 3);
    assert_contiguous(&state);
    assert_eq!(state.collect_values(), ["ftp://legacy", "https://a"]);
    assert!(state.has_content());
}
