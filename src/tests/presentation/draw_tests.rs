use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};
use serde_json::json;

use crate::{
    app::Focus,
    domain::tv_settings_model,
    form::{FieldNode, FormCommand, FormEngine},
    presentation::{HitMap, HitTarget, ToastRender, UiContext, draw},
};

fn row_text(buffer: &Buffer, row: u16) -> String {
    (0..buffer.area.width)
        .map(|col| buffer[(col, row)].symbol())
        .collect()
}

fn screen_text(buffer: &Buffer) -> String {
    (0..buffer.area.height)
        .map(|row| row_text(buffer, row))
        .collect::<Vec<_>>()
        .join("\n")
}

fn context<'a>(nodes: &'a [FieldNode], toasts: Vec<ToastRender<'a>>) -> UiContext<'a> {
    UiContext {
        title: "TV Settings",
        nodes,
        focus: Some(Focus::on_field(0)),
        option_cursor: 0,
        status_message: "Ready",
        focus_label: Some("Subscription sources".into()),
        channels_ready: false,
        help: Some("Ctrl+Q quit"),
        toasts,
    }
}

fn render(ctx: UiContext<'_>, width: u16, height: u16) -> (Buffer, HitMap) {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
    let mut hits = HitMap::default();
    terminal
        .draw(|frame| draw(frame, ctx, &mut hits))
        .expect("draw");
    (terminal.backend().buffer().clone(), hits)
}

#[test]
fn frame_shows_title_fields_and_footer() {
    let engine = FormEngine::new(tv_settings_model());
    let nodes = engine.nodes();
    let (buffer, _) = render(context(&nodes, Vec::new()), 100, 60);
    let screen = screen_text(&buffer);

    assert!(screen.contains("TV Settings"));
    assert!(screen.contains("Subscription sources"));
    assert!(screen.contains("Data proxy"));
    assert!(screen.contains("Proxy 1"));
    assert!(screen.contains("Ctrl+Q quit"));
    assert!(screen.contains("[no source]"));
}

#[test]
fn toasts_stack_in_the_top_right_corner() {
    let engine = FormEngine::new(tv_settings_model());
    let nodes = engine.nodes();
    let toasts = vec![
        ToastRender {
            message: "JSON data copied to clipboard",
            error: false,
            fading: false,
        },
        ToastRender {
            message: "At least one subscription source is required",
            error: true,
            fading: true,
        },
    ];
    let (buffer, _) = render(context(&nodes, toasts), 100, 60);

    let first = (0..10)
        .find(|&row| row_text(&buffer, row).contains("JSON data copied"))
        .expect("first toast near the top");
    let second = (0..20)
        .find(|&row| row_text(&buffer, row).contains("subscription source is required"))
        .expect("second toast");
    assert!(second > first);
    let column = row_text(&buffer, first)
        .find("JSON")
        .expect("toast text column");
    assert!(column > 40, "toast should hug the right edge, found at {column}");
}

#[test]
fn open_dropdown_lists_options_as_targets() {
    let mut engine = FormEngine::new(tv_settings_model());
    engine
        .dispatch(
            FormCommand::ToggleDropdown {
                id: "timeoutSwitchLine".into(),
            },
            &mut Vec::new(),
        )
        .expect("open");
    let nodes = engine.nodes();
    let (buffer, hits) = render(context(&nodes, Vec::new()), 100, 60);

    let option_rows: Vec<u16> = (0..60)
        .filter(|&row| {
            matches!(
                hits.hit(4, row),
                Some(HitTarget::DropdownOption { field: 2, .. })
            )
        })
        .collect();
    assert_eq!(option_rows.len(), 6);
    assert!(row_text(&buffer, option_rows[2]).contains("15s"));
}

#[test]
fn list_rows_follow_the_item_count() {
    let mut engine = FormEngine::new(tv_settings_model());
    let nodes = engine.nodes();
    let (_, hits) = render(context(&nodes, Vec::new()), 100, 60);
    assert_eq!(hits.list_rows(0).map(|rows| rows.count), Some(1));

    engine
        .deserialize(&json!({ "channels": ["https://a", "https://b"] }))
        .expect("seed");
    let nodes = engine.nodes();
    let (buffer, hits) = render(context(&nodes, Vec::new()), 100, 60);
    let rows = hits.list_rows(0).expect("list rows");
    assert_eq!(rows.count, 2);
    assert!(row_text(&buffer, rows.first_row).contains("https://a"));
    assert!(row_text(&buffer, rows.first_row + 1).contains("https://b"));

    engine
        .deserialize(&json!({ "channels": [] }))
        .expect("seed");
    let nodes = engine.nodes();
    let (buffer, hits) = render(context(&nodes, Vec::new()), 100, 60);
    assert!(hits.list_rows(0).is_none());
    assert!(screen_text(&buffer).contains("Add source"));
}

#[test]
fn tiny_terminal_still_draws() {
    let engine = FormEngine::new(tv_settings_model());
    let nodes = engine.nodes();
    let (buffer, _) = render(context(&nodes, Vec::new()), 30, 10);
    assert!(screen_text(&buffer).contains("TV"));
}
