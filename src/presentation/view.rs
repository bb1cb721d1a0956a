use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::{
    app::Focus,
    form::{ControlNode, FieldNode},
};

use super::{
    fields::{FieldsView, render_fields},
    footer::render_footer,
    hit::HitMap,
    toasts::render_toasts,
};

pub struct UiContext<'a> {
    pub title: &'a str,
    pub nodes: &'a [FieldNode],
    pub focus: Option<Focus>,
    pub option_cursor: usize,
    pub status_message: &'a str,
    pub focus_label: Option<String>,
    pub channels_ready: bool,
    pub help: Option<&'a str>,
    pub toasts: Vec<ToastRender<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct ToastRender<'a> {
    pub message: &'a str,
    pub error: bool,
    pub fading: bool,
}

/// Draw one frame and rebuild `hits` from what ended up on screen.
pub fn draw(frame: &mut Frame<'_>, ctx: UiContext<'_>, hits: &mut HitMap) {
    hits.clear();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(4)])
        .split(frame.area());

    let dropdown_open = ctx
        .nodes
        .iter()
        .any(|node| matches!(node.control, ControlNode::Choice { open: true, .. }));
    render_fields(
        frame,
        chunks[0],
        FieldsView {
            title: ctx.title,
            nodes: ctx.nodes,
            focus: ctx.focus,
            option_cursor: ctx.option_cursor,
            cursor_enabled: !dropdown_open,
        },
        hits,
    );
    render_footer(frame, chunks[1], &ctx);
    render_toasts(frame, &ctx.toasts);
}
