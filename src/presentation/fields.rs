use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use textwrap::wrap;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{
    app::Focus,
    form::{ControlNode, FieldNode, ItemNode, OptionNode},
};

use super::hit::{HitMap, HitTarget, ListRows};

const DELETE_MARK: &str = " ✕ ";
const DRAG_HANDLE: &str = "⠿ ";

/// One screen line of the field panel plus what it maps back to.
#[derive(Debug, Clone)]
pub(crate) struct RenderLine {
    pub line: Line<'static>,
    pub target: Option<HitTarget>,
    /// Narrow region flush with the right edge.
    pub trailing: Option<HitTarget>,
    /// Column of the text cursor, for the focused editable line.
    pub cursor: Option<u16>,
}

impl RenderLine {
    fn plain(line: Line<'static>) -> Self {
        Self {
            line,
            target: None,
            trailing: None,
            cursor: None,
        }
    }

    fn targeted(line: Line<'static>, target: HitTarget) -> Self {
        Self {
            line,
            target: Some(target),
            trailing: None,
            cursor: None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldsView<'a> {
    pub title: &'a str,
    pub nodes: &'a [FieldNode],
    pub focus: Option<Focus>,
    pub option_cursor: usize,
    pub cursor_enabled: bool,
}

pub(crate) fn render_fields(frame: &mut Frame<'_>, area: Rect, view: FieldsView<'_>, hits: &mut HitMap) {
    let block = Block::default()
        .title(view.title.to_string())
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if view.nodes.is_empty() {
        frame.render_widget(Paragraph::new("No fields to edit"), inner);
        return;
    }

    let lines = build_lines(&view, inner.width);
    let offset = scroll_offset(&lines, &view, inner.height);

    for (idx, render) in lines.iter().enumerate().skip(offset) {
        let visible = idx - offset;
        if visible >= usize::from(inner.height) {
            break;
        }
        let row = inner.y + visible as u16;
        let row_area = Rect::new(inner.x, row, inner.width, 1);
        if let Some(target) = render.target {
            hits.push(row_area, target);
        }
        if let Some(target) = render.trailing {
            let width = DELETE_MARK.width() as u16;
            let x = inner.x + inner.width.saturating_sub(width);
            hits.push(Rect::new(x, row, width.min(inner.width), 1), target);
        }
        if view.cursor_enabled
            && let Some(column) = render.cursor
        {
            let x = inner.x + column.min(inner.width.saturating_sub(1));
            frame.set_cursor_position((x, row));
        }
    }
    register_lists(&view, &lines, offset, inner, hits);

    let visible: Vec<Line<'static>> = lines
        .into_iter()
        .skip(offset)
        .take(usize::from(inner.height))
        .map(|render| render.line)
        .collect();
    frame.render_widget(Paragraph::new(visible), inner);
}

// Lists only count as drop zones while every item row is on screen.
fn register_lists(
    view: &FieldsView<'_>,
    lines: &[RenderLine],
    offset: usize,
    inner: Rect,
    hits: &mut HitMap,
) {
    for (field, node) in view.nodes.iter().enumerate() {
        let ControlNode::OrderedList { items } = &node.control else {
            continue;
        };
        if items.is_empty() {
            continue;
        }
        let Some(first) = lines.iter().position(
            |render| matches!(render.target, Some(HitTarget::Item { field: f, .. }) if f == field),
        ) else {
            continue;
        };
        let last = first + items.len();
        if first < offset || last > offset + usize::from(inner.height) {
            continue;
        }
        hits.push_list(ListRows {
            field,
            first_row: inner.y + (first - offset) as u16,
            count: items.len(),
        });
    }
}

fn scroll_offset(lines: &[RenderLine], view: &FieldsView<'_>, height: u16) -> usize {
    let height = usize::from(height);
    if height == 0 || lines.len() <= height {
        return 0;
    }
    let anchor = anchor_line(lines, view).unwrap_or(0);
    anchor.saturating_sub(height - 1)
}

fn anchor_line(lines: &[RenderLine], view: &FieldsView<'_>) -> Option<usize> {
    let focus = view.focus?;
    let matches_focus = |target: &HitTarget| match (*target, focus.item) {
        (HitTarget::Item { field, key }, Some(item)) => field == focus.field && key == item,
        (other, None) => other.field() == focus.field,
        _ => false,
    };
    lines
        .iter()
        .enumerate()
        .filter(|(_, render)| render.target.as_ref().is_some_and(matches_focus))
        .map(|(idx, _)| idx)
        .next_back()
}

pub(crate) fn build_lines(view: &FieldsView<'_>, width: u16) -> Vec<RenderLine> {
    let mut lines = Vec::new();
    for (idx, node) in view.nodes.iter().enumerate() {
        let focused = view.focus.filter(|focus| focus.field == idx);
        field_lines(idx, node, focused, view.option_cursor, width, &mut lines);
        lines.push(RenderLine::plain(Line::from("")));
    }
    lines.pop();
    lines
}

fn field_lines(
    idx: usize,
    node: &FieldNode,
    focus: Option<Focus>,
    option_cursor: usize,
    width: u16,
    out: &mut Vec<RenderLine>,
) {
    let label_style = if focus.is_some() {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    };
    out.push(RenderLine::targeted(
        Line::from(Span::styled(node.label.clone(), label_style)),
        HitTarget::Field(idx),
    ));

    let field_focused = focus.is_some_and(|focus| focus.item.is_none());
    match &node.control {
        ControlNode::Text { value, placeholder } => {
            out.push(text_line(idx, value, placeholder, field_focused, width));
        }
        ControlNode::Choice {
            selected_label,
            options,
            open,
            ..
        } => {
            out.push(trigger_line(idx, selected_label, *open, field_focused));
            if *open {
                for (index, option) in options.iter().enumerate() {
                    out.push(option_line(idx, index, option, index == option_cursor));
                }
            }
        }
        ControlNode::Toggle { checked } => {
            out.push(toggle_line(idx, *checked, field_focused));
        }
        ControlNode::OrderedList { items } => {
            let focused_item = focus.and_then(|focus| focus.item);
            for item in items {
                out.push(item_line(idx, item, focused_item == Some(item.key), width));
            }
            let add_style = if field_focused {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Green)
            };
            out.push(RenderLine::targeted(
                Line::from(Span::styled("  + Add source (Ctrl+N)", add_style)),
                HitTarget::AddItem(idx),
            ));
        }
    }

    if let Some(description) = &node.description {
        let wrap_width = usize::from(width.saturating_sub(2)).max(8);
        for segment in wrap(description, wrap_width) {
            out.push(RenderLine::targeted(
                Line::from(Span::styled(
                    format!("  {segment}"),
                    Style::default()
                        .fg(Color::Gray)
                        .add_modifier(Modifier::ITALIC),
                )),
                HitTarget::Field(idx),
            ));
        }
    }
}

fn text_line(idx: usize, value: &str, placeholder: &str, focused: bool, width: u16) -> RenderLine {
    let prefix = if focused { "› " } else { "  " };
    let room = usize::from(width).saturating_sub(prefix.width() + 1);
    let (shown, style) = if value.is_empty() {
        (
            clamp_tail(placeholder, room),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (clamp_tail(value, room), value_style(focused))
    };
    let cursor = focused.then(|| {
        let typed = if value.is_empty() { 0 } else { shown.width() };
        (prefix.width() + typed) as u16
    });
    RenderLine {
        line: Line::from(vec![
            Span::styled(prefix, Style::default().fg(Color::Yellow)),
            Span::styled(shown, style),
        ]),
        target: Some(HitTarget::Field(idx)),
        trailing: None,
        cursor,
    }
}

fn trigger_line(idx: usize, label: &str, open: bool, focused: bool) -> RenderLine {
    let arrow = if open { "▴" } else { "▾" };
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    RenderLine::targeted(
        Line::from(vec![
            Span::styled("  [ ", border),
            Span::styled(label.to_string(), value_style(focused)),
            Span::styled(format!(" {arrow} ]"), border),
        ]),
        HitTarget::DropdownTrigger(idx),
    )
}

fn option_line(idx: usize, index: usize, option: &OptionNode, under_cursor: bool) -> RenderLine {
    let mark = if option.selected { "●" } else { "○" };
    let pointer = if under_cursor { "» " } else { "  " };
    let style = if under_cursor {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if option.selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    };
    RenderLine::targeted(
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{pointer}{mark} {}", option.label), style),
        ]),
        HitTarget::DropdownOption { field: idx, index },
    )
}

fn toggle_line(idx: usize, checked: bool, focused: bool) -> RenderLine {
    let (knob, state_style) = if checked {
        ("[ ●━ ON  ]", Style::default().fg(Color::Green))
    } else {
        ("[ ━○ OFF ]", Style::default().fg(Color::DarkGray))
    };
    let style = if focused {
        state_style.add_modifier(Modifier::BOLD)
    } else {
        state_style
    };
    RenderLine::targeted(
        Line::from(vec![Span::raw("  "), Span::styled(knob, style)]),
        HitTarget::Toggle(idx),
    )
}

fn item_line(idx: usize, item: &ItemNode, focused: bool, width: u16) -> RenderLine {
    let number = format!("{}. ", item.position + 1);
    let lead = format!("  {DRAG_HANDLE}{number}");
    let room = usize::from(width).saturating_sub(lead.width() + DELETE_MARK.width() + 1);
    let (shown, style) = if item.value.is_empty() {
        (
            clamp_tail(&item.placeholder, room),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (clamp_tail(&item.value, room), value_style(focused))
    };
    let typed_width = if item.value.is_empty() { 0 } else { shown.width() };
    let pad = room.saturating_sub(shown.width());

    let lead_style = if item.dragging {
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD)
    } else if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mut line = Line::from(vec![
        Span::styled(lead.clone(), lead_style),
        Span::styled(shown, style),
        Span::raw(" ".repeat(pad + 1)),
        Span::styled(DELETE_MARK, Style::default().fg(Color::Red)),
    ]);
    if item.dragging {
        line = line.style(Style::default().bg(Color::DarkGray));
    }
    RenderLine {
        line,
        target: Some(HitTarget::Item {
            field: idx,
            key: item.key,
        }),
        trailing: Some(HitTarget::DeleteItem {
            field: idx,
            key: item.key,
        }),
        cursor: focused.then(|| (lead.width() + typed_width) as u16),
    }
}

fn value_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

/// Keep the end of `value` (where typing happens) within `max_width`
/// columns, marking a cut with a leading ellipsis.
pub(crate) fn clamp_tail(value: &str, max_width: usize) -> String {
    if value.width() <= max_width {
        return value.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut kept = Vec::new();
    let mut used = 1;
    for ch in value.chars().rev() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width {
            break;
        }
        used += w;
        kept.push(ch);
    }
    let mut clamped = String::from("…");
    clamped.extend(kept.into_iter().rev());
    clamped
}
