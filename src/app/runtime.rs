use std::time::Instant;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::{
    form::{ControlNode, FieldChange, FieldNode, FormCommand, FormEngine, ItemKey},
    io::{
        Clipboard, DownloadSink,
        transfer::{channels_ready, copy_json, download_json, initialize_from_clipboard},
    },
    presentation::{self, HitMap, HitTarget, ToastRender, UiContext},
};

use super::{
    focus::{self, Focus},
    input::{self, HELP_TEXT, KeyCommand},
    options::UiOptions,
    status::StatusLine,
    terminal::TerminalGuard,
    toast::{ToastPhase, ToastQueue},
};

pub(crate) struct App {
    engine: FormEngine,
    title: String,
    options: UiOptions,
    status: StatusLine,
    toasts: ToastQueue,
    clipboard: Box<dyn Clipboard>,
    downloads: Box<dyn DownloadSink>,
    nodes: Vec<FieldNode>,
    hits: HitMap,
    focus: Option<Focus>,
    option_cursor: usize,
    drag_field: Option<usize>,
    should_quit: bool,
}

impl App {
    pub fn new(
        engine: FormEngine,
        title: String,
        options: UiOptions,
        clipboard: Box<dyn Clipboard>,
        downloads: Box<dyn DownloadSink>,
    ) -> Self {
        let nodes = engine.nodes();
        let focus = focus::step(&nodes, None, 1);
        Self {
            toasts: ToastQueue::new(options.toast),
            engine,
            title,
            options,
            status: StatusLine::new(),
            clipboard,
            downloads,
            nodes,
            hits: HitMap::default(),
            focus,
            option_cursor: 0,
            drag_field: None,
            should_quit: false,
        }
    }

    pub fn run(&mut self) -> Result<Map<String, Value>> {
        let mut terminal = TerminalGuard::new(self.options.mouse)?;
        debug!(mouse = terminal.mouse_enabled(), "editor started");
        while !self.should_quit {
            self.toasts.prune(Instant::now());
            terminal.draw(|frame| self.draw(frame))?;
            if !event::poll(self.options.tick_rate)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => self.handle_key(key),
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                Event::Resize(width, height) => {
                    terminal.resize(Rect::new(0, 0, width, height))?;
                }
                Event::Paste(text) => self.handle_paste(&text),
                Event::FocusGained | Event::FocusLost => {}
            }
        }
        Ok(self.engine.serialize())
    }

    pub fn engine(&self) -> &FormEngine {
        &self.engine
    }

    pub fn focus(&self) -> Option<Focus> {
        self.focus
    }

    pub fn status(&self) -> &str {
        self.status.message()
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn hits(&self) -> &HitMap {
        &self.hits
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let now = Instant::now();
        let focus_label = self.focus_label();
        let toasts = self
            .toasts
            .visible(now)
            .into_iter()
            .map(|(notification, phase)| ToastRender {
                message: &notification.message,
                error: notification.is_error(),
                fading: phase == ToastPhase::Fading,
            })
            .collect();
        let ctx = UiContext {
            title: &self.title,
            nodes: &self.nodes,
            focus: self.focus,
            option_cursor: self.option_cursor,
            status_message: self.status.message(),
            focus_label,
            channels_ready: channels_ready(&self.engine),
            help: self.options.show_help.then_some(HELP_TEXT),
            toasts,
        };
        presentation::draw(frame, ctx, &mut self.hits);
    }

    /// Append pasted text to the focused text field or source row. Line
    /// breaks are dropped since every editable value is a single line.
    pub fn handle_paste(&mut self, text: &str) {
        if self.open_dropdown().is_some() {
            self.dispatch(FormCommand::OutsideClick);
        }
        let pasted: String = text.chars().filter(|ch| !matches!(ch, '\r' | '\n')).collect();
        if pasted.is_empty() {
            return;
        }
        self.edit_focused(|value| value.push_str(&pasted), None);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let command = input::classify(&key);

        if let Some((_, option_count)) = self.open_dropdown() {
            match command {
                KeyCommand::NextField => {
                    self.option_cursor = (self.option_cursor + 1).min(option_count.saturating_sub(1));
                    return;
                }
                KeyCommand::PrevField => {
                    self.option_cursor = self.option_cursor.saturating_sub(1);
                    return;
                }
                KeyCommand::Activate => {
                    self.select_option();
                    return;
                }
                KeyCommand::Dismiss => {
                    self.dispatch(FormCommand::OutsideClick);
                    return;
                }
                _ => {
                    self.dispatch(FormCommand::OutsideClick);
                }
            }
        }

        match command {
            KeyCommand::Quit => self.should_quit = true,
            KeyCommand::Download => {
                self.blur_focused_item();
                self.download();
            }
            KeyCommand::CopyJson => {
                self.blur_focused_item();
                copy_json(&self.engine, self.clipboard.as_mut(), &mut self.toasts);
            }
            KeyCommand::LoadClipboard => {
                if initialize_from_clipboard(
                    &mut self.engine,
                    self.clipboard.as_mut(),
                    &mut self.toasts,
                ) {
                    self.status.set_raw("Form loaded from clipboard");
                }
                self.refresh();
                self.focus = focus::settle(&self.nodes, self.focus, 0);
            }
            KeyCommand::AddItem => match self.focus {
                Some(focus) if self.is_list(focus.field) => self.add_item(focus.field),
                _ => self.status.set_raw("Focus a source list to add an entry"),
            },
            KeyCommand::DeleteItem => match self.focus {
                Some(Focus {
                    field,
                    item: Some(key),
                }) => self.delete_item(field, key),
                _ => self.status.set_raw("Focus a list entry to delete it"),
            },
            KeyCommand::MoveItem(delta) => {
                if let Some(Focus {
                    field,
                    item: Some(key),
                }) = self.focus
                    && let Some(id) = self.field_id(field)
                {
                    self.dispatch(FormCommand::MoveItem { id, key, delta });
                }
            }
            KeyCommand::NextField => self.move_focus(focus::step(&self.nodes, self.focus, 1)),
            KeyCommand::PrevField => self.move_focus(focus::step(&self.nodes, self.focus, -1)),
            KeyCommand::Activate => self.activate(),
            KeyCommand::Dismiss => {
                self.dispatch(FormCommand::OutsideClick);
                self.status.ready();
            }
            KeyCommand::Insert(ch) => self.edit_focused(|text| text.push(ch), Some(ch)),
            KeyCommand::Backspace => self.edit_focused(
                |text| {
                    text.pop();
                },
                None,
            ),
            KeyCommand::None => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.on_click(mouse.column, mouse.row),
            MouseEventKind::Drag(MouseButton::Left) => self.on_drag(mouse.row),
            MouseEventKind::Up(MouseButton::Left) => self.on_release(mouse.row),
            MouseEventKind::ScrollDown => self.move_focus(focus::step(&self.nodes, self.focus, 1)),
            MouseEventKind::ScrollUp => self.move_focus(focus::step(&self.nodes, self.focus, -1)),
            _ => {}
        }
    }

    fn on_click(&mut self, column: u16, row: u16) {
        let target = self.hits.hit(column, row);
        match target {
            None => {}
            Some(HitTarget::Field(field)) => self.focus_field(field),
            Some(HitTarget::DropdownTrigger(field)) => {
                self.focus_field(field);
                self.toggle_dropdown(field);
                // The trigger swallows the click.
                return;
            }
            Some(HitTarget::DropdownOption { field, index }) => {
                if let Some(id) = self.field_id(field) {
                    self.dispatch(FormCommand::SelectOption { id, index });
                }
            }
            Some(HitTarget::Toggle(field)) => {
                self.focus_field(field);
                if let Some(id) = self.field_id(field) {
                    self.dispatch(FormCommand::FlipToggle { id });
                }
            }
            Some(HitTarget::Item { field, key }) => {
                self.move_focus(Some(Focus::on_item(field, key)));
                if let Some(id) = self.field_id(field) {
                    self.dispatch(FormCommand::DragStart { id, key });
                    self.drag_field = Some(field);
                    let label = self.nodes[field].label.clone();
                    self.status.dragging(&label);
                }
            }
            Some(HitTarget::DeleteItem { field, key }) => {
                self.blur_focused_item();
                self.delete_item(field, key);
            }
            Some(HitTarget::AddItem(field)) => self.add_item(field),
        }
        self.dispatch(FormCommand::OutsideClick);
    }

    fn on_drag(&mut self, row: u16) {
        let Some(field) = self.drag_field else {
            return;
        };
        let (Some(rows), Some(id)) = (self.hits.list_rows(field), self.field_id(field)) else {
            return;
        };
        let Some(current) = self.dragged_index(field) else {
            return;
        };
        let current_row = rows.first_row + current as u16;
        // Land in the hovered row: aim past its midpoint when moving down,
        // before it when moving up.
        let pointer_y = f64::from(row) + if row > current_row { 0.75 } else { 0.25 };
        self.dispatch(FormCommand::DragOver {
            id,
            pointer_y,
            bounds: rows.bounds(),
        });
    }

    fn on_release(&mut self, row: u16) {
        let Some(field) = self.drag_field.take() else {
            return;
        };
        let Some(id) = self.field_id(field) else {
            return;
        };
        let over_list = self
            .hits
            .list_rows(field)
            .is_some_and(|rows| rows.contains_row(row));
        let command = if over_list {
            FormCommand::Drop { id }
        } else {
            FormCommand::DragEnd { id }
        };
        self.dispatch(command);
        self.status.ready();
    }

    fn activate(&mut self) {
        let Some(focus) = self.focus else {
            return;
        };
        match self.nodes.get(focus.field).map(|node| &node.control) {
            Some(ControlNode::Choice { .. }) => self.toggle_dropdown(focus.field),
            Some(ControlNode::Toggle { .. }) => {
                if let Some(id) = self.field_id(focus.field) {
                    self.dispatch(FormCommand::FlipToggle { id });
                }
            }
            Some(ControlNode::OrderedList { .. }) if focus.item.is_none() => {
                self.add_item(focus.field)
            }
            Some(_) => self.move_focus(focus::step(&self.nodes, self.focus, 1)),
            None => {}
        }
    }

    fn edit_focused(&mut self, edit: impl FnOnce(&mut String), typed: Option<char>) {
        let Some(focus) = self.focus else {
            return;
        };
        let Some(node) = self.nodes.get(focus.field) else {
            return;
        };
        let id = node.id.clone();
        let command = match (&node.control, focus.item) {
            (ControlNode::Text { value, .. }, None) => {
                let mut value = value.clone();
                edit(&mut value);
                FormCommand::EditText { id, value }
            }
            (ControlNode::OrderedList { items }, Some(key)) => {
                let Some(item) = items.iter().find(|item| item.key == key) else {
                    return;
                };
                let mut value = item.value.clone();
                edit(&mut value);
                FormCommand::EditItem { id, key, value }
            }
            (ControlNode::Toggle { .. }, None) if typed == Some(' ') => {
                FormCommand::FlipToggle { id }
            }
            _ => return,
        };
        let label = node.label.clone();
        if self.dispatch(command).is_some() {
            self.status.editing(&label);
        }
    }

    fn select_option(&mut self) {
        if let Some((field, _)) = self.open_dropdown()
            && let Some(id) = self.field_id(field)
        {
            let index = self.option_cursor;
            self.dispatch(FormCommand::SelectOption { id, index });
        }
    }

    fn toggle_dropdown(&mut self, field: usize) {
        let Some(id) = self.field_id(field) else {
            return;
        };
        self.dispatch(FormCommand::ToggleDropdown { id });
        if let Some(ControlNode::Choice { options, .. }) =
            self.nodes.get(field).map(|node| &node.control)
        {
            self.option_cursor = options
                .iter()
                .position(|option| option.selected)
                .unwrap_or(0);
        }
    }

    fn add_item(&mut self, field: usize) {
        self.blur_focused_item();
        let Some(id) = self.field_id(field) else {
            return;
        };
        if self.dispatch(FormCommand::AddItem { id }).is_some()
            && let Some(key) = self.item_keys(field).last().copied()
        {
            self.focus = Some(Focus::on_item(field, key));
        }
    }

    fn delete_item(&mut self, field: usize, key: ItemKey) {
        let Some(id) = self.field_id(field) else {
            return;
        };
        let position = self
            .item_keys(field)
            .iter()
            .position(|candidate| *candidate == key)
            .unwrap_or(0);
        self.dispatch(FormCommand::DeleteItem { id, key });
        self.focus = focus::settle(&self.nodes, self.focus, position);
    }

    fn download(&mut self) {
        let saved = download_json(
            &self.engine,
            self.downloads.as_mut(),
            &self.options.download_name,
            &mut self.toasts,
        );
        if let Some(path) = saved {
            self.status.set_raw(format!("Saved {}", path.display()));
        }
    }

    fn focus_field(&mut self, field: usize) {
        let target = focus::focus_stops(&self.nodes)
            .into_iter()
            .find(|stop| stop.field == field);
        if target.is_some() {
            self.move_focus(target);
        }
    }

    /// Move focus, firing the blur check on the list item being left.
    fn move_focus(&mut self, next: Option<Focus>) {
        if next == self.focus {
            return;
        }
        self.blur_focused_item();
        self.focus = focus::settle(&self.nodes, next, 0);
        debug!(focus = ?self.focus, "focus moved");
    }

    fn blur_focused_item(&mut self) {
        if let Some(Focus {
            field,
            item: Some(key),
        }) = self.focus
            && let Some(id) = self.field_id(field)
        {
            self.dispatch(FormCommand::BlurItem { id, key });
        }
    }

    fn dispatch(&mut self, command: FormCommand) -> Option<FieldChange> {
        let outcome = self.engine.dispatch(command, &mut self.toasts);
        self.refresh();
        match outcome {
            Ok(change) => {
                if let Some(change) = &change
                    && let Some(node) = self.nodes.iter().find(|node| node.id == change.id)
                {
                    self.status.value_updated(&node.label);
                }
                change
            }
            Err(err) => {
                warn!(error = %err, "form command rejected");
                self.status.set_raw(err.to_string());
                None
            }
        }
    }

    fn refresh(&mut self) {
        self.engine.project(&mut self.nodes);
    }

    fn field_id(&self, field: usize) -> Option<String> {
        self.nodes.get(field).map(|node| node.id.clone())
    }

    fn is_list(&self, field: usize) -> bool {
        matches!(
            self.nodes.get(field).map(|node| &node.control),
            Some(ControlNode::OrderedList { .. })
        )
    }

    fn item_keys(&self, field: usize) -> Vec<ItemKey> {
        match self.nodes.get(field).map(|node| &node.control) {
            Some(ControlNode::OrderedList { items }) => items.iter().map(|item| item.key).collect(),
            _ => Vec::new(),
        }
    }

    fn dragged_index(&self, field: usize) -> Option<usize> {
        match self.nodes.get(field).map(|node| &node.control) {
            Some(ControlNode::OrderedList { items }) => items.iter().position(|item| item.dragging),
            _ => None,
        }
    }

    /// Index and option count of the open dropdown.
    fn open_dropdown(&self) -> Option<(usize, usize)> {
        self.nodes
            .iter()
            .enumerate()
            .find_map(|(idx, node)| match &node.control {
                ControlNode::Choice {
                    open: true,
                    options,
                    ..
                } => Some((idx, options.len())),
                _ => None,
            })
    }

    fn focus_label(&self) -> Option<String> {
        let focus = self.focus?;
        let node = self.nodes.get(focus.field)?;
        match focus.item {
            Some(key) => {
                let position = self.item_keys(focus.field).iter().position(|k| *k == key)?;
                Some(format!("{} #{}", node.label, position + 1))
            }
            None => Some(node.label.clone()),
        }
    }
}
