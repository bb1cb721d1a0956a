//! Reorderable list of free-text entries.
//!
//! Items live in visual order inside `items`. Every structural change
//! (add, delete, drop, move, bulk replace) ends with a reindex, so at rest
//! the position of each item equals its index and its persisted name is
//! `<field id>[<index>]`. While a drag is in flight the order changes live
//! and positions are only refreshed on drop.

use std::fmt;

use tracing::debug;
use url::Url;

pub const EMPTY_SOURCE_MESSAGE: &str = "Please enter a subscription source before adding more";
pub const INVALID_SOURCE_MESSAGE: &str =
    "Subscription source must be a valid URL (starting with http:// or https://)";

/// Stable identity of a list item, independent of its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey(u64);

impl ItemKey {
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Vertical extent of a rendered item, in whatever unit the front end
/// measures the pointer in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemBounds {
    pub top: f64,
    pub height: f64,
}

impl ItemBounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Uniform rows starting at `first_row`, one per item.
    pub fn rows(first_row: f64, count: usize) -> Vec<Self> {
        (0..count)
            .map(|idx| Self::new(first_row + idx as f64, 1.0))
            .collect()
    }

    fn midpoint(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemPhase {
    Normal,
    Dragging,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortableItem {
    key: ItemKey,
    name: String,
    text: String,
    position: usize,
    phase: ItemPhase,
}

impl SortableItem {
    pub fn key(&self) -> ItemKey {
        self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn phase(&self) -> ItemPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == ItemPhase::Dragging
    }
}

/// Why an add request was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddRejection {
    Empty { position: usize },
    NotUrl { position: usize, value: String },
}

impl AddRejection {
    pub fn message(&self) -> &'static str {
        match self {
            AddRejection::Empty { .. } => EMPTY_SOURCE_MESSAGE,
            AddRejection::NotUrl { .. } => INVALID_SOURCE_MESSAGE,
        }
    }
}

impl fmt::Display for AddRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddRejection::Empty { position } => write!(f, "item {position} is empty"),
            AddRejection::NotUrl { position, value } => {
                write!(f, "item {position} ('{value}') is not an http(s) URL")
            }
        }
    }
}

/// Result of finishing a drag with a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropOutcome {
    pub key: ItemKey,
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DragSession {
    key: ItemKey,
    origin: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortableListState {
    field_id: String,
    placeholder: String,
    items: Vec<SortableItem>,
    next_key: u64,
    drag: Option<DragSession>,
}

impl SortableListState {
    /// One item per default entry, or a single empty item when there are
    /// no defaults.
    pub fn new(field_id: &str, placeholder: &str, defaults: &[String]) -> Self {
        let mut state = Self {
            field_id: field_id.to_string(),
            placeholder: placeholder.to_string(),
            items: Vec::new(),
            next_key: 0,
            drag: None,
        };
        if defaults.is_empty() {
            state.push_item(String::new());
        } else {
            for value in defaults {
                state.push_item(value.clone());
            }
        }
        state
    }

    pub fn field_id(&self) -> &str {
        &self.field_id
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn items(&self) -> &[SortableItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, key: ItemKey) -> Option<&SortableItem> {
        self.items.iter().find(|item| item.key == key)
    }

    pub fn index_of(&self, key: ItemKey) -> Option<usize> {
        self.items.iter().position(|item| item.key == key)
    }

    pub fn key_at(&self, index: usize) -> Option<ItemKey> {
        self.items.get(index).map(|item| item.key)
    }

    pub fn dragging(&self) -> Option<ItemKey> {
        self.drag.map(|session| session.key)
    }

    /// Append an empty item, provided every existing item holds a source URL.
    pub fn add_item(&mut self) -> Result<ItemKey, AddRejection> {
        for item in &self.items {
            let value = item.text.trim();
            if value.is_empty() {
                return Err(AddRejection::Empty {
                    position: item.position,
                });
            }
            if !is_source_url(value) {
                return Err(AddRejection::NotUrl {
                    position: item.position,
                    value: value.to_string(),
                });
            }
        }
        let key = self.push_item(String::new());
        debug!(field = %self.field_id, %key, count = self.items.len(), "list item added");
        Ok(key)
    }

    /// Remove an item unconditionally. The list may become empty.
    pub fn remove_item(&mut self, key: ItemKey) -> bool {
        let Some(index) = self.index_of(key) else {
            return false;
        };
        self.items.remove(index);
        if self.dragging() == Some(key) {
            self.drag = None;
        }
        self.reindex();
        debug!(field = %self.field_id, %key, count = self.items.len(), "list item removed");
        true
    }

    pub fn set_text(&mut self, key: ItemKey, text: impl Into<String>) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.key == key) else {
            return false;
        };
        let text = text.into();
        if item.text == text {
            return false;
        }
        item.text = text;
        true
    }

    /// Focus-loss check: silently clears text that does not start with an
    /// http(s) scheme. Returns whether the item was cleared.
    pub fn blur(&mut self, key: ItemKey) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.key == key) else {
            return false;
        };
        let value = item.text.trim();
        if !value.is_empty() && !has_http_scheme(value) {
            item.text.clear();
            return true;
        }
        false
    }

    /// Start dragging an item; returns its position as the transfer payload.
    pub fn drag_start(&mut self, key: ItemKey) -> Option<usize> {
        if self.drag.is_some() {
            self.finish_drag();
        }
        let item = self.items.iter_mut().find(|item| item.key == key)?;
        item.phase = ItemPhase::Dragging;
        let origin = item.position;
        self.drag = Some(DragSession { key, origin });
        Some(origin)
    }

    /// Move the dragged item in front of the first sibling whose midpoint
    /// lies below the pointer, or to the end when there is none.
    ///
    /// `bounds` must describe the items in their current visual order.
    pub fn drag_over(&mut self, pointer_y: f64, bounds: &[ItemBounds]) -> bool {
        let Some(session) = self.drag else {
            return false;
        };
        if bounds.len() != self.items.len() {
            debug!(
                field = %self.field_id,
                bounds = bounds.len(),
                items = self.items.len(),
                "ignoring drag over with stale layout"
            );
            return false;
        }
        let Some(current) = self.index_of(session.key) else {
            return false;
        };

        let mut closest: Option<(f64, usize)> = None;
        for (idx, (item, bound)) in self.items.iter().zip(bounds).enumerate() {
            if item.key == session.key {
                continue;
            }
            let offset = pointer_y - bound.midpoint();
            if offset < 0.0 && closest.is_none_or(|(best, _)| offset > best) {
                closest = Some((offset, idx));
            }
        }

        let dragged = self.items.remove(current);
        let target = match closest {
            Some((_, idx)) if idx > current => idx - 1,
            Some((_, idx)) => idx,
            None => self.items.len(),
        };
        self.items.insert(target, dragged);
        target != current
    }

    /// Finish a drag on the list: clear the dragging state and reindex by
    /// visual order.
    pub fn drop_dragged(&mut self) -> Option<DropOutcome> {
        let session = self.drag?;
        self.finish_drag();
        let to = self.index_of(session.key)?;
        debug!(field = %self.field_id, key = %session.key, from = session.origin, to, "list item dropped");
        Some(DropOutcome {
            key: session.key,
            from: session.origin,
            to,
        })
    }

    /// Drag ended without a drop on the list. The live order is kept.
    pub fn drag_end(&mut self) -> bool {
        if self.drag.is_none() {
            return false;
        }
        self.finish_drag();
        true
    }

    /// Keyboard reorder: shift an item by `delta` places.
    pub fn move_item(&mut self, key: ItemKey, delta: i32) -> bool {
        let Some(current) = self.index_of(key) else {
            return false;
        };
        let next = current as i64 + delta as i64;
        if next < 0 || next >= self.items.len() as i64 {
            return false;
        }
        let item = self.items.remove(current);
        self.items.insert(next as usize, item);
        self.reindex();
        true
    }

    /// Replace every item with literal values, without URL checks.
    pub fn replace_all(&mut self, values: Vec<String>) {
        self.items.clear();
        self.drag = None;
        for value in values {
            self.push_item(value);
        }
        self.reindex();
    }

    /// Trimmed, non-empty item texts in visual order.
    pub fn collect_values(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|item| item.text.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn has_content(&self) -> bool {
        self.items.iter().any(|item| !item.text.trim().is_empty())
    }

    pub fn reindex(&mut self) {
        for (index, item) in self.items.iter_mut().enumerate() {
            item.position = index;
            item.name = item_name(&self.field_id, index);
        }
    }

    fn finish_drag(&mut self) {
        self.drag = None;
        for item in &mut self.items {
            item.phase = ItemPhase::Normal;
        }
        self.reindex();
    }

    fn push_item(&mut self, text: String) -> ItemKey {
        let key = ItemKey(self.next_key);
        self.next_key += 1;
        let position = self.items.len();
        self.items.push(SortableItem {
            key,
            name: item_name(&self.field_id, position),
            text,
            position,
            phase: ItemPhase::Normal,
        });
        key
    }
}

fn item_name(field_id: &str, index: usize) -> String {
    format!("{field_id}[{index}]")
}

/// Case-sensitive `http://` / `https://` prefix check.
pub fn has_http_scheme(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Whether a (trimmed) value is acceptable as a subscription source: an
/// absolute http(s) URL, or at least something carrying the http(s) prefix.
pub fn is_source_url(value: &str) -> bool {
    if has_http_scheme(value) {
        return true;
    }
    Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}
