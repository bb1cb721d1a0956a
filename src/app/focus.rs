use crate::form::{ControlNode, FieldNode, ItemKey};

/// Keyboard focus: a field, or one item of an ordered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Focus {
    pub field: usize,
    pub item: Option<ItemKey>,
}

impl Focus {
    pub fn on_field(field: usize) -> Self {
        Self { field, item: None }
    }

    pub fn on_item(field: usize, key: ItemKey) -> Self {
        Self {
            field,
            item: Some(key),
        }
    }
}

/// Tab order: one stop per field, except non-empty ordered lists which get
/// one stop per item.
pub(crate) fn focus_stops(nodes: &[FieldNode]) -> Vec<Focus> {
    let mut stops = Vec::new();
    for (idx, node) in nodes.iter().enumerate() {
        match &node.control {
            ControlNode::OrderedList { items } if !items.is_empty() => {
                stops.extend(items.iter().map(|item| Focus::on_item(idx, item.key)));
            }
            _ => stops.push(Focus::on_field(idx)),
        }
    }
    stops
}

/// Move `delta` stops from `current`, wrapping at both ends.
pub(crate) fn step(nodes: &[FieldNode], current: Option<Focus>, delta: i32) -> Option<Focus> {
    let stops = focus_stops(nodes);
    if stops.is_empty() {
        return None;
    }
    let len = stops.len() as i64;
    let next = match current.and_then(|focus| stops.iter().position(|stop| *stop == focus)) {
        Some(at) => (at as i64 + i64::from(delta)).rem_euclid(len),
        None if delta < 0 => len - 1,
        None => 0,
    };
    stops.get(next as usize).copied()
}

/// Re-anchor focus after the layout changed under it. A vanished item
/// hands focus to the item now at `position` in the same list (or the last
/// one), then to the field itself.
pub(crate) fn settle(nodes: &[FieldNode], current: Option<Focus>, position: usize) -> Option<Focus> {
    let stops = focus_stops(nodes);
    let Some(focus) = current else {
        return stops.first().copied();
    };
    if stops.contains(&focus) {
        return Some(focus);
    }
    let same_field: Vec<Focus> = stops
        .iter()
        .filter(|stop| stop.field == focus.field)
        .copied()
        .collect();
    if let Some(stop) = same_field
        .get(position)
        .or_else(|| same_field.last())
        .copied()
    {
        return Some(stop);
    }
    stops.first().copied()
}
