use ratatui::layout::Rect;

use crate::form::{ItemBounds, ItemKey};

/// What a screen cell belongs to, for mouse routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Field(usize),
    DropdownTrigger(usize),
    DropdownOption { field: usize, index: usize },
    Toggle(usize),
    Item { field: usize, key: ItemKey },
    DeleteItem { field: usize, key: ItemKey },
    AddItem(usize),
}

impl HitTarget {
    pub fn field(&self) -> usize {
        match *self {
            HitTarget::Field(field)
            | HitTarget::DropdownTrigger(field)
            | HitTarget::Toggle(field)
            | HitTarget::AddItem(field) => field,
            HitTarget::DropdownOption { field, .. }
            | HitTarget::Item { field, .. }
            | HitTarget::DeleteItem { field, .. } => field,
        }
    }
}

/// Screen rows occupied by the items of one ordered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListRows {
    pub field: usize,
    pub first_row: u16,
    pub count: usize,
}

impl ListRows {
    /// Item bounds in visual order, one row per item.
    pub fn bounds(&self) -> Vec<ItemBounds> {
        ItemBounds::rows(f64::from(self.first_row), self.count)
    }

    pub fn contains_row(&self, row: u16) -> bool {
        row >= self.first_row && usize::from(row - self.first_row) < self.count
    }
}

/// Hit regions collected while drawing a frame. Later regions win, so
/// narrow regions are pushed after the row they sit on.
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    regions: Vec<(Rect, HitTarget)>,
    lists: Vec<ListRows>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.regions.clear();
        self.lists.clear();
    }

    pub fn push(&mut self, area: Rect, target: HitTarget) {
        if area.width > 0 && area.height > 0 {
            self.regions.push((area, target));
        }
    }

    pub fn push_list(&mut self, rows: ListRows) {
        self.lists.push(rows);
    }

    pub fn hit(&self, column: u16, row: u16) -> Option<HitTarget> {
        self.regions
            .iter()
            .rev()
            .find(|(area, _)| {
                column >= area.x
                    && column < area.x.saturating_add(area.width)
                    && row >= area.y
                    && row < area.y.saturating_add(area.height)
            })
            .map(|(_, target)| *target)
    }

    pub fn list_rows(&self, field: usize) -> Option<ListRows> {
        self.lists.iter().find(|rows| rows.field == field).copied()
    }
}
