use super::sortable::{ItemBounds, ItemKey};

/// Discrete user interactions the form engine understands.
#[derive(Debug, Clone, PartialEq)]
pub enum FormCommand {
    EditText {
        id: String,
        value: String,
    },
    /// Click on a dropdown trigger. Handled entirely by that dropdown; it
    /// never counts as an outside click.
    ToggleDropdown {
        id: String,
    },
    SelectOption {
        id: String,
        index: usize,
    },
    /// Any click that did not land on a dropdown trigger.
    OutsideClick,
    FlipToggle {
        id: String,
    },
    AddItem {
        id: String,
    },
    DeleteItem {
        id: String,
        key: ItemKey,
    },
    EditItem {
        id: String,
        key: ItemKey,
        value: String,
    },
    BlurItem {
        id: String,
        key: ItemKey,
    },
    DragStart {
        id: String,
        key: ItemKey,
    },
    DragOver {
        id: String,
        pointer_y: f64,
        bounds: Vec<ItemBounds>,
    },
    Drop {
        id: String,
    },
    DragEnd {
        id: String,
    },
    MoveItem {
        id: String,
        key: ItemKey,
        delta: i32,
    },
}

/// Change notification raised when a field's value was modified by an
/// interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub id: String,
}

impl FieldChange {
    pub(crate) fn of(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}
