mod actions;
mod choice;
mod convert;
mod engine;
mod error;
mod projection;
mod sortable;
mod state;
mod widget;

pub use actions::{FieldChange, FormCommand};
pub use choice::{ChoiceWidget, PLACEHOLDER_LABEL};
pub use engine::FormEngine;
pub use error::FormError;
pub use projection::{Container, ControlNode, FieldNode, ItemNode, OptionNode};
pub use sortable::{
    AddRejection, DropOutcome, EMPTY_SOURCE_MESSAGE, INVALID_SOURCE_MESSAGE, ItemBounds, ItemKey,
    ItemPhase, SortableItem, SortableListState, has_http_scheme, is_source_url,
};
pub use state::FormState;
pub(crate) use convert::truthy;
pub use widget::{FieldState, FieldWidget, TextWidget, ToggleWidget};
