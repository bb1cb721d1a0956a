mod catalog;
mod data_schema;
mod descriptor;
mod model;

pub use catalog::{CHANNELS_FIELD_ID, tv_settings_model};
pub use descriptor::{
    ChoiceField, ChoiceOption, FieldDescriptor, FieldKind, OrderedListField, TextField,
    ToggleField,
};
pub(crate) use descriptor::number_text;
pub use model::FormModel;
