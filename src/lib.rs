#![deny(rust_2018_idioms)]
#![doc = include_str!("../README.md")]

mod app;
pub mod domain;
pub mod form;
pub mod io;
pub mod notify;
mod presentation;

pub use app::{Focus, SettingsUI, ToastPhase, ToastQueue, ToastTimings, UiOptions};
pub use domain::{
    CHANNELS_FIELD_ID, ChoiceField, ChoiceOption, FieldDescriptor, FieldKind, FormModel,
    OrderedListField, TextField, ToggleField, tv_settings_model,
};
pub use form::{Container, FieldChange, FieldNode, FormCommand, FormEngine, FormError};
pub use io::{DocumentFormat, parse_document_str, validate_data};
pub use notify::{Notification, Notifier, Severity};

pub mod prelude {
    pub use super::{FormEngine, FormModel, SettingsUI, UiOptions, tv_settings_model};
}

#[cfg(test)]
mod tests;
