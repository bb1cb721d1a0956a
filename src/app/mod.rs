mod focus;
pub(crate) mod input;
mod options;
pub(crate) mod runtime;
mod settings_ui;
mod status;
mod terminal;
mod toast;

pub use focus::Focus;
pub use options::UiOptions;
pub use settings_ui::SettingsUI;
pub use toast::{ToastPhase, ToastQueue, ToastTimings};
