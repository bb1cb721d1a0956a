use anyhow::{Context, Result};
use serde_json::{Map, Value};
use tracing::info;

use crate::{
    domain::FormModel,
    form::FormEngine,
    io::{Clipboard, DirectoryDownload, SystemClipboard},
};

use super::{options::UiOptions, runtime::App};

const DEFAULT_TITLE: &str = "TV Settings";

/// Interactive terminal editor for a [`FormModel`].
pub struct SettingsUI {
    model: FormModel,
    title: Option<String>,
    options: UiOptions,
    data: Option<Value>,
    clipboard: Option<Box<dyn Clipboard>>,
}

impl SettingsUI {
    pub fn new(model: FormModel) -> Self {
        Self {
            model,
            title: None,
            options: UiOptions::default(),
            data: None,
            clipboard: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }

    /// Initial values applied right after the form is rendered.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Replace the desktop clipboard, e.g. on headless machines.
    pub fn with_clipboard(mut self, clipboard: impl Clipboard + 'static) -> Self {
        self.clipboard = Some(Box::new(clipboard));
        self
    }

    /// Run the editor until the user quits and return the final data.
    pub fn run(self) -> Result<Map<String, Value>> {
        let SettingsUI {
            model,
            title,
            options,
            data,
            clipboard,
        } = self;

        let mut engine = FormEngine::new(model);
        engine.render(&mut Vec::new());
        if let Some(data) = data {
            engine
                .deserialize(&data)
                .context("initial data does not fit the form")?;
        }

        let downloads = Box::new(DirectoryDownload::new(options.download_dir.clone()));
        let clipboard = clipboard.unwrap_or_else(|| Box::new(SystemClipboard));
        let title = title.unwrap_or_else(|| DEFAULT_TITLE.to_string());
        info!(fields = engine.model().len(), %title, "starting settings editor");

        let mut app = App::new(engine, title, options, clipboard, downloads);
        app.run()
    }
}
