use anyhow::{Context, Result};

/// Text clipboard the copy and paste actions talk to.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<()>;
    fn read_text(&mut self) -> Result<String>;
}

/// The desktop clipboard. A fresh handle is opened per operation so a
/// missing display only fails the action that needed it.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new().context("clipboard unavailable")?;
        clipboard
            .set_text(text.to_owned())
            .context("failed to write clipboard")
    }

    fn read_text(&mut self) -> Result<String> {
        let mut clipboard = arboard::Clipboard::new().context("clipboard unavailable")?;
        clipboard.get_text().context("failed to read clipboard")
    }
}

/// In-process clipboard for headless runs and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            contents: Some(text.into()),
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }

    fn read_text(&mut self) -> Result<String> {
        self.contents.clone().context("clipboard is empty")
    }
}
