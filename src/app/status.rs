#[derive(Debug, Clone)]
pub struct StatusLine {
    message: String,
}

pub const READY_STATUS: &str = "Ready. Ctrl+S saves the JSON file, Ctrl+Q quits.";

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            message: READY_STATUS.to_string(),
        }
    }
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_raw(&mut self, msg: impl Into<String>) {
        self.message = msg.into();
    }

    pub fn ready(&mut self) {
        self.message = READY_STATUS.to_string();
    }

    pub fn editing(&mut self, label: &str) {
        self.message = format!("Editing {label}");
    }

    pub fn value_updated(&mut self, label: &str) {
        self.message = format!("{label} updated");
    }

    pub fn dragging(&mut self, label: &str) {
        self.message = format!("Reordering {label}: release to drop");
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
