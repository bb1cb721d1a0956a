use std::{path::PathBuf, time::Duration};

use crate::io::DEFAULT_DOWNLOAD_NAME;

use super::toast::ToastTimings;

#[derive(Debug, Clone)]
pub struct UiOptions {
    pub tick_rate: Duration,
    pub show_help: bool,
    pub mouse: bool,
    pub toast: ToastTimings,
    pub download_dir: PathBuf,
    pub download_name: String,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(50),
            show_help: true,
            mouse: true,
            toast: ToastTimings::default(),
            download_dir: PathBuf::from("."),
            download_name: DEFAULT_DOWNLOAD_NAME.to_string(),
        }
    }
}

impl UiOptions {
    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn with_help(mut self, show: bool) -> Self {
        self.show_help = show;
        self
    }

    pub fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse = enabled;
        self
    }

    pub fn with_toast_timings(mut self, timings: ToastTimings) -> Self {
        self.toast = timings;
        self
    }

    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }

    pub fn with_download_name(mut self, name: impl Into<String>) -> Self {
        self.download_name = name.into();
        self
    }
}
