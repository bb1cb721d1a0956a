//! User actions that move the serialized form out of (or back into) the
//! engine: saving a download, copying to and initializing from the
//! clipboard.

use std::path::PathBuf;

use serde_json::Value;
use tracing::{error, info, warn};

use crate::{
    domain::CHANNELS_FIELD_ID,
    form::{FormEngine, truthy},
    notify::{Notification, Notifier},
};

use super::{Clipboard, DownloadSink, encode_data};

pub const CHANNELS_REQUIRED_MESSAGE: &str = "At least one subscription source is required";
pub const COPY_SUCCESS_MESSAGE: &str = "JSON data copied to clipboard";
pub const COPY_FAILED_MESSAGE: &str = "Failed to copy to clipboard";
pub const CLIPBOARD_INVALID_MESSAGE: &str = "No valid JSON data in clipboard";
pub const INITIALIZED_MESSAGE: &str = "Form initialized from clipboard data";
pub const INITIALIZE_FAILED_MESSAGE: &str =
    "Form initialization failed, please check the data format";
pub const DOWNLOAD_FAILED_MESSAGE: &str = "Failed to save the JSON file";

/// Whether the form may be exported. Only forms carrying a `channels`
/// ordered list are gated, and they need at least one non-blank item.
pub fn channels_ready(engine: &FormEngine) -> bool {
    match engine
        .state()
        .field(CHANNELS_FIELD_ID)
        .map(|field| field.list())
    {
        Some(Ok(list)) => list.has_content(),
        _ => true,
    }
}

fn require_channels(engine: &FormEngine, notifier: &mut dyn Notifier) -> bool {
    if channels_ready(engine) {
        return true;
    }
    warn!("export blocked: no subscription source");
    notifier.notify(Notification::error(CHANNELS_REQUIRED_MESSAGE));
    false
}

/// Serialize the form and hand it to `sink` as `filename`.
pub fn download_json(
    engine: &FormEngine,
    sink: &mut dyn DownloadSink,
    filename: &str,
    notifier: &mut dyn Notifier,
) -> Option<PathBuf> {
    if !require_channels(engine, notifier) {
        return None;
    }
    let saved = encode_data(&engine.serialize())
        .and_then(|payload| sink.offer(filename, payload.as_bytes()));
    match saved {
        Ok(path) => {
            info!(path = %path.display(), "form data downloaded");
            notifier.notify(Notification::success(format!("Saved {}", path.display())));
            Some(path)
        }
        Err(err) => {
            error!(error = %format!("{err:#}"), "download failed");
            notifier.notify(Notification::error(DOWNLOAD_FAILED_MESSAGE));
            None
        }
    }
}

/// Copy the serialized form to the clipboard.
pub fn copy_json(
    engine: &FormEngine,
    clipboard: &mut dyn Clipboard,
    notifier: &mut dyn Notifier,
) -> bool {
    if !require_channels(engine, notifier) {
        return false;
    }
    let copied =
        encode_data(&engine.serialize()).and_then(|payload| clipboard.write_text(&payload));
    match copied {
        Ok(()) => {
            notifier.notify(Notification::success(COPY_SUCCESS_MESSAGE));
            true
        }
        Err(err) => {
            error!(error = %format!("{err:#}"), "copy to clipboard failed");
            notifier.notify(Notification::error(COPY_FAILED_MESSAGE));
            false
        }
    }
}

/// Read JSON from the clipboard and push it into the form.
///
/// Unreadable or unparsable clipboard text, and JSON that is falsy (`null`,
/// `false`, `0`, `""`), count as no data at all.
pub fn initialize_from_clipboard(
    engine: &mut FormEngine,
    clipboard: &mut dyn Clipboard,
    notifier: &mut dyn Notifier,
) -> bool {
    let Some(data) = read_clipboard_json(clipboard) else {
        notifier.notify(Notification::error(CLIPBOARD_INVALID_MESSAGE));
        return false;
    };
    if engine.initialize_with_data(&data) {
        notifier.notify(Notification::success(INITIALIZED_MESSAGE));
        true
    } else {
        notifier.notify(Notification::error(INITIALIZE_FAILED_MESSAGE));
        false
    }
}

fn read_clipboard_json(clipboard: &mut dyn Clipboard) -> Option<Value> {
    let text = match clipboard.read_text() {
        Ok(text) => text,
        Err(err) => {
            warn!(error = %format!("{err:#}"), "clipboard read failed");
            return None;
        }
    };
    match serde_json::from_str::<Value>(&text) {
        Ok(value) if truthy(&value) => Some(value),
        Ok(_) => None,
        Err(err) => {
            warn!(error = %err, "clipboard does not hold JSON");
            None
        }
    }
}
