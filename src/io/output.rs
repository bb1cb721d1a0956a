use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};
use tracing::{debug, error};

use super::DocumentFormat;

pub const DEFAULT_DOWNLOAD_NAME: &str = "form_data.json";

/// Serialized form data exactly as it is downloaded or copied: pretty JSON
/// with two-space indentation.
pub fn encode_data(data: &Map<String, Value>) -> Result<String> {
    serde_json::to_string_pretty(data).context("failed to serialize form data")
}

/// Serialize a value in any supported format.
pub fn encode_document(value: &Value, format: DocumentFormat, pretty: bool) -> Result<String> {
    match format {
        DocumentFormat::Json => {
            if pretty {
                serde_json::to_string_pretty(value).context("failed to serialize JSON")
            } else {
                serde_json::to_string(value).context("failed to serialize JSON")
            }
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => serde_yaml::to_string(value).context("failed to serialize YAML"),
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => {
            if pretty {
                toml::to_string_pretty(value).context("failed to serialize TOML")
            } else {
                toml::to_string(value).context("failed to serialize TOML")
            }
        }
    }
}

/// Write a payload to stdout followed by a newline.
pub fn write_stdout(payload: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(payload.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
        .context("failed to write to stdout")
}

/// Somewhere a finished download can be handed to.
pub trait DownloadSink {
    /// Store `bytes` under a name derived from `filename` and return where
    /// they ended up.
    fn offer(&mut self, filename: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// Saves downloads into a directory. An existing file is never replaced;
/// the new one gets a ` (n)` suffix before its extension instead.
#[derive(Debug, Clone)]
pub struct DirectoryDownload {
    dir: PathBuf,
}

impl DirectoryDownload {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectoryDownload {
    fn offer(&mut self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        let (stem, ext) = split_filename(filename);
        for attempt in 0..=u32::MAX {
            let name = match (attempt, ext) {
                (0, _) => filename.to_string(),
                (n, Some(ext)) => format!("{stem} ({n}).{ext}"),
                (n, None) => format!("{stem} ({n})"),
            };
            let path = self.dir.join(name);
            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(err) => {
                    error!(path = %path.display(), error = %err, "download failed");
                    return Err(err)
                        .with_context(|| format!("failed to create {}", path.display()));
                }
            };
            file.write_all(bytes)
                .and_then(|_| file.flush())
                .with_context(|| format!("failed to write {}", path.display()))?;
            debug!(path = %path.display(), bytes = bytes.len(), "download saved");
            return Ok(path);
        }
        bail!("no free file name left for {filename} in {}", self.dir.display())
    }
}

fn split_filename(filename: &str) -> (&str, Option<&str>) {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (filename, None),
    }
}
