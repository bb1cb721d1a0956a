mod clipboard;
mod format;
mod input;
mod output;
pub mod transfer;
mod validate;

pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
pub use format::DocumentFormat;
pub use input::{parse_document_any, parse_document_str};
pub use output::{
    DEFAULT_DOWNLOAD_NAME, DirectoryDownload, DownloadSink, encode_data, encode_document,
    write_stdout,
};
pub use validate::validate_data;
