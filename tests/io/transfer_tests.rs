use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use serde_json::{Value, json};
use tvform::{
    FormEngine, tv_settings_model,
    io::{
        Clipboard, DirectoryDownload, MemoryClipboard,
        transfer::{
            CLIPBOARD_INVALID_MESSAGE, COPY_SUCCESS_MESSAGE, INITIALIZED_MESSAGE, copy_json,
            download_json, initialize_from_clipboard,
        },
    },
};

fn scratch_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("tvform-{tag}-{nanos}"));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn seeded_engine() -> FormEngine {
    let mut engine = FormEngine::new(tv_settings_model());
    engine.render(&mut Vec::new());
    assert!(engine.initialize_with_data(&json!({
        "channels": ["https://a.example/tv.json", "https://b.example/tv.json"],
        "fontScale": "1.2",
    })));
    engine
}

#[test]
fn download_writes_pretty_json_without_clobbering() {
    let dir = scratch_dir("download");
    let engine = seeded_engine();
    let mut sink = DirectoryDownload::new(&dir);
    let mut notes = Vec::new();

    let first = download_json(&engine, &mut sink, "form_data.json", &mut notes).unwrap();
    let second = download_json(&engine, &mut sink, "form_data.json", &mut notes).unwrap();
    assert_eq!(first, dir.join("form_data.json"));
    assert_eq!(second, dir.join("form_data (1).json"));

    let text = fs::read_to_string(&first).unwrap();
    assert!(text.starts_with("{\n  \"channels\": [\n    \"https://a.example/tv.json\""));
    let saved: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(saved, Value::Object(engine.serialize()));
    assert!(notes.iter().all(|note| !note.is_error()));
    assert_eq!(notes.len(), 2);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn copied_json_initializes_another_form() {
    let source = seeded_engine();
    let mut clipboard = MemoryClipboard::new();
    let mut notes = Vec::new();
    assert!(copy_json(&source, &mut clipboard, &mut notes));
    assert_eq!(notes[0].message, COPY_SUCCESS_MESSAGE);

    let mut target = FormEngine::new(tv_settings_model());
    target.render(&mut Vec::new());
    assert!(initialize_from_clipboard(&mut target, &mut clipboard, &mut notes));
    assert_eq!(notes[1].message, INITIALIZED_MESSAGE);
    assert_eq!(target.serialize(), source.serialize());
}

#[test]
fn empty_or_garbage_clipboard_is_reported() {
    let mut engine = seeded_engine();
    let before = engine.serialize();
    for text in ["", "   ", "{channels: []}", "null"] {
        let mut clipboard = MemoryClipboard::with_text(text);
        let mut notes = Vec::new();
        assert!(!initialize_from_clipboard(&mut engine, &mut clipboard, &mut notes));
        assert_eq!(notes.len(), 1, "clipboard text {text:?}");
        assert!(notes[0].is_error());
        assert_eq!(notes[0].message, CLIPBOARD_INVALID_MESSAGE);
    }
    assert_eq!(engine.serialize(), before);
}

#[test]
fn memory_clipboard_round_trips_text() {
    let mut clipboard = MemoryClipboard::new();
    assert_eq!(clipboard.contents(), None);
    clipboard.write_text("hello").unwrap();
    assert_eq!(clipboard.read_text().unwrap(), "hello");
}
