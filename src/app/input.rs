use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Quit,
    Download,
    CopyJson,
    LoadClipboard,
    AddItem,
    DeleteItem,
    MoveItem(i32),
    NextField,
    PrevField,
    Activate,
    Dismiss,
    Insert(char),
    Backspace,
    None,
}

pub const HELP_TEXT: &str = "Tab/↑↓ move • Enter open/select • Space toggle • Ctrl+N add source • Ctrl+D delete • Alt+↑↓ reorder • Ctrl+S save • Ctrl+Y copy • Ctrl+O paste • Ctrl+Q quit";

pub fn classify(key: &KeyEvent) -> KeyCommand {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => KeyCommand::Quit,
            KeyCode::Char('c') | KeyCode::Char('C') => KeyCommand::Quit,
            KeyCode::Char('s') | KeyCode::Char('S') => KeyCommand::Download,
            KeyCode::Char('y') | KeyCode::Char('Y') => KeyCommand::CopyJson,
            KeyCode::Char('o') | KeyCode::Char('O') => KeyCommand::LoadClipboard,
            KeyCode::Char('n') | KeyCode::Char('N') => KeyCommand::AddItem,
            KeyCode::Char('d') | KeyCode::Char('D') => KeyCommand::DeleteItem,
            _ => KeyCommand::None,
        };
    }

    if key.modifiers.contains(KeyModifiers::ALT) {
        return match key.code {
            KeyCode::Up => KeyCommand::MoveItem(-1),
            KeyCode::Down => KeyCommand::MoveItem(1),
            _ => KeyCommand::None,
        };
    }

    match key.code {
        KeyCode::Tab | KeyCode::Down => KeyCommand::NextField,
        KeyCode::BackTab | KeyCode::Up => KeyCommand::PrevField,
        KeyCode::Esc => KeyCommand::Dismiss,
        KeyCode::Enter => KeyCommand::Activate,
        KeyCode::Backspace => KeyCommand::Backspace,
        KeyCode::Char(ch) => KeyCommand::Insert(ch),
        _ => KeyCommand::None,
    }
}
