//! Maps crossterm key events onto the session's input alphabet

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use unitdeck_core::reducer::Input;
use unitdeck_core::state::SessionPhase;

/// Translate a key press. Returns `None` for key releases and repeats.
pub fn map_key(key: KeyEvent, phase: SessionPhase) -> Option<Input> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let input = match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Input::Quit,
        (KeyCode::Tab, _) => Input::TabNext,
        (KeyCode::BackTab, _) => Input::TabPrev,
        (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => Input::MoveUp,
        (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => Input::MoveDown,
        (KeyCode::PageUp, _) => Input::PageUp,
        (KeyCode::PageDown, _) => Input::PageDown,
        (KeyCode::Home, _) | (KeyCode::Char('g'), KeyModifiers::NONE) => Input::Home,
        (KeyCode::End, _) | (KeyCode::Char('G'), _) => Input::End,
        (KeyCode::Enter, _) if phase == SessionPhase::Preview => Input::Confirm,
        (KeyCode::Enter, _) => Input::Select,
        (KeyCode::Esc, _) => Input::Cancel,
        (KeyCode::Char('f'), KeyModifiers::NONE) | (KeyCode::Char('/'), _) => Input::OpenFilter,
        (KeyCode::Char('r'), KeyModifiers::NONE) => Input::Refresh,
        (KeyCode::F(1), _) | (KeyCode::Char('?'), _) => Input::Help,
        (KeyCode::Char('q'), KeyModifiers::NONE) => Input::Quit,
        _ => Input::Other,
    };
    Some(input)
}
