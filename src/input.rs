//! Key bindings
//!
//! Maps crossterm key events to the commands understood by the list widget and
//! the root controller. Only key presses count; repeats and releases are ignored.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Commands handled by the list widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListCommand {
    Next,
    Previous,
    ToggleArchived,
    TogglePinned,
    /// Bound but inert
    Open,
}

/// Commands handled by the root controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    Refresh,
    Quit,
}

fn is_press(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
}

pub fn list_command(key: &KeyEvent) -> Option<ListCommand> {
    if !is_press(key) || key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => Some(ListCommand::Next),
        KeyCode::Up | KeyCode::Char('k') => Some(ListCommand::Previous),
        KeyCode::Char('e') => Some(ListCommand::ToggleArchived),
        KeyCode::Char('f') => Some(ListCommand::TogglePinned),
        KeyCode::Enter => Some(ListCommand::Open),
        _ => None,
    }
}

pub fn app_command(key: &KeyEvent) -> Option<AppCommand> {
    if !is_press(key) {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(AppCommand::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(AppCommand::Quit),
        KeyCode::Char('r') => Some(AppCommand::Refresh),
        _ => None,
    }
}
