use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub struct KeyHandler;

impl KeyHandler {
    pub fn handle_normal_mode_key(key_event: KeyEvent) -> NormalModeAction {
        match key_event.code {
            KeyCode::Char('q') => NormalModeAction::Quit,
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                NormalModeAction::Quit
            }
            KeyCode::Up | KeyCode::Char('k') => NormalModeAction::SelectPrevious,
            KeyCode::Down | KeyCode::Char('j') => NormalModeAction::SelectNext,
            KeyCode::Home | KeyCode::Char('g') => NormalModeAction::SelectFirst,
            KeyCode::End | KeyCode::Char('G') => NormalModeAction::SelectLast,
            KeyCode::Char('r') | KeyCode::Char('e') => NormalModeAction::StartRename,
            KeyCode::Char('d') | KeyCode::Delete => NormalModeAction::StartDelete,
            KeyCode::Char('R') => NormalModeAction::Reload,
            KeyCode::Char('?') => NormalModeAction::ToggleHelpMode,
            _ => NormalModeAction::None,
        }
    }

    pub fn handle_help_mode_key(key_event: KeyEvent) -> HelpModeAction {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::Char('?') => {
                HelpModeAction::ExitHelpMode
            }
            _ => HelpModeAction::None,
        }
    }

    pub fn handle_rename_mode_key(key_event: KeyEvent) -> RenameModeAction {
        match key_event.code {
            KeyCode::Esc => RenameModeAction::Cancel,
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                RenameModeAction::Cancel
            }
            KeyCode::Enter => RenameModeAction::Confirm,
            KeyCode::Char('w') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                RenameModeAction::DeleteWordBackward
            }
            KeyCode::Backspace => RenameModeAction::Backspace,
            KeyCode::Delete => RenameModeAction::Delete,
            KeyCode::Left => RenameModeAction::MoveCursorLeft,
            KeyCode::Right => RenameModeAction::MoveCursorRight,
            KeyCode::Home => RenameModeAction::MoveCursorHome,
            KeyCode::End => RenameModeAction::MoveCursorEnd,
            KeyCode::Char(c) => RenameModeAction::InsertChar(c),
            _ => RenameModeAction::None,
        }
    }

    pub fn handle_confirm_delete_key(key_event: KeyEvent) -> ConfirmDeleteAction {
        match key_event.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => ConfirmDeleteAction::Confirm,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => ConfirmDeleteAction::Cancel,
            _ => ConfirmDeleteAction::None,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum NormalModeAction {
    None,
    Quit,
    SelectPrevious,
    SelectNext,
    SelectFirst,
    SelectLast,
    StartRename,
    StartDelete,
    Reload,
    ToggleHelpMode,
}

#[derive(Debug, PartialEq)]
pub enum HelpModeAction {
    None,
    ExitHelpMode,
}

#[derive(Debug, PartialEq)]
pub enum RenameModeAction {
    None,
    Cancel,
    Confirm,
    Backspace,
    Delete,
    DeleteWordBackward,
    MoveCursorLeft,
    MoveCursorRight,
    MoveCursorHome,
    MoveCursorEnd,
    InsertChar(char),
}

#[derive(Debug, PartialEq)]
pub enum ConfirmDeleteAction {
    None,
    Confirm,
    Cancel,
}
