use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    ToggleHelp,
    NewWindow,
    InstallNextApp,
    CycleFilter,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Quit => "Quit",
            Action::ToggleHelp => "Toggle help",
            Action::NewWindow => "Open a new window",
            Action::InstallNextApp => "Install the next catalog app",
            Action::CycleFilter => "Cycle the catalog filter",
        };
        write!(f, "{}", s)
    }
}

pub fn action_for_key(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('?') | KeyCode::Char('h') => Some(Action::ToggleHelp),
        KeyCode::Char('n') => Some(Action::NewWindow),
        KeyCode::Char('i') => Some(Action::InstallNextApp),
        KeyCode::Char('f') => Some(Action::CycleFilter),
        _ => None,
    }
}
