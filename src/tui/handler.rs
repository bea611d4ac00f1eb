use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    MoveUp,
    MoveDown,
    MoveToTop,
    MoveToBottom,
    /// Zero-based index into the menu shown in the sidebar.
    SelectMenu(usize),
    FilterByAuthor,
    ShowAllPosts,
    Reload,
    ShowHelp,
    HideHelp,
    // Form input actions
    InputChar(char),
    InputBackspace,
    NextField,
    PrevField,
    InputConfirm,
    InputCancel,
}

pub fn handle_key_event(key: KeyEvent, input_active: bool, show_help: bool) -> Option<AppAction> {
    // If help is showing, any key closes it
    if show_help {
        return Some(AppAction::HideHelp);
    }

    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return Some(AppAction::Quit);
    }

    // Form input mode
    if input_active {
        return match key.code {
            KeyCode::Enter => Some(AppAction::InputConfirm),
            KeyCode::Esc => Some(AppAction::InputCancel),
            KeyCode::Backspace => Some(AppAction::InputBackspace),
            KeyCode::Tab | KeyCode::Down => Some(AppAction::NextField),
            KeyCode::BackTab | KeyCode::Up => Some(AppAction::PrevField),
            KeyCode::Char(c) => Some(AppAction::InputChar(c)),
            _ => None,
        };
    }

    // Normal mode
    match key.code {
        KeyCode::Char('q') => Some(AppAction::Quit),

        KeyCode::Char('j') | KeyCode::Down => Some(AppAction::MoveDown),
        KeyCode::Char('k') | KeyCode::Up => Some(AppAction::MoveUp),
        KeyCode::Char('<') | KeyCode::Home => Some(AppAction::MoveToTop),
        KeyCode::Char('>') | KeyCode::End => Some(AppAction::MoveToBottom),

        KeyCode::Char(c @ '1'..='9') => Some(AppAction::SelectMenu(c as usize - '1' as usize)),

        KeyCode::Enter => Some(AppAction::FilterByAuthor),
        KeyCode::Char('b') | KeyCode::Esc => Some(AppAction::ShowAllPosts),
        KeyCode::Char('r') => Some(AppAction::Reload),

        KeyCode::Char('?') => Some(AppAction::ShowHelp),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn digits_pick_menu_entries() {
        assert_eq!(
            handle_key_event(key(KeyCode::Char('1')), false, false),
            Some(AppAction::SelectMenu(0))
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('6')), false, false),
            Some(AppAction::SelectMenu(5))
        );
    }

    #[test]
    fn forms_capture_letters() {
        assert_eq!(
            handle_key_event(key(KeyCode::Char('q')), true, false),
            Some(AppAction::InputChar('q'))
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('1')), true, false),
            Some(AppAction::InputChar('1'))
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Esc), true, false),
            Some(AppAction::InputCancel)
        );
    }

    #[test]
    fn ctrl_c_always_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_c, true, false), Some(AppAction::Quit));
    }

    #[test]
    fn help_swallows_next_key() {
        assert_eq!(
            handle_key_event(key(KeyCode::Char('q')), false, true),
            Some(AppAction::HideHelp)
        );
    }
}
