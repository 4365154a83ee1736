//! Key bindings: map raw key events to navigator actions or search-line edits.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_input::InputRequest;

use dhcpdeck_core::{Action, Focus};

/// What a key press means in the current focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyIntent {
    /// A navigator action.
    Navigate(Action),
    /// Submit the search line as the new query.
    SubmitSearch,
    /// Edit the search line.
    Edit(InputRequest),
    /// Leave immediately, whatever the focus.
    Exit,
}

/// Map a key press to an intent. Unbound keys yield `None`.
pub fn map_key(focus: Focus, key: KeyEvent) -> Option<KeyIntent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(KeyIntent::Exit);
    }
    match focus {
        Focus::SearchInput => map_search_key(key),
        Focus::Subnets | Focus::Table => map_panel_key(focus, key).map(KeyIntent::Navigate),
    }
}

fn map_panel_key(focus: Focus, key: KeyEvent) -> Option<Action> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    let action = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Tab => Action::SwitchPanel,
        KeyCode::Char('l') | KeyCode::Right => Action::MoveRight,
        KeyCode::Char('h') | KeyCode::Left => Action::MoveLeft,
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
        KeyCode::Enter if focus == Focus::Table => Action::ToggleRowSelection,
        KeyCode::Enter => Action::SelectSubnet,
        KeyCode::Char('/') => Action::BeginSearch,
        KeyCode::Char('n') => Action::SearchNext,
        KeyCode::Char('N') => Action::SearchPrevious,
        KeyCode::Char('d') if focus == Focus::Table => Action::DeleteSelectedLease,
        KeyCode::Char('m') => Action::CycleDisplayMode,
        KeyCode::Char('s') => Action::ShowServerStatus,
        _ => return None,
    };
    Some(action)
}

fn map_search_key(key: KeyEvent) -> Option<KeyIntent> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let request = match key.code {
        KeyCode::Enter => return Some(KeyIntent::SubmitSearch),
        KeyCode::Esc => return Some(KeyIntent::Navigate(Action::CancelSearch)),
        KeyCode::Char('u') if ctrl => InputRequest::DeleteLine,
        KeyCode::Char('w') if ctrl => InputRequest::DeletePrevWord,
        KeyCode::Char('a') if ctrl => InputRequest::GoToStart,
        KeyCode::Char('e') if ctrl => InputRequest::GoToEnd,
        KeyCode::Char(_) if ctrl => return None,
        KeyCode::Char(c) => InputRequest::InsertChar(c),
        KeyCode::Backspace => InputRequest::DeletePrevChar,
        KeyCode::Delete => InputRequest::DeleteNextChar,
        KeyCode::Left => InputRequest::GoToPrevChar,
        KeyCode::Right => InputRequest::GoToNextChar,
        KeyCode::Home => InputRequest::GoToStart,
        KeyCode::End => InputRequest::GoToEnd,
        _ => return None,
    };
    Some(KeyIntent::Edit(request))
}
