//! Tab screen key handling.
//!
//! Keys are translated into requests; the shell and its gate decide what
//! actually happens.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tabgate_core::NavigationShell;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabsAction {
    None,
    Quit,
    Tap(String),
    OpenGoTo,
    OpenSignIn,
    Logout,
    BackToOnboarding,
}

pub fn handle_tabs_key(shell: &NavigationShell, key: KeyEvent) -> TabsAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return TabsAction::None;
    }

    let tabs = shell.tabs();
    let current = tabs.position(shell.selected_id()).unwrap_or(0);
    let neighbor = |forward: bool| {
        let len = tabs.len();
        let index = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        tabs.by_index(index)
            .map_or(TabsAction::None, |t| TabsAction::Tap(t.id.to_string()))
    };

    match key.code {
        KeyCode::Char('q') => TabsAction::Quit,
        KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => neighbor(true),
        KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => neighbor(false),
        KeyCode::Char(c @ '1'..='9') => {
            let index = (c as usize) - ('1' as usize);
            tabs.by_index(index)
                .map_or(TabsAction::None, |t| TabsAction::Tap(t.id.to_string()))
        }
        KeyCode::Char('g') => TabsAction::OpenGoTo,
        KeyCode::Char('s') if !shell.is_signed_in() => TabsAction::OpenSignIn,
        KeyCode::Char('o') if shell.is_signed_in() => TabsAction::Logout,
        KeyCode::Esc | KeyCode::Char('b') if shell.selected_id() == tabs.fallback().id.as_str() => {
            TabsAction::BackToOnboarding
        }
        _ => TabsAction::None,
    }
}
