use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Overlay};
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextMoment,
    PrevMoment,
    JumpToTop,
    JumpToBottom,
    PendingG, // First 'g' press, waiting for the second
    Heart,
    Save,
    Comments,
    Report,
    Refresh,
    Help,
    Cancel, // Esc: close overlays, clear status
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    match app.overlay {
        // Any key dismisses the help overlay
        Overlay::Help => return Action::Cancel,
        Overlay::Comments => {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('c') => Action::Cancel,
                _ => Action::None,
            };
        }
        Overlay::None => {}
    }

    let binding = normalized(key);

    // 'gg' requires a double press
    if keymap.is_g_prefix(&binding) {
        if app.pending_key == Some('g') {
            return keymap.pending_g_action().cloned().unwrap_or(Action::None);
        }
        return Action::PendingG;
    }

    keymap.get(&binding).cloned().unwrap_or(Action::None)
}

/// Symbol keys arrive with an incidental Shift modifier on some
/// terminals ('?' as Shift+'?'); strip it so lookups stay stable.
fn normalized(key: KeyEvent) -> KeyBinding {
    let mut modifiers = key.modifiers;
    if let KeyCode::Char(c) = key.code {
        if !c.is_ascii_alphabetic() {
            modifiers.remove(KeyModifiers::SHIFT);
        }
    }
    KeyBinding::new(key.code, modifiers)
}
