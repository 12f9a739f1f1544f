use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::keymap::{matches_chord, Keymap};
use crate::shell::EditKey;
use crate::ui::{Pane, ViewportGeometry};

use super::Action;

/// Map one terminal event to the action it triggers.
pub fn dispatch(
    event: &Event,
    focus: Pane,
    keymap: &Keymap,
    geometry: &ViewportGeometry,
) -> Action {
    match event {
        Event::Key(key) => dispatch_key(*key, focus, keymap),
        Event::Mouse(mouse) => dispatch_mouse(*mouse, geometry),
        Event::Resize(cols, rows) => Action::Resize {
            cols: *cols,
            rows: *rows,
        },
        _ => Action::Ignore,
    }
}

fn dispatch_key(key: KeyEvent, focus: Pane, keymap: &Keymap) -> Action {
    if key.kind == KeyEventKind::Release {
        return Action::Ignore;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C')) {
        return Action::Quit;
    }
    if matches_chord(key, &keymap.quit) {
        return Action::Quit;
    }
    if matches_chord(key, &keymap.cycle_theme) {
        return Action::CycleTheme;
    }
    if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
        return Action::SwitchPane;
    }

    match focus {
        Pane::Browser => match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') if !ctrl && !alt => Action::Quit,
            KeyCode::Up => Action::BrowserUp,
            KeyCode::Down => Action::BrowserDown,
            KeyCode::Enter => Action::BrowserEnter,
            _ => Action::Ignore,
        },
        Pane::Terminal => {
            let edit = match key.code {
                KeyCode::Char(ch) if !ctrl && !alt => EditKey::Char(ch),
                KeyCode::Backspace => EditKey::Backspace,
                KeyCode::Delete => EditKey::Delete,
                KeyCode::Left => EditKey::Left,
                KeyCode::Right => EditKey::Right,
                KeyCode::Home => EditKey::Home,
                KeyCode::End => EditKey::End,
                KeyCode::Up => EditKey::Up,
                KeyCode::Down => EditKey::Down,
                KeyCode::Enter => EditKey::Enter,
                KeyCode::PageUp => EditKey::PageUp,
                KeyCode::PageDown => EditKey::PageDown,
                _ => return Action::Ignore,
            };
            Action::Shell(edit)
        }
    }
}

fn dispatch_mouse(mouse: MouseEvent, geometry: &ViewportGeometry) -> Action {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return Action::Ignore;
    }
    geometry
        .pane_at(mouse.column, mouse.row)
        .map(Action::Focus)
        .unwrap_or(Action::Ignore)
}
