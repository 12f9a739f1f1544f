use std::fs;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::Rect;
use tempfile::TempDir;

use super::{apply, dispatch, Action};
use crate::app::fixtures::{app_in, NullSurface};
use crate::keymap::Keymap;
use crate::shell::EditKey;
use crate::ui::{Pane, ViewportGeometry};

fn geometry() -> ViewportGeometry {
    ViewportGeometry::compute(Rect::new(0, 0, 120, 40), false)
}

fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
    Event::Key(KeyEvent::new(code, modifiers))
}

fn press(code: KeyCode) -> Event {
    key(code, KeyModifiers::NONE)
}

fn route(event: &Event, focus: Pane) -> Action {
    dispatch(event, focus, &Keymap::default(), &geometry())
}

fn click(column: u16, row: u16) -> Event {
    Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

#[test]
fn ctrl_c_quits_from_any_pane() {
    let event = key(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert_eq!(route(&event, Pane::Terminal), Action::Quit);
    assert_eq!(route(&event, Pane::Browser), Action::Quit);
}

#[test]
fn quit_chord_beats_pane_keys() {
    let event = key(KeyCode::Char('q'), KeyModifiers::CONTROL);
    assert_eq!(route(&event, Pane::Terminal), Action::Quit);
}

#[test]
fn plain_q_quits_only_from_browser() {
    assert_eq!(route(&press(KeyCode::Char('q')), Pane::Browser), Action::Quit);
    assert_eq!(route(&press(KeyCode::Char('Q')), Pane::Browser), Action::Quit);
    assert_eq!(
        route(&press(KeyCode::Char('q')), Pane::Terminal),
        Action::Shell(EditKey::Char('q'))
    );
}

#[test]
fn theme_and_pane_switch_are_global() {
    let theme = key(KeyCode::Char('t'), KeyModifiers::CONTROL);
    assert_eq!(route(&theme, Pane::Terminal), Action::CycleTheme);
    assert_eq!(route(&theme, Pane::Browser), Action::CycleTheme);
    assert_eq!(route(&press(KeyCode::Tab), Pane::Terminal), Action::SwitchPane);
    assert_eq!(
        route(&key(KeyCode::BackTab, KeyModifiers::SHIFT), Pane::Browser),
        Action::SwitchPane
    );
}

#[test]
fn key_release_is_ignored() {
    let event = Event::Key(KeyEvent {
        code: KeyCode::Char('a'),
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Release,
        state: KeyEventState::NONE,
    });
    assert_eq!(route(&event, Pane::Terminal), Action::Ignore);
}

#[test]
fn browser_keys_move_and_open() {
    assert_eq!(route(&press(KeyCode::Up), Pane::Browser), Action::BrowserUp);
    assert_eq!(route(&press(KeyCode::Down), Pane::Browser), Action::BrowserDown);
    assert_eq!(route(&press(KeyCode::Enter), Pane::Browser), Action::BrowserEnter);
    assert_eq!(route(&press(KeyCode::Char('x')), Pane::Browser), Action::Ignore);
}

#[test]
fn terminal_keys_go_to_shell() {
    let cases = [
        (KeyCode::Char('x'), EditKey::Char('x')),
        (KeyCode::Backspace, EditKey::Backspace),
        (KeyCode::Delete, EditKey::Delete),
        (KeyCode::Home, EditKey::Home),
        (KeyCode::Up, EditKey::Up),
        (KeyCode::Enter, EditKey::Enter),
        (KeyCode::PageUp, EditKey::PageUp),
        (KeyCode::PageDown, EditKey::PageDown),
    ];
    for (code, edit) in cases {
        assert_eq!(route(&press(code), Pane::Terminal), Action::Shell(edit));
    }
    let ctrl_x = key(KeyCode::Char('x'), KeyModifiers::CONTROL);
    assert_eq!(route(&ctrl_x, Pane::Terminal), Action::Ignore);
    assert_eq!(
        route(&key(KeyCode::Char('X'), KeyModifiers::SHIFT), Pane::Terminal),
        Action::Shell(EditKey::Char('X'))
    );
}

#[test]
fn click_focuses_pane_under_pointer() {
    let geo = geometry();
    let browser = click(geo.browser.x + 1, geo.browser.y + 1);
    let terminal = click(geo.terminal.x + 1, geo.terminal.y + 1);
    assert_eq!(route(&browser, Pane::Terminal), Action::Focus(Pane::Browser));
    assert_eq!(route(&terminal, Pane::Browser), Action::Focus(Pane::Terminal));
    assert_eq!(route(&click(0, 0), Pane::Terminal), Action::Ignore);
}

#[test]
fn resize_event_maps_to_resize() {
    assert_eq!(
        route(&Event::Resize(80, 24), Pane::Terminal),
        Action::Resize { cols: 80, rows: 24 }
    );
}

#[test]
fn apply_cycle_theme_logs_name() {
    let dir = TempDir::new().expect("temp dir");
    let mut app = app_in(dir.path(), Rect::new(0, 0, 120, 40));
    let mut surface = NullSurface::default();

    apply(&mut app, Action::CycleTheme, &mut surface);

    assert_eq!(app.theme.index(), 1);
    let latest = app.events.latest().expect("event");
    assert_eq!(latest.message, "Theme changed to MINT");
}

#[test]
fn apply_switch_and_focus() {
    let dir = TempDir::new().expect("temp dir");
    let mut app = app_in(dir.path(), Rect::new(0, 0, 120, 40));
    let mut surface = NullSurface::default();

    apply(&mut app, Action::SwitchPane, &mut surface);
    assert_eq!(app.focus, Pane::Browser);
    apply(&mut app, Action::Focus(Pane::Terminal), &mut surface);
    assert_eq!(app.focus, Pane::Terminal);
}

#[test]
fn apply_browser_enter_logs_directory() {
    let dir = TempDir::new().expect("temp dir");
    fs::create_dir(dir.path().join("sub")).expect("mkdir");
    let mut app = app_in(dir.path(), Rect::new(0, 0, 120, 40));
    let mut surface = NullSurface::default();
    let target = app
        .browser
        .items()
        .iter()
        .position(|entry| entry.name == "sub")
        .expect("sub listed");
    for _ in 0..target {
        apply(&mut app, Action::BrowserDown, &mut surface);
    }

    apply(&mut app, Action::BrowserEnter, &mut surface);

    assert!(app.browser.path().ends_with("sub"));
    let latest = app.events.latest().expect("event");
    assert!(latest.message.starts_with("Dir: "));
    assert!(latest.message.ends_with("sub"));
}

#[test]
fn apply_file_selection_opens_preview_layout() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("readme.md"), "# title\n").expect("write");
    let mut app = app_in(dir.path(), Rect::new(0, 0, 120, 40));
    let mut surface = NullSurface::default();
    assert!(app.geometry.preview.is_none());

    for _ in 0..app.browser.items().len() {
        apply(&mut app, Action::BrowserDown, &mut surface);
    }

    assert!(app.browser.preview().is_some());
    assert!(app.geometry.preview.is_some());
}

#[test]
fn apply_shell_keys_edit_and_run() {
    let dir = TempDir::new().expect("temp dir");
    let mut app = app_in(dir.path(), Rect::new(0, 0, 120, 40));
    let mut surface = NullSurface::default();

    for ch in "exit".chars() {
        apply(&mut app, Action::Shell(EditKey::Char(ch)), &mut surface);
    }
    assert_eq!(app.shell.editor.as_str(), "exit");
    apply(&mut app, Action::Shell(EditKey::Enter), &mut surface);

    assert!(app.shell.exit_requested());
    assert_eq!(surface.released, 0);
    assert!(!app.refresh_requested);
}

#[test]
fn apply_resize_recomputes_geometry() {
    let dir = TempDir::new().expect("temp dir");
    let mut app = app_in(dir.path(), Rect::new(0, 0, 120, 40));
    let mut surface = NullSurface::default();

    apply(&mut app, Action::Resize { cols: 60, rows: 20 }, &mut surface);

    assert_eq!(app.geometry.area, Rect::new(0, 0, 60, 20));
}

#[test]
fn apply_quit_sets_flag() {
    let dir = TempDir::new().expect("temp dir");
    let mut app = app_in(dir.path(), Rect::new(0, 0, 120, 40));
    let mut surface = NullSurface::default();

    apply(&mut app, Action::Quit, &mut surface);

    assert!(app.should_quit);
}
