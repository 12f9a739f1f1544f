use ratatui::layout::Rect;

use crate::app::state::App;
use crate::shell::DisplaySurface;

use super::Action;

/// Perform `action` against the app. Only shell actions touch `surface`.
pub fn apply(app: &mut App, action: Action, surface: &mut dyn DisplaySurface) {
    match action {
        Action::Quit => app.should_quit = true,
        Action::CycleTheme => {
            app.theme.cycle();
            app.events
                .info(format!("Theme changed to {}", app.theme.name().to_uppercase()));
        }
        Action::SwitchPane => app.focus = app.focus.toggle(),
        Action::Focus(pane) => app.focus = pane,
        Action::Resize { cols, rows } => app.resize(Rect::new(0, 0, cols, rows)),
        Action::BrowserUp => app.browser.move_up(),
        Action::BrowserDown => app.browser.move_down(),
        Action::BrowserEnter => {
            if let Some(dir) = app.browser.enter() {
                app.events.info(format!("Dir: {}", dir.display()));
            }
        }
        Action::Shell(key) => {
            app.shell.handle_key(key, surface);
            if app.shell.take_redraw_request() {
                app.refresh_requested = true;
            }
        }
        Action::Ignore => {}
    }
    app.sync_layout();
}
