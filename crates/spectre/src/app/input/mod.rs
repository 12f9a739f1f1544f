//! Input event handling.
//!
//! `dispatch` turns one terminal event into exactly one `Action` without
//! touching state; `apply` performs it. Global bindings (quit, theme,
//! pane switch, resize) win over pane-specific keys.

mod apply;
mod dispatch;

#[cfg(test)]
mod tests;

use crate::shell::EditKey;
use crate::ui::Pane;

pub use apply::apply;
pub use dispatch::dispatch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    CycleTheme,
    SwitchPane,
    Focus(Pane),
    Resize { cols: u16, rows: u16 },
    BrowserUp,
    BrowserDown,
    BrowserEnter,
    Shell(EditKey),
    Ignore,
}
