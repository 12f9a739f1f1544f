use crossterm::event::KeyCode;
use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

use crate::keymap::KeyChord;
use crate::ui::{Canvas, Styles};

use super::super::state::App;
use super::header::bounds;

pub(super) fn render_status(app: &App, canvas: &mut Canvas, styles: &Styles, rect: Rect) {
    let (x, y, w, _) = bounds(rect);
    canvas.fill(rect, styles.inverse);
    let hints = format!(
        " TAB:Switch │ {}:Theme │ PgUp/Dn:Scroll │ {}:Exit ",
        chord_label(&app.keymap.cycle_theme),
        chord_label(&app.keymap.quit),
    );
    canvas.put(x, y, &hints, styles.inverse);

    let hints_width = hints.width() as i32;
    let ticker_width = w - hints_width - 2;
    if ticker_width > 10 {
        let latest = app
            .events
            .latest()
            .map(|entry| entry.line())
            .unwrap_or_default();
        canvas.put(
            x + hints_width + 1,
            y,
            &format!(" ⚡ {latest:<width$}", width = ticker_width as usize),
            styles.inverse,
        );
    }
}

/// Compact label for a chord: `^Q`, `M-x`, `F10`.
pub(super) fn chord_label(chord: &KeyChord) -> String {
    let key = match chord.key {
        KeyCode::Char(ch) => ch.to_ascii_uppercase().to_string(),
        KeyCode::F(n) => format!("F{n}"),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        other => format!("{other:?}"),
    };
    let mut label = String::new();
    if chord.ctrl {
        label.push('^');
    }
    if chord.alt {
        label.push_str("M-");
    }
    if chord.meta {
        label.push_str("Super-");
    }
    if chord.shift {
        label.push_str("S-");
    }
    label.push_str(&key);
    label
}
