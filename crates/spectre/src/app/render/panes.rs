use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

use crate::browser::EntryKind;
use crate::shell::LineKind;
use crate::ui::{clip, Canvas, Pane, Styles};

use super::super::state::App;
use super::header::bounds;

pub(super) fn render_browser(app: &mut App, canvas: &mut Canvas, styles: &Styles, rect: Rect) {
    let border = border_style(app.focus == Pane::Browser, styles);
    canvas.draw_box(rect, "FILESYSTEM", border);
    let (x, y, w, h) = bounds(rect);

    let path = app.browser.path().display().to_string();
    let room = (w - 6).max(0) as usize;
    let shown = if path.chars().count() > room {
        let keep = (w - 9).max(0) as usize;
        let tail: String = {
            let chars: Vec<char> = path.chars().collect();
            chars[chars.len().saturating_sub(keep)..].iter().collect()
        };
        format!("...{tail}")
    } else {
        path
    };
    canvas.put(x + 2, y + 1, &shown, styles.secondary);

    let visible = (h - 4).max(0) as usize;
    app.browser.ensure_visible(visible);
    let inner = (w - 4).max(0) as usize;
    let selected = app.browser.selected();
    let start = app.browser.scroll();

    for (i, entry) in app.browser.items().iter().skip(start).take(visible).enumerate() {
        let row = y + 2 + i as i32;
        let text = clip(&format!("  {} {}", entry.icon(), entry.label()), inner);
        if start + i == selected {
            canvas.fill_row(x + 2, row, inner as i32, styles.selection);
            let marked: String = "▸".chars().chain(text.chars().skip(1)).collect();
            canvas.put(x + 2, row, &marked, styles.selection);
            continue;
        }
        let style = match entry.kind {
            EntryKind::Denied => styles.alert,
            _ if entry.is_dir() => styles.secondary,
            _ if entry.name.starts_with('.') => styles.dim,
            _ => styles.accent,
        };
        canvas.put(x + 2, row, &text, style);
    }
}

pub(super) fn render_terminal(app: &App, canvas: &mut Canvas, styles: &Styles, rect: Rect) {
    let focused = app.focus == Pane::Terminal;
    canvas.draw_box(rect, "TERMINAL", border_style(focused, styles));
    let (x, y, w, h) = bounds(rect);
    let inner = (w - 4).max(0) as usize;
    let visible = (h - 4).max(0) as usize;

    let shell = &app.shell;
    let offset = shell
        .scroll_offset()
        .min(shell.scrollback.max_offset(visible));
    if offset > 0 {
        let indicator = format!(" ▴ {offset} ");
        canvas.put(x + w - indicator.width() as i32 - 2, y, &indicator, styles.warn);
    }

    for (i, line) in shell.scrollback.window(visible, offset).enumerate() {
        let style = match line.kind {
            LineKind::Error => styles.alert,
            LineKind::Echo => styles.primary,
            LineKind::Status => styles.secondary,
            LineKind::Output => styles.accent,
        };
        canvas.put(x + 2, y + 1 + i as i32, &clip(&line.text, inner), style);
    }

    let prompt = shell.prompt();
    let input_row = y + h - 2;
    let input = format!("{prompt}{}", shell.editor.as_str());
    canvas.put(x + 2, input_row, &clip(&input, inner), styles.primary);
    if focused {
        let cursor_x =
            x + 2 + prompt.width() as i32 + shell.editor.before_cursor().width() as i32;
        if cursor_x < x + w - 2 {
            canvas.put(cursor_x, input_row, "█", styles.accent);
        }
    }
}

pub(super) fn render_preview(app: &App, canvas: &mut Canvas, styles: &Styles, rect: Rect) {
    canvas.draw_box(rect, "PREVIEW", styles.primary);
    let (x, y, w, h) = bounds(rect);
    let inner = (w - 4).max(0) as usize;

    let Some(preview) = app.browser.preview() else {
        canvas.put(x + 2, y + h / 2, "Select a file to preview", styles.dim);
        return;
    };
    canvas.put(x + 2, y + 1, &clip(&preview.file_name(), inner), styles.secondary);
    for (i, line) in preview.lines.iter().enumerate() {
        let row = y + 2 + i as i32;
        if row >= y + h - 1 {
            break;
        }
        canvas.put(x + 2, row, &clip(line, inner), styles.accent);
    }
}

fn border_style(focused: bool, styles: &Styles) -> ratatui::style::Style {
    if focused {
        styles.accent
    } else {
        styles.primary
    }
}
