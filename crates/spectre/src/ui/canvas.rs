//! Clipping draw primitives over a ratatui buffer.
//!
//! Coordinates are signed and absolute. Anything that starts outside the
//! canvas is dropped; text that runs past the right edge is cut. Nothing
//! here can fail.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::UnicodeWidthStr;

pub struct Canvas<'a> {
    buf: &'a mut Buffer,
    area: Rect,
}

impl<'a> Canvas<'a> {
    pub fn new(buf: &'a mut Buffer) -> Self {
        let area = buf.area;
        Self { buf, area }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Write `text` at (`x`, `y`), truncated to the remaining width.
    pub fn put(&mut self, x: i32, y: i32, text: &str, style: Style) {
        let left = i32::from(self.area.x);
        let top = i32::from(self.area.y);
        let right = i32::from(self.area.right());
        let bottom = i32::from(self.area.bottom());
        if x < left || x >= right || y < top || y >= bottom {
            return;
        }
        let max_width = (right - x) as usize;
        self.buf
            .set_stringn(x as u16, y as u16, text, max_width, style);
    }

    /// Paint `width` cells starting at (`x`, `y`) with spaces.
    pub fn fill_row(&mut self, x: i32, y: i32, width: i32, style: Style) {
        if width > 0 {
            self.put(x, y, &" ".repeat(width as usize), style);
        }
    }

    pub fn fill(&mut self, rect: Rect, style: Style) {
        for row in 0..rect.height {
            self.fill_row(
                i32::from(rect.x),
                i32::from(rect.y + row),
                i32::from(rect.width),
                style,
            );
        }
    }

    /// Double-line box with an optional `╣ title ╠` tab on the top edge.
    pub fn draw_box(&mut self, rect: Rect, title: &str, style: Style) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let x = i32::from(rect.x);
        let y = i32::from(rect.y);
        let inner = rect.width as usize - 2;
        let bottom = y + i32::from(rect.height) - 1;

        self.put(x, y, &format!("╔{}╗", "═".repeat(inner)), style);
        let middle = format!("║{}║", " ".repeat(inner));
        for row in y + 1..bottom {
            self.put(x, row, &middle, style);
        }
        self.put(x, bottom, &format!("╚{}╝", "═".repeat(inner)), style);
        if !title.is_empty() {
            self.put(x + 2, y, &format!("╣ {title} ╠"), style);
        }
    }
}

/// Column that centers `text` inside `rect`.
pub fn centered_x(rect: Rect, text: &str) -> i32 {
    let free = i32::from(rect.width) - text.width() as i32;
    i32::from(rect.x) + free.max(0) / 2
}

/// Cut `text` to at most `max` columns.
pub fn clip(text: &str, max: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + width > max {
            break;
        }
        used += width;
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{clip, Canvas};
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use ratatui::style::Style;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn put_clips_and_ignores_out_of_bounds() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 8, 2));
        let mut canvas = Canvas::new(&mut buf);
        canvas.put(5, 0, "overflowing", Style::default());
        canvas.put(-1, 1, "nope", Style::default());
        canvas.put(0, 2, "nope", Style::default());
        canvas.put(8, 1, "nope", Style::default());
        assert_eq!(row(&buf, 0), "     ove");
        assert_eq!(row(&buf, 1), "        ");
    }

    #[test]
    fn draw_box_frames_title() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 12, 3));
        Canvas::new(&mut buf).draw_box(Rect::new(0, 0, 12, 3), "LOG", Style::default());
        assert_eq!(row(&buf, 0), "╔═╣ LOG ╠══╗");
        assert_eq!(row(&buf, 1), "║          ║");
        assert_eq!(row(&buf, 2), "╚══════════╝");
    }

    #[test]
    fn tiny_boxes_are_skipped() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 4));
        Canvas::new(&mut buf).draw_box(Rect::new(0, 0, 1, 4), "X", Style::default());
        assert_eq!(row(&buf, 0), "    ");
    }

    #[test]
    fn clip_counts_columns() {
        assert_eq!(clip("hello", 3), "hel");
        assert_eq!(clip("📂 dir", 3), "📂 ");
    }
}
