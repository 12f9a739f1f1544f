//! Responsive dashboard layout.
//!
//! Pure functions of the terminal size. No state mutation.

use ratatui::layout::Rect;

/// Rows taken by the header strip (logo, stats, monitor, clock).
pub const HEADER_HEIGHT: u16 = 14;
const LOGO_WIDE: u16 = 64;
const LOGO_MIN: u16 = 30;

/// Panes that can hold keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    Browser,
    #[default]
    Terminal,
}

impl Pane {
    pub fn toggle(self) -> Self {
        match self {
            Pane::Browser => Pane::Terminal,
            Pane::Terminal => Pane::Browser,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportGeometry {
    pub area: Rect,
    pub logo: Rect,
    pub stats: Option<Rect>,
    pub monitor: Option<Rect>,
    pub clock: Rect,
    pub browser: Rect,
    pub terminal: Rect,
    pub preview: Option<Rect>,
    pub status: Rect,
}

impl ViewportGeometry {
    pub fn compute(area: Rect, show_preview: bool) -> Self {
        let w = area.width;
        let h = area.height;
        let header_h = HEADER_HEIGHT.min(h);
        let lower_h = h.saturating_sub(header_h + 1);

        let logo_w = if w > 90 {
            LOGO_WIDE
        } else {
            w.saturating_sub(25).clamp(LOGO_MIN, LOGO_WIDE)
        }
        .min(w);
        let remaining = w - logo_w;
        let header = |x: u16, width: u16| Rect::new(area.x + x, area.y, width, header_h);

        let logo = header(0, logo_w);
        let (stats, monitor, clock) = if remaining > 60 {
            let pw = remaining / 3;
            (
                Some(header(logo_w, pw)),
                Some(header(logo_w + pw, pw)),
                header(logo_w + pw * 2, w - (logo_w + pw * 2)),
            )
        } else if remaining > 40 {
            let pw = remaining / 2;
            (
                Some(header(logo_w, pw)),
                None,
                header(logo_w + pw, w - (logo_w + pw)),
            )
        } else {
            (None, None, header(logo_w, remaining))
        };

        let lower = |x: u16, width: u16| Rect::new(area.x + x, area.y + header_h, width, lower_h);
        let (browser, terminal, preview) = if show_preview {
            let side = w / 4;
            let term_w = w - side * 2;
            (
                lower(0, side),
                lower(side, term_w),
                Some(lower(side + term_w, side)),
            )
        } else {
            let side = w / 3;
            (lower(0, side), lower(side, w - side), None)
        };

        let status = Rect::new(
            area.x,
            area.y + h.saturating_sub(1),
            w,
            if h > 0 { 1 } else { 0 },
        );

        Self {
            area,
            logo,
            stats,
            monitor,
            clock,
            browser,
            terminal,
            preview,
            status,
        }
    }

    /// Focusable pane under a mouse position, if any.
    pub fn pane_at(&self, column: u16, row: u16) -> Option<Pane> {
        let hit = |rect: Rect| {
            column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
        };
        if hit(self.browser) {
            Some(Pane::Browser)
        } else if hit(self.terminal) {
            Some(Pane::Terminal)
        } else {
            None
        }
    }
}
