//! Frame rendering.
//!
//! Every pane draws through `Canvas`, which clips to the buffer, so a
//! terminal of any size renders without panicking:
//! - Header strip (logo, stats, monitor, clock)
//! - File browser, terminal and preview panes
//! - Status bar with the event ticker

mod header;
mod panes;
mod status;


use ratatui::Frame;

use crate::ui::Canvas;

use super::state::App;

/// Main render entry point. Called each frame by the event loop.
pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();
    if area != app.geometry.area {
        app.resize(area);
    }
    let styles = app.theme.styles();
    let geometry = app.geometry;
    let mut canvas = Canvas::new(frame.buffer_mut());
    canvas.fill(area, styles.background);

    header::render_logo(app, &mut canvas, &styles, geometry.logo);
    if let Some(rect) = geometry.stats {
        header::render_stats(app, &mut canvas, &styles, rect);
    }
    if let Some(rect) = geometry.monitor {
        header::render_monitor(app, &mut canvas, &styles, rect);
    }
    header::render_clock(&mut canvas, &styles, geometry.clock);

    panes::render_browser(app, &mut canvas, &styles, geometry.browser);
    panes::render_terminal(app, &mut canvas, &styles, geometry.terminal);
    if let Some(rect) = geometry.preview {
        panes::render_preview(app, &mut canvas, &styles, rect);
    }
    status::render_status(app, &mut canvas, &styles, geometry.status);
}
