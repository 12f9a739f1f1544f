//! Application runner and event loop.
//!
//! Handles terminal setup/teardown and the frame loop. The loop is
//! single-threaded: each pass polls for at most one input event without
//! blocking, ticks the event ticker, and redraws once the frame interval
//! has passed. Otherwise it naps briefly.

use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::Rect;
use ratatui::Terminal;

use crate::config::load_config;
use crate::probes::SystemProbes;
use crate::shell::{DisplaySurface, ShellSession};
use crate::state::load_state;
use crate::ui::PALETTES;

use super::input::{apply, dispatch};
use super::state::App;
use super::surface::CrosstermSurface;

const FRAME_INTERVAL: Duration = Duration::from_millis(50);
const IDLE_SLEEP: Duration = Duration::from_millis(10);

/// Where the loop gets input from.
pub(super) trait EventSource {
    /// Whether an event is ready, without blocking.
    fn poll(&mut self) -> io::Result<bool>;
    fn read(&mut self) -> io::Result<Event>;
}

/// The real terminal's input queue.
struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn poll(&mut self) -> io::Result<bool> {
        event::poll(Duration::ZERO)
    }

    fn read(&mut self) -> io::Result<Event> {
        event::read()
    }
}

/// Entry point: set up terminal and run the event loop.
pub fn run() -> io::Result<()> {
    let mut surface = CrosstermSurface::enter()?;
    let result = Terminal::new(CrosstermBackend::new(io::stdout()))
        .and_then(|mut terminal| run_loop(&mut terminal, &mut surface));

    if let Err(err) = surface.leave() {
        tracing::warn!(%err, "failed to restore terminal");
    }
    if let Err(err) = &result {
        tracing::error!(%err, "event loop failed");
    }
    let mut stdout = io::stdout();
    let _ = writeln!(stdout, "\n\x1b[1;32m>>> SPECTRE terminated. <<<\x1b[0m\n");
    let _ = stdout.flush();

    result
}

/// Build the app and drive it until quit. State is saved however the
/// loop ends.
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    surface: &mut CrosstermSurface,
) -> io::Result<()> {
    let size = terminal.size()?;
    let mut app = App::new(Rect::new(0, 0, size.width, size.height));
    let result = terminal.clear();
    if result.is_ok() {
        drive(&mut app, terminal, &mut TerminalEvents, surface);
    }
    app.save();
    result
}

/// Main event loop: process events until quit. Terminal I/O errors are
/// logged and the loop carries on.
pub(super) fn drive<B: Backend>(
    app: &mut App,
    terminal: &mut Terminal<B>,
    events: &mut dyn EventSource,
    surface: &mut dyn DisplaySurface,
) {
    let mut last_frame: Option<Instant> = None;
    while !app.should_quit {
        match events.poll() {
            Ok(true) => match events.read() {
                Ok(event) => {
                    let action = dispatch(&event, app.focus, &app.keymap, &app.geometry);
                    apply(app, action, surface);
                }
                Err(err) => tracing::warn!(%err, "failed to read terminal event"),
            },
            Ok(false) => {}
            Err(err) => tracing::warn!(%err, "failed to poll terminal events"),
        }
        app.events.tick();

        let now = Instant::now();
        let due = last_frame.map_or(true, |at| now.duration_since(at) >= FRAME_INTERVAL);
        if !due {
            thread::sleep(IDLE_SLEEP);
            continue;
        }
        last_frame = Some(now);

        if app.refresh_requested {
            match terminal.clear() {
                Ok(()) => app.refresh_requested = false,
                Err(err) => tracing::warn!(%err, "full redraw failed"),
            }
        }
        if let Err(err) = terminal.draw(|frame| super::render::render(app, frame)) {
            tracing::warn!(%err, "frame draw failed");
        }
        if app.shell.exit_requested() {
            app.should_quit = true;
        }
    }
}

impl App {
    /// Create the dashboard with loaded config and state.
    pub fn new(area: Rect) -> Self {
        let config = load_config();
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"));
        let persisted = load_state(&home, PALETTES.len());
        tracing::info!(
            theme = persisted.theme,
            path = %persisted.path.display(),
            "starting dashboard"
        );
        let shell = ShellSession::new(config.shell.clone(), persisted.path.clone());
        Self::from_parts(
            config,
            persisted,
            shell,
            Box::new(SystemProbes::new()),
            area,
        )
    }
}
