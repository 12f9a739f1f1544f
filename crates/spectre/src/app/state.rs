//! Application state.
//!
//! Defines the App struct which holds all mutable dashboard state. It is
//! owned by the event loop and handed to input and render code by
//! reference.

use std::path::PathBuf;

use ratatui::layout::Rect;

use crate::browser::FileBrowser;
use crate::config::Config;
use crate::events::EventLog;
use crate::keymap::Keymap;
use crate::probes::ProbeSource;
use crate::shell::ShellSession;
use crate::state::{save_state, PersistedState};
use crate::stats::StatCache;
use crate::ui::{Pane, ThemeState, ViewportGeometry};

pub struct App {
    pub config: Config,
    pub keymap: Keymap,
    pub theme: ThemeState,
    pub focus: Pane,
    pub shell: ShellSession,
    pub browser: FileBrowser,
    pub stats: StatCache,
    pub events: EventLog,
    pub geometry: ViewportGeometry,
    pub should_quit: bool,
    /// Next frame clears the whole screen first.
    pub refresh_requested: bool,
}

impl App {
    pub fn from_parts(
        config: Config,
        persisted: PersistedState,
        shell: ShellSession,
        source: Box<dyn ProbeSource>,
        area: Rect,
    ) -> Self {
        let keymap = Keymap::from_config(&config.keymap);
        let stats = StatCache::new(source, config.probes, config.thresholds);
        let browser = FileBrowser::new(persisted.path);
        let geometry = ViewportGeometry::compute(area, browser.preview().is_some());
        Self {
            config,
            keymap,
            theme: ThemeState::new(persisted.theme),
            focus: Pane::Terminal,
            shell,
            browser,
            stats,
            events: EventLog::new(),
            geometry,
            should_quit: false,
            refresh_requested: false,
        }
    }

    /// Recompute pane geometry for `area`.
    pub fn resize(&mut self, area: Rect) {
        self.geometry = ViewportGeometry::compute(area, self.browser.preview().is_some());
    }

    /// Recompute geometry when the preview pane appeared or went away.
    pub fn sync_layout(&mut self) {
        if self.geometry.preview.is_some() != self.browser.preview().is_some() {
            self.resize(self.geometry.area);
        }
    }

    pub fn persisted(&self) -> PersistedState {
        PersistedState {
            theme: self.theme.index(),
            path: PathBuf::from(self.browser.path()),
        }
    }

    pub fn save(&self) {
        match save_state(&self.persisted()) {
            Ok(()) => tracing::debug!("state saved"),
            Err(err) => tracing::warn!(%err, "failed to save state"),
        }
    }
}
