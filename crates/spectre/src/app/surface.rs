//! The real terminal as a display surface.
//!
//! Tracks which modes are currently on so that `release` and `reacquire`
//! can each be called after a partial failure and still converge.

use std::io::{self, stdout};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;

use crate::shell::DisplaySurface;

#[derive(Debug, Default)]
pub struct CrosstermSurface {
    raw_mode: bool,
    alternate_screen: bool,
    mouse_capture: bool,
}

impl CrosstermSurface {
    /// Take over the terminal. Undoes partial setup on failure.
    pub fn enter() -> io::Result<Self> {
        let mut surface = Self::default();
        if let Err(err) = surface.acquire() {
            tracing::error!(%err, "terminal setup failed");
            let _ = surface.release();
            return Err(err);
        }
        Ok(surface)
    }

    /// Give the terminal back for good.
    pub fn leave(&mut self) -> io::Result<()> {
        self.release()
    }

    fn acquire(&mut self) -> io::Result<()> {
        if !self.raw_mode {
            enable_raw_mode()?;
            self.raw_mode = true;
        }
        if !self.alternate_screen {
            stdout().execute(EnterAlternateScreen)?;
            self.alternate_screen = true;
        }
        stdout().execute(Hide)?;
        if !self.mouse_capture {
            match stdout().execute(EnableMouseCapture) {
                Ok(_) => self.mouse_capture = true,
                // Non-fatal, the dashboard works without clicks.
                Err(err) => tracing::warn!(%err, "failed to enable mouse capture"),
            }
        }
        Ok(())
    }
}

impl DisplaySurface for CrosstermSurface {
    fn release(&mut self) -> io::Result<()> {
        let mut first_err = None;
        if self.mouse_capture {
            match stdout().execute(DisableMouseCapture) {
                Ok(_) => self.mouse_capture = false,
                Err(err) => first_err = first_err.or(Some(err)),
            }
        }
        if self.alternate_screen {
            match stdout().execute(LeaveAlternateScreen) {
                Ok(_) => self.alternate_screen = false,
                Err(err) => first_err = first_err.or(Some(err)),
            }
        }
        if let Err(err) = stdout().execute(Show) {
            first_err = first_err.or(Some(err));
        }
        if self.raw_mode {
            match disable_raw_mode() {
                Ok(()) => self.raw_mode = false,
                Err(err) => first_err = first_err.or(Some(err)),
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn reacquire(&mut self) -> io::Result<()> {
        self.acquire()
    }
}
