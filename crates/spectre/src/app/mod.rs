//! Dashboard orchestration and main event loop.
//!
//! This module owns the application lifecycle:
//! - Initialization (terminal setup, config and state loading)
//! - Event loop (input, event ticker, frame cadence)
//! - Terminal release and reacquire around interactive programs
//! - UI rendering delegation
//!
//! All mutable state lives in one `App` struct owned by the loop.
//!
//! Submodules:
//! - state: App struct
//! - runner: main loop and terminal setup
//! - surface: crossterm-backed display surface
//! - input: keyboard and mouse event handling
//! - render: frame drawing

mod input;
mod render;
mod runner;
mod state;
mod surface;

#[cfg(test)]
mod fixtures;

pub use runner::run;
