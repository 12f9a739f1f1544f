//! UI rendering and layout utilities.
//!
//! Pure drawing helpers separated from application state. Functions here
//! take data and write into a ratatui buffer without side effects.
//!
//! Submodules:
//! - canvas: clipping text and box primitives
//! - layout: responsive pane geometry
//! - theme: palettes and derived styles

mod canvas;
mod layout;
mod theme;

pub use canvas::{centered_x, clip, Canvas};
pub use layout::{Pane, ViewportGeometry, HEADER_HEIGHT};
pub use theme::{Styles, ThemeState, PALETTES};
