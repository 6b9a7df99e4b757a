//! Terminal UI module using ratatui.
//!
//! - `render`: frame layout, title and status bars, overlays
//! - `input`: keyboard handling for each view and overlay
//! - `styles`: colors and text styles
//! - `views`: the employee table and the employee form

pub mod input;
pub mod render;
pub mod styles;
pub mod views;
