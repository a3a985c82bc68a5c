//! marketperf TUI - terminal interface for historical period comparisons
//!
//! Provides interactive exploration with:
//! - Period and instrument multi-selects
//! - Nominal / inflation-adjusted toggle
//! - Percent-change chart with a day cursor and unified hover readout

pub mod app;
pub mod input;
pub mod theme;
pub mod ui;

pub use app::AppState;
pub use input::handle_key;
pub use theme::Theme;

#[cfg(test)]
mod test_helpers;
