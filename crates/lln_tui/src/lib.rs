//! # Law of Large Numbers TUI
//!
//! Terminal dashboard for the Bernoulli simulator. Uses ratatui for
//! rendering and crossterm for terminal handling.
//!
//! ### Screens
//! - **Results**: `n` / `result` / `|result - p|` table with the preset caption
//! - **Frequency**: empirical frequency vs. `n`, optional `y = p` line
//! - **Deviation**: absolute deviation vs. `n`
//!
//! Parameters (probability, seed, large-`n` flag, preset, chart options)
//! sit in a side panel and are changed from the keyboard.

pub mod app;
pub mod screens;
pub mod state;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::app::TuiApp;
    pub use crate::state::{DashboardState, RunOutput, Screen};
}
