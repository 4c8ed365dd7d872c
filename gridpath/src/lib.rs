//! Interactive grid pathfinder.
//!
//! A [`Controller`] owns the grid and turns clicks and key presses into
//! edits and searches; [`settings`] loads its configuration and
//! [`logging`] routes diagnostics away from the terminal.

pub mod controller;
pub mod logging;
pub mod settings;

pub use controller::Controller;
pub use settings::{SettingsError, load_config};
