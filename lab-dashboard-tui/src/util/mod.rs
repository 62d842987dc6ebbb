//! Util layer: terminal and logging infrastructure
//!
//!     terminal    raw mode + alternate screen on start, restored on exit or panic
//!     logging     file logging; stdout belongs to the terminal UI
//!
//! `restore_terminal` must run whether the main loop returned an error or
//! not, otherwise the shell is left in raw mode.

mod logging;
mod terminal;

pub use logging::init_logging;
pub use terminal::{Term, init_terminal, restore_terminal};
