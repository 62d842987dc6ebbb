//! Event layer: terminal input → messages
//!
//!     handler     poll_event (called by the main loop) and handle_event
//!     keymap      key bindings
//!
//! Only key presses are handled. When a dialog is open it receives every
//! key; otherwise global bindings are checked first, then the bindings of
//! the focused panel.

mod handler;
mod keymap;

pub use handler::{handle_event, poll_event};
