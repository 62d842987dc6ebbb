//! Platform abstraction traits

mod clipboard;

pub use clipboard::Clipboard;
