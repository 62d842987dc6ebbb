//! Clipboard abstraction Trait

use crate::error::CoreResult;

/// Text clipboard
///
/// Platform implementation:
/// - TUI: `Osc52Clipboard` (terminal escape sequence)
/// - Tests: `MemoryClipboard`
pub trait Clipboard: Send + Sync {
    /// Replace the clipboard contents with `text`.
    fn write_text(&self, text: &str) -> CoreResult<()>;
}
