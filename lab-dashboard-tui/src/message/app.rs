//! Top-level message

use super::{ContentMessage, ModalMessage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMessage {
    Quit,

    /// Switch between the domain table and the labs panel
    ToggleFocus,

    Content(ContentMessage),

    Modal(ModalMessage),

    /// Reload the domain list and the form options
    Refresh,

    ShowHelp,

    ClearStatus,

    /// Pick up background results and expire transient messages
    Tick,

    /// Ignored input
    Noop,
}
