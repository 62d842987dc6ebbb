//! Dialog messages

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalMessage {
    /// Close the dialog
    Close,

    NextField,

    PrevField,

    /// ← : previous choice / button
    Left,

    /// → : next choice / button
    Right,

    /// ↑ : previous suggestion
    Up,

    /// ↓ : next suggestion
    Down,

    /// Enter
    Confirm,

    /// Ctrl+S: submit the form from any field
    Submit,

    Input(char),

    Backspace,
}
