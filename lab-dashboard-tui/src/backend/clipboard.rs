//! Terminal clipboard via OSC 52

use std::io::{self, Write};
use std::sync::Mutex;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use lab_dashboard_core::{Clipboard, CoreError, CoreResult};

/// `ESC ] 52 ; c ; <base64> BEL`
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

/// Asks the terminal emulator to set the system clipboard. Works over SSH
/// as long as the terminal honours OSC 52.
pub struct Osc52Clipboard {
    out: Mutex<Box<dyn Write + Send>>,
}

impl Osc52Clipboard {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }
}

impl Clipboard for Osc52Clipboard {
    fn write_text(&self, text: &str) -> CoreResult<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| CoreError::Clipboard("clipboard writer poisoned".into()))?;
        out.write_all(osc52_sequence(text).as_bytes())
            .and_then(|()| out.flush())
            .map_err(|e| CoreError::Clipboard(e.to_string()))?;
        log::debug!("Copied {} bytes to the clipboard", text.len());
        Ok(())
    }
}
