//! Terminal session of the dashboard
//!
//! Raw mode, the alternate screen and a hidden cursor are set up once per run.
//! A normal exit undoes them through [`restore_terminal`]. A panic in a render
//! or update path undoes them through the hook installed by [`init_terminal`],
//! so the panic message lands in a usable shell instead of the alternate
//! screen.

use std::io::{self, Stdout, Write};
use std::panic;
use std::sync::Once;

use anyhow::Result;
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

pub type Term = Terminal<CrosstermBackend<Stdout>>;

static PANIC_HOOK: Once = Once::new();

pub fn init_terminal() -> Result<Term> {
    install_panic_hook();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, Hide) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }

    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

pub fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    leave_screen(terminal.backend_mut())?;
    Ok(())
}

/// Leave the alternate screen and show the cursor again.
fn leave_screen(out: &mut impl Write) -> io::Result<()> {
    execute!(out, LeaveAlternateScreen, Show)
}

/// Chain a hook that restores the terminal before the previous hook prints.
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            // Best effort: the terminal may already be gone.
            let _ = disable_raw_mode();
            let _ = leave_screen(&mut io::stdout());
            previous(info);
        }));
    });
}
