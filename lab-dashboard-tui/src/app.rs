//! Main loop
//!
//! loop {
//!     draw the model
//!     stop if `should_quit`
//!     wait up to 100 ms for input → message → update
//!     Tick → pick up background results
//! }

use std::time::Duration;

use anyhow::Result;

use crate::event;
use crate::message::AppMessage;
use crate::model::App;
use crate::update;
use crate::util::Term;
use crate::view;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub fn run(terminal: &mut Term, app: &mut App) -> Result<()> {
    // Initial list and options load
    update::update(app, AppMessage::Refresh);

    loop {
        terminal.draw(|frame| {
            view::render(app, frame);
        })?;

        if app.should_quit {
            break;
        }

        if let Some(event) = event::poll_event(POLL_INTERVAL)? {
            let msg = event::handle_event(event, app);
            update::update(app, msg);
        }

        update::update(app, AppMessage::Tick);
    }

    Ok(())
}
