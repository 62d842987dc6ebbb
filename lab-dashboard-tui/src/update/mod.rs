//! Update layer: the only place the Model changes
//!
//!     update          top-level dispatch, tick handling
//!     content         dashboard table and labs panel
//!     modal           creation form, delete confirmation, help, error
//!
//! Background work (list loads, lab fetches, creation, deletion) is spawned
//! by the core controllers. Its results are applied on `Tick`, which the main
//! loop sends on every iteration.

mod content;
mod modal;

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::message::AppMessage;
use crate::model::App;

/// How long informational notices stay in the status bar.
const NOTICE_DURATION: Duration = Duration::from_secs(3);

pub fn update(app: &mut App, msg: AppMessage) {
    match msg {
        AppMessage::Quit => {
            app.should_quit = true;
        }

        AppMessage::ToggleFocus => {
            // The labs panel only exists while a domain is expanded
            if !app.modal.is_open() && (app.focus.is_labs() || !app.expanded_labs().is_empty()) {
                app.focus = app.focus.toggle();
            }
        }

        AppMessage::Content(content_msg) => {
            content::update(app, content_msg);
        }

        AppMessage::Modal(modal_msg) => {
            modal::update(app, modal_msg);
        }

        AppMessage::Refresh => {
            log::debug!("Refreshing domains and options");
            app.domains.refresh();
            app.backend.load_options();
        }

        AppMessage::ShowHelp => {
            app.modal.show_help();
        }

        AppMessage::ClearStatus => {
            app.clear_status();
        }

        AppMessage::Tick => tick(app, Utc::now(), Instant::now()),

        AppMessage::Noop => {}
    }
}

/// Apply background results and drop expired notices.
fn tick(app: &mut App, now: DateTime<Utc>, instant: Instant) {
    app.domains.sync(now);

    if app.options.sync() {
        app.dialog.set_vocabulary(app.options.vulnerable_apis());
    }

    let rows = app.domains.page_rows().len();
    let labs = app.expanded_labs().len();
    app.dashboard.clamp(rows, labs);
    if labs == 0 && app.focus.is_labs() {
        app.focus = app.focus.toggle();
    }

    if app
        .status_message
        .as_ref()
        .and_then(|m| m.expires_at)
        .is_some_and(|at| instant >= at)
    {
        app.clear_status();
    }
}

fn notice_expiry() -> Instant {
    Instant::now() + NOTICE_DURATION
}
