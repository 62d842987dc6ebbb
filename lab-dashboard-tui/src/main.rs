//! Lab Dashboard TUI
//!
//! Terminal front-end for the lab provisioning dashboard, built on the Elm
//! Architecture:
//! - **Model**: application state (`model/`)
//! - **Message**: what happened (`message/`)
//! - **Update**: state changes (`update/`)
//! - **View**: rendering (`view/`)
//! - **Event**: terminal input (`event/`)
//! - **Backend**: configuration and services (`backend/`)
//!
//! The event loop runs on the main thread inside a multi-threaded Tokio
//! runtime; requests to the lab API run as spawned tasks.

mod app;
mod backend;
mod event;
mod message;
mod model;
mod update;
mod util;
mod view;

#[cfg(test)]
mod test_utils;

use anyhow::Result;

use backend::{ConfigService, CoreService, LocalConfigService};
use util::{init_logging, init_terminal, restore_terminal};

fn main() -> Result<()> {
    let log_path = init_logging()?;

    let config = LocalConfigService::from_env().load()?;

    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    let backend = CoreService::new(&config)?;
    let mut app = model::App::new(backend);

    tracing::info!("Lab dashboard started, logging to {}", log_path.display());

    let mut terminal = init_terminal()?;
    let result = app::run(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;

    if let Err(e) = &result {
        tracing::error!("Dashboard stopped with an error: {e:#}");
    }
    result
}
