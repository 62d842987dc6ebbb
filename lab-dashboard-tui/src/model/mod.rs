//! Model layer: application state
//!
//! The model is the single source of truth of the UI. It is only changed by
//! the Update layer and only read by the View layer.
//!
//!     app             App: top-level state, owns the core controllers
//!     focus           FocusPanel: domain table or labs panel
//!     state/
//!         dashboard   cursors into the table and the labs list
//!         modal       active dialog (creation form, delete confirm, help, error)
//!
//! Domain rows, sorting, pagination, expansion and cached lab details belong
//! to `lab_dashboard_core::DomainListController`; the creation form and its
//! status belong to `lab_dashboard_core::CreationDialog`. The model only adds
//! what is purely about presentation: cursors, focus, dialogs and the status
//! bar message.

mod app;
mod focus;
pub mod state;

pub use app::{App, Tone};
pub use focus::FocusPanel;
pub use state::{DashboardState, FormField, Modal, ModalState};
