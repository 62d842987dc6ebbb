//! View state that is not owned by the core controllers

mod dashboard;
mod modal;

pub use dashboard::DashboardState;
pub use modal::{FormField, Modal, ModalState};
