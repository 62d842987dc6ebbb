//! Lab Dashboard Core Library
//!
//! Platform-independent logic of the lab provisioning dashboard:
//! - Creation status model (`status`)
//! - Data access gateway over the lab API (`gateway`)
//! - Domain list controller: TTL, sorting, pagination, row expansion (`domain_list`)
//! - Instance creation form, dialog lifecycle and chip input (`creation`, `chips`)
//! - Lab detail export to file and clipboard (`export`)
//!
//! Front-ends drive the controllers from their event loop and call their
//! `sync` methods to pick up results of background requests. All background
//! work runs on the ambient Tokio runtime.

pub mod chips;
pub mod creation;
pub mod domain_list;
pub mod error;
pub mod export;
pub mod gateway;
pub mod scheduler;
pub mod status;
pub mod traits;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use chips::ChipInput;
pub use creation::{
    CloneSource, CreationDialog, CreationForm, Field, FormOptions, FormValues, TextField,
    ValidationResult,
};
pub use domain_list::{DomainListController, DomainRow, Pagination, Sort, SortColumn, SortDirection};
pub use error::{CoreError, CoreResult};
pub use export::{CopyFeedback, ExportService};
pub use gateway::DashboardGateway;
pub use status::{InstanceStatus, StatusChannel, StatusKind};
pub use traits::Clipboard;
