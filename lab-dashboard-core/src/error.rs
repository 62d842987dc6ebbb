//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

use crate::status::StatusKind;

// Re-export library error type
pub use lab_dashboard_client::ApiError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Lab management API error (converting from library)
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Status change not allowed from the current status
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: StatusKind, to: StatusKind },

    /// Completion of a submission that was reset before it finished
    #[error("Stale submission {submission} (current session {current})")]
    StaleSubmission { submission: u64, current: u64 },

    /// Form or request validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Export file could not be written
    #[error("Export error: {0}")]
    Export(String),

    /// Clipboard write failed
    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

impl CoreError {
    /// Whether it is expected behavior (user input, rejected request), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Validation(_) | Self::InvalidTransition { .. } | Self::StaleSubmission { .. } => {
                true
            }
            Self::Api(e) => e.is_expected(),
            Self::Export(_) | Self::Clipboard(_) => false,
        }
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
