//! # lab-dashboard-client
//!
//! Typed client for the lab management API used by the lab dashboard.
//!
//! ## Endpoints
//!
//! | Method | Path | Returns |
//! |--------|------|---------|
//! | `GET` | `/domains` | [`Vec<Domain>`](Domain) |
//! | `POST` | `/domains` | plain-text body |
//! | `DELETE` | `/domains` | nothing |
//! | `GET` | `/lab?labName=` | [`Lab`] |
//! | `GET` | `/options` | [`LabOptions`] |
//!
//! Every request carries `Authorization: Bearer <token>` when a token is
//! configured.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lab_dashboard_client::{HttpLabApi, LabApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = HttpLabApi::new("http://localhost:8080", Some("token".into()))?;
//!     for domain in api.list_domains().await? {
//!         println!("{} ({}) expires {}", domain.domain_name, domain.instance_type, domain.expiration_date);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ApiError>`](ApiError). Nothing is retried:
//!
//! - [`ApiError::Transport`]: no response (status `0`)
//! - [`ApiError::Server`]: non-2xx; [`ApiError::message`] extracts the
//!   server's `{"error": ...}` text when present

mod client;
mod error;
mod http_client;
mod traits;
mod types;
mod utils;

pub use client::HttpLabApi;
pub use error::{ApiError, Result};
pub use traits::LabApi;
pub use types::{
    AwsConsoleLogin, DeleteDomainRequest, Domain, InstanceType, Lab, LabInfo, LabOptions,
    NewDomainRequest, SaltLoginDetails, VulnerableApplication, MAX_AMOUNT,
};
pub use utils::datetime;
