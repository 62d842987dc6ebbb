use async_trait::async_trait;

use crate::error::Result;
use crate::types::{DeleteDomainRequest, Domain, Lab, LabOptions, NewDomainRequest};

/// Lab management API
///
/// Implemented over HTTP by [`HttpLabApi`](crate::HttpLabApi); the dashboard
/// core only depends on this trait so tests can substitute a mock.
#[async_trait]
pub trait LabApi: Send + Sync {
    /// `GET /domains`: every domain, in server order.
    async fn list_domains(&self) -> Result<Vec<Domain>>;

    /// `POST /domains`: returns the (possibly empty) plain-text body.
    async fn create_domain(&self, request: &NewDomainRequest) -> Result<String>;

    /// `DELETE /domains`, keyed by domain name and owner.
    async fn delete_domain(&self, request: &DeleteDomainRequest) -> Result<()>;

    /// `GET /lab?labName=`: credential bundle of one lab.
    async fn get_lab(&self, lab_name: &str) -> Result<Lab>;

    /// `GET /options`: choices for the creation form.
    async fn get_options(&self) -> Result<LabOptions>;
}
