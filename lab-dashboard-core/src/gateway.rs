//! Data access gateway
//!
//! Wraps the [`LabApi`] client and republishes results on broadcast channels.
//! Every failure is logged here and then swallowed; callers only learn whether
//! an operation succeeded. The creation status is the one exception: a failed
//! write moves it to `ERROR` with the server's message.

use std::sync::Arc;

use lab_dashboard_client::{ApiError, DeleteDomainRequest, Domain, Lab, LabApi, NewDomainRequest};
use tokio::sync::broadcast;

use crate::status::{InstanceStatus, StatusChannel};

const DOMAIN_CHANNEL_CAPACITY: usize = 16;
const OPTIONS_CHANNEL_CAPACITY: usize = 4;

/// Log an API failure at `warn` for 4xx and `error` otherwise.
fn log_api_error(operation: &str, error: &ApiError) {
    match error.status() {
        0 => log::error!("{operation}: an error occurred: {error}"),
        status if error.is_expected() => {
            log::warn!("{operation}: backend returned code {status}, body was: {}", error.message());
        }
        status => {
            log::error!("{operation}: backend returned code {status}, body was: {}", error.message());
        }
    }
}

/// Shared by `Arc` between the dashboard's controllers.
pub struct DashboardGateway {
    api: Arc<dyn LabApi>,
    domains: broadcast::Sender<Vec<Domain>>,
    status: StatusChannel,
    vulnerable_apis: broadcast::Sender<Vec<String>>,
    instance_types: broadcast::Sender<Vec<String>>,
}

impl DashboardGateway {
    #[must_use]
    pub fn new(api: Arc<dyn LabApi>) -> Self {
        let (domains, _) = broadcast::channel(DOMAIN_CHANNEL_CAPACITY);
        let (vulnerable_apis, _) = broadcast::channel(OPTIONS_CHANNEL_CAPACITY);
        let (instance_types, _) = broadcast::channel(OPTIONS_CHANNEL_CAPACITY);
        Self {
            api,
            domains,
            status: StatusChannel::new(),
            vulnerable_apis,
            instance_types,
        }
    }

    // ===== Subscriptions =====

    #[must_use]
    pub fn subscribe_domains(&self) -> broadcast::Receiver<Vec<Domain>> {
        self.domains.subscribe()
    }

    #[must_use]
    pub fn subscribe_vulnerable_apis(&self) -> broadcast::Receiver<Vec<String>> {
        self.vulnerable_apis.subscribe()
    }

    #[must_use]
    pub fn subscribe_instance_types(&self) -> broadcast::Receiver<Vec<String>> {
        self.instance_types.subscribe()
    }

    /// The creation status publish point.
    #[must_use]
    pub fn status(&self) -> &StatusChannel {
        &self.status
    }

    #[must_use]
    pub fn current_status(&self) -> InstanceStatus {
        self.status.current()
    }

    // ===== Operations =====

    /// Fetch all domains and publish them sorted by creation date (stable).
    ///
    /// Returns `false` when the fetch failed; nothing is published then.
    pub async fn list_domains(&self) -> bool {
        match self.api.list_domains().await {
            Ok(mut domains) => {
                domains.sort_by_key(|d| d.creation_date);
                log::debug!("Publishing {} domains", domains.len());
                let _ = self.domains.send(domains);
                true
            }
            Err(e) => {
                log_api_error("list domains", &e);
                false
            }
        }
    }

    /// Submit a creation request.
    ///
    /// Moves the status to `LOADING` first and refuses (without a request)
    /// when the status is not `FORM`. A failure moves it to `ERROR` unless the
    /// dialog was reset meanwhile. Success leaves it in `LOADING` and returns
    /// the submission number the caller settles it with.
    pub async fn create_domain(&self, request: &NewDomainRequest) -> Option<u64> {
        let submission = match self.status.begin_submission() {
            Ok(submission) => submission,
            Err(e) => {
                log::warn!("Not submitting '{}': {e}", request.domain_name);
                return None;
            }
        };

        log::info!(
            "Creating domain '{}' ({} x {}, {} days)",
            request.domain_name,
            request.amount,
            request.instance_type,
            request.ttl_in_days
        );
        match self.api.create_domain(request).await {
            Ok(_) => Some(submission),
            Err(e) => {
                log_api_error("create domain", &e);
                let _ = self.status.fail(submission, e.message());
                None
            }
        }
    }

    /// Delete by `{domain_name, owner}`. The local list is not touched.
    pub async fn delete_domain(&self, domain: &Domain) -> bool {
        log::info!("Deleting domain '{}'", domain.domain_name);
        match self.api.delete_domain(&DeleteDomainRequest::from(domain)).await {
            Ok(()) => true,
            Err(e) => {
                log_api_error("delete domain", &e);
                false
            }
        }
    }

    /// Fetch one lab's credentials; `None` after logging on failure.
    pub async fn get_lab(&self, lab_name: &str) -> Option<Lab> {
        match self.api.get_lab(lab_name).await {
            Ok(lab) => Some(lab),
            Err(e) => {
                log_api_error(&format!("get lab '{lab_name}'"), &e);
                None
            }
        }
    }

    /// Fetch form options and publish both lists independently.
    pub async fn get_options(&self) -> bool {
        match self.api.get_options().await {
            Ok(options) => {
                let _ = self.vulnerable_apis.send(options.vulnerable_apis);
                let _ = self.instance_types.send(options.instance_types);
                true
            }
            Err(e) => {
                log_api_error("get options", &e);
                false
            }
        }
    }
}
