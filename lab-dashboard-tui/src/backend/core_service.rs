//! Core service
//!
//! Wires the lab API client, the dashboard gateway and the export service
//! together for the UI layer.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use lab_dashboard_client::{HttpLabApi, Lab, LabApi};
use lab_dashboard_core::{
    Clipboard, CopyFeedback, CoreResult, CreationDialog, DashboardGateway, DomainListController,
    ExportService, FormOptions, Pagination,
};

use super::clipboard::Osc52Clipboard;
use super::config_service::DashboardConfig;

/// Holds every service the UI calls into.
pub struct CoreService {
    gateway: Arc<DashboardGateway>,
    export: ExportService,
    clipboard: Arc<dyn Clipboard>,
    owner: String,
    page_size: usize,
}

impl CoreService {
    /// Build the HTTP client from `config`.
    pub fn new(config: &DashboardConfig) -> Result<Self> {
        let api = HttpLabApi::new(&config.api_url, config.auth_token.clone())
            .context("cannot create the lab API client")?;
        log::info!("Using lab API at {}", api.base_url());
        Ok(Self::with_api(
            Arc::new(api),
            config,
            Arc::new(Osc52Clipboard::stdout()),
        ))
    }

    pub fn with_api(
        api: Arc<dyn LabApi>,
        config: &DashboardConfig,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        Self {
            gateway: Arc::new(DashboardGateway::new(api)),
            export: ExportService::new(config.download_dir.clone()),
            clipboard,
            owner: config.owner.clone(),
            page_size: config.page_size,
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn domain_list(&self) -> DomainListController {
        let pagination = Pagination::new(self.page_size).unwrap_or_default();
        DomainListController::new(Arc::clone(&self.gateway), pagination)
    }

    pub fn creation_dialog(&self) -> CreationDialog {
        CreationDialog::new(Arc::clone(&self.gateway), self.owner.clone())
    }

    pub fn form_options(&self) -> FormOptions {
        FormOptions::new(&self.gateway)
    }

    /// Fetch the form options in the background.
    pub fn load_options(&self) {
        let gateway = Arc::clone(&self.gateway);
        tokio::spawn(async move {
            gateway.get_options().await;
        });
    }

    pub fn download(&self, lab: &Lab, lab_name: &str) -> CoreResult<PathBuf> {
        self.export.download(lab, lab_name)
    }

    pub fn copy(&self, lab: &Lab) -> CoreResult<CopyFeedback> {
        self.export.copy(lab, self.clipboard.as_ref())
    }
}
