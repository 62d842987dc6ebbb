//! Dashboard configuration

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lab_dashboard_client::HttpLabApi;
use lab_dashboard_core::Pagination;
use lab_dashboard_core::domain_list::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};

/// Directory name under the platform config dir.
pub const APP_DIR: &str = "lab-dashboard";
const CONFIG_FILE: &str = "config.json";

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_OWNER: &str = "operator";

/// Path of a config file to use instead of the default location.
pub const ENV_CONFIG: &str = "LAB_DASHBOARD_CONFIG";
pub const ENV_API_URL: &str = "LAB_DASHBOARD_API_URL";
pub const ENV_TOKEN: &str = "LAB_DASHBOARD_TOKEN";
pub const ENV_OWNER: &str = "LAB_DASHBOARD_OWNER";
pub const ENV_DOWNLOAD_DIR: &str = "LAB_DASHBOARD_DOWNLOAD_DIR";

/// Application config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Base URL of the lab management API
    pub api_url: String,
    /// Bearer token sent with every request
    pub auth_token: Option<String>,
    /// Operator identity recorded on created instances
    pub owner: String,
    /// Where exported lab details are written
    pub download_dir: PathBuf,
    pub page_size: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            auth_token: None,
            owner: non_blank(std::env::var("USER").ok())
                .unwrap_or_else(|| DEFAULT_OWNER.to_string()),
            download_dir: dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl DashboardConfig {
    /// Override fields from environment variables, looked up through `var`.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = non_blank(var(ENV_API_URL)) {
            self.api_url = url;
        }
        if let Some(token) = non_blank(var(ENV_TOKEN)) {
            self.auth_token = Some(token);
        }
        if let Some(owner) = non_blank(var(ENV_OWNER)) {
            self.owner = owner;
        }
        if let Some(dir) = non_blank(var(ENV_DOWNLOAD_DIR)) {
            self.download_dir = PathBuf::from(dir);
        }
    }

    /// Reject settings the dashboard cannot start with.
    pub fn validate(&self) -> Result<()> {
        HttpLabApi::new(&self.api_url, None)
            .with_context(|| format!("invalid api_url '{}'", self.api_url))?;
        Pagination::new(self.page_size).context("invalid page_size")?;
        anyhow::ensure!(!self.owner.trim().is_empty(), "owner must not be empty");
        Ok(())
    }
}

/// Config service trait
pub trait ConfigService: Send + Sync {
    /// Load, apply overrides and validate.
    fn load(&self) -> Result<DashboardConfig>;
}

/// Reads `<config dir>/lab-dashboard/config.json` and the process environment.
pub struct LocalConfigService {
    path: Option<PathBuf>,
}

impl LocalConfigService {
    pub fn new() -> Self {
        Self {
            path: dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE)),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// `$LAB_DASHBOARD_CONFIG` if set, the default location otherwise.
    pub fn from_env() -> Self {
        std::env::var_os(ENV_CONFIG).map_or_else(Self::new, Self::with_path)
    }

    fn read_file(path: &Path) -> Result<Option<DashboardConfig>> {
        if !path.exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("cannot parse {}", path.display()))?;
        Ok(Some(config))
    }

    /// Same as [`ConfigService::load`] with an explicit variable lookup.
    pub fn load_with(&self, var: impl Fn(&str) -> Option<String>) -> Result<DashboardConfig> {
        let mut config = match &self.path {
            Some(path) => Self::read_file(path)?.unwrap_or_default(),
            None => DashboardConfig::default(),
        };
        config.apply_env(var);
        config.validate()?;
        log::info!(
            "Configuration loaded: api_url={}, owner={}, download_dir={}",
            config.api_url,
            config.owner,
            config.download_dir.display()
        );
        Ok(config)
    }
}

impl Default for LocalConfigService {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigService for LocalConfigService {
    fn load(&self) -> Result<DashboardConfig> {
        self.load_with(|name| std::env::var(name).ok())
    }
}
