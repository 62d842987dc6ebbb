//! Test helpers: a canned lab API and an `App` built on it.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use lab_dashboard_client::{
    ApiError, AwsConsoleLogin, DeleteDomainRequest, Domain, InstanceType, Lab, LabApi, LabInfo,
    LabOptions, NewDomainRequest, Result as ApiResult, SaltLoginDetails, VulnerableApplication,
};
use lab_dashboard_core::{Clipboard, CoreResult};

use crate::backend::{CoreService, DashboardConfig};
use crate::model::App;

#[derive(Default)]
pub struct StubLabApi {
    pub domains: Mutex<Vec<Domain>>,
    pub create_error: Mutex<Option<ApiError>>,
    pub created: Mutex<Vec<NewDomainRequest>>,
    pub deleted: Mutex<Vec<DeleteDomainRequest>>,
}

#[async_trait]
impl LabApi for StubLabApi {
    async fn list_domains(&self) -> ApiResult<Vec<Domain>> {
        Ok(self.domains.lock().unwrap().clone())
    }

    async fn create_domain(&self, request: &NewDomainRequest) -> ApiResult<String> {
        self.created.lock().unwrap().push(request.clone());
        match self.create_error.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(String::new()),
        }
    }

    async fn delete_domain(&self, request: &DeleteDomainRequest) -> ApiResult<()> {
        self.deleted.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn get_lab(&self, _lab_name: &str) -> ApiResult<Lab> {
        Ok(sample_lab())
    }

    async fn get_options(&self) -> ApiResult<LabOptions> {
        Ok(LabOptions {
            vulnerable_apis: vec!["Hackazon".into(), "Crapi".into(), "Juice Shop".into()],
            instance_types: vec!["Detection".into(), "Discovery".into()],
        })
    }
}

#[derive(Default)]
pub struct MemoryClipboard {
    pub contents: Mutex<Option<String>>,
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> CoreResult<()> {
        *self.contents.lock().unwrap() = Some(text.to_string());
        Ok(())
    }
}

pub fn domain(name: &str, day: u32, labs: &[&str]) -> Domain {
    let created = Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap();
    Domain {
        domain_name: name.to_string(),
        owner: "alice".to_string(),
        instance_type: InstanceType::Detection,
        amount: 1,
        creation_date: created,
        expiration_date: Utc::now() + Duration::days(3),
        vulnerable_applications: vec!["Crapi".to_string()],
        labs: labs
            .iter()
            .enumerate()
            .map(|(i, lab)| LabInfo {
                id: i.to_string(),
                name: (*lab).to_string(),
            })
            .collect(),
    }
}

pub fn sample_lab() -> Lab {
    Lab {
        vulnerable_applications: vec![VulnerableApplication {
            name: "Crapi".into(),
            url: "http://crapi.lab".into(),
        }],
        salt_login_details: SaltLoginDetails {
            username: "salt-user".into(),
            password: "salt-pass".into(),
        },
        aws_console_login: AwsConsoleLogin {
            url: "https://aws.lab/console".into(),
            username: "aws-user".into(),
            password: "aws-pass".into(),
        },
        traffic_generator_url: None,
        generation_time: None,
        verification_time: None,
    }
}

pub fn test_config(download_dir: &Path) -> DashboardConfig {
    DashboardConfig {
        api_url: "http://localhost:8080".into(),
        auth_token: None,
        owner: "alice".into(),
        download_dir: download_dir.to_path_buf(),
        page_size: 10,
    }
}

pub fn test_app_in(download_dir: &Path) -> (Arc<StubLabApi>, Arc<MemoryClipboard>, App) {
    let api = Arc::new(StubLabApi::default());
    let clipboard = Arc::new(MemoryClipboard::default());
    let backend = CoreService::with_api(
        Arc::clone(&api) as Arc<dyn LabApi>,
        &test_config(download_dir),
        Arc::clone(&clipboard) as Arc<dyn Clipboard>,
    );
    (api, clipboard, App::new(backend))
}

pub fn test_app() -> (Arc<StubLabApi>, App) {
    let (api, _, app) = test_app_in(Path::new("."));
    (api, app)
}

/// Let spawned background tasks run to completion.
pub async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}
