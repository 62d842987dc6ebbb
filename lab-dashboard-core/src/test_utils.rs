//! Test helpers
//!
//! Recording mock of the lab API, an in-memory clipboard and fixtures.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lab_dashboard_client::{
    ApiError, AwsConsoleLogin, DeleteDomainRequest, Domain, InstanceType, Lab, LabApi, LabInfo,
    LabOptions, NewDomainRequest, Result as ApiResult, SaltLoginDetails, VulnerableApplication,
};
use tokio::sync::{Notify, RwLock};

use crate::error::{CoreError, CoreResult};
use crate::traits::Clipboard;

// ===== MockLabApi =====

pub struct MockLabApi {
    domains: RwLock<Vec<Domain>>,
    labs: RwLock<HashMap<String, Lab>>,
    options: RwLock<LabOptions>,
    /// If Some, the next call of any kind fails with this error.
    next_error: RwLock<Option<ApiError>>,
    /// If Some, `create_domain` waits for a notification before answering.
    create_gate: RwLock<Option<Arc<Notify>>>,
    created: RwLock<Vec<NewDomainRequest>>,
    deleted: RwLock<Vec<DeleteDomainRequest>>,
    lab_requests: RwLock<Vec<String>>,
    list_calls: RwLock<usize>,
}

impl MockLabApi {
    pub fn new() -> Self {
        Self {
            domains: RwLock::new(Vec::new()),
            labs: RwLock::new(HashMap::new()),
            options: RwLock::new(LabOptions::default()),
            next_error: RwLock::new(None),
            create_gate: RwLock::new(None),
            created: RwLock::new(Vec::new()),
            deleted: RwLock::new(Vec::new()),
            lab_requests: RwLock::new(Vec::new()),
            list_calls: RwLock::new(0),
        }
    }

    pub async fn set_domains(&self, domains: Vec<Domain>) {
        *self.domains.write().await = domains;
    }

    pub async fn set_lab(&self, name: &str, lab: Lab) {
        self.labs.write().await.insert(name.to_string(), lab);
    }

    pub async fn set_options(&self, options: LabOptions) {
        *self.options.write().await = options;
    }

    pub async fn fail_next_with(&self, error: ApiError) {
        *self.next_error.write().await = Some(error);
    }

    /// Make `create_domain` block until the returned `Notify` fires.
    pub async fn hold_create(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.create_gate.write().await = Some(Arc::clone(&gate));
        gate
    }

    pub async fn created(&self) -> Vec<NewDomainRequest> {
        self.created.read().await.clone()
    }

    pub async fn deleted(&self) -> Vec<DeleteDomainRequest> {
        self.deleted.read().await.clone()
    }

    pub async fn lab_requests(&self) -> Vec<String> {
        self.lab_requests.read().await.clone()
    }

    pub async fn list_calls(&self) -> usize {
        *self.list_calls.read().await
    }

    async fn take_error(&self) -> ApiResult<()> {
        match self.next_error.write().await.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl LabApi for MockLabApi {
    async fn list_domains(&self) -> ApiResult<Vec<Domain>> {
        *self.list_calls.write().await += 1;
        self.take_error().await?;
        Ok(self.domains.read().await.clone())
    }

    async fn create_domain(&self, request: &NewDomainRequest) -> ApiResult<String> {
        self.created.write().await.push(request.clone());
        let gate = self.create_gate.read().await.clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.take_error().await?;
        Ok(String::new())
    }

    async fn delete_domain(&self, request: &DeleteDomainRequest) -> ApiResult<()> {
        self.deleted.write().await.push(request.clone());
        self.take_error().await
    }

    async fn get_lab(&self, lab_name: &str) -> ApiResult<Lab> {
        self.lab_requests.write().await.push(lab_name.to_string());
        self.take_error().await?;
        self.labs
            .read()
            .await
            .get(lab_name)
            .cloned()
            .ok_or_else(|| ApiError::Server {
                status: 404,
                body: format!(r#"{{"error":"lab {lab_name} not found"}}"#),
            })
    }

    async fn get_options(&self) -> ApiResult<LabOptions> {
        self.take_error().await?;
        Ok(self.options.read().await.clone())
    }
}

// ===== MemoryClipboard =====

#[derive(Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
    fail: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            contents: Mutex::new(None),
            fail: true,
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().unwrap().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> CoreResult<()> {
        if self.fail {
            return Err(CoreError::Clipboard("clipboard unavailable".into()));
        }
        *self.contents.lock().unwrap() = Some(text.to_string());
        Ok(())
    }
}

// ===== Fixtures =====

pub fn domain(name: &str, created: DateTime<Utc>, expires: DateTime<Utc>) -> Domain {
    Domain {
        domain_name: name.to_string(),
        owner: "alice".to_string(),
        instance_type: InstanceType::Discovery,
        amount: 1,
        creation_date: created,
        expiration_date: expires,
        vulnerable_applications: Vec::new(),
        labs: vec![LabInfo {
            id: format!("{name}-id"),
            name: format!("{name}-1"),
        }],
    }
}

pub fn new_request(name: &str) -> NewDomainRequest {
    NewDomainRequest {
        domain_name: name.to_string(),
        amount: 1,
        instance_type: "Discovery".to_string(),
        vulnerable_applications: Vec::new(),
        ttl_in_days: 30,
        owner: "alice".to_string(),
    }
}

pub fn sample_lab() -> Lab {
    Lab {
        vulnerable_applications: vec![
            VulnerableApplication {
                name: "Hackazon".into(),
                url: "http://hackazon.lab".into(),
            },
            VulnerableApplication {
                name: "Crapi".into(),
                url: "http://crapi.lab".into(),
            },
        ],
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
