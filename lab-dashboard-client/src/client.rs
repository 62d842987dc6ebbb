//! HTTP implementation of [`LabApi`]

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};

use crate::error::{ApiError, Result};
use crate::http_client::HttpUtils;
use crate::traits::LabApi;
use crate::types::{DeleteDomainRequest, Domain, Lab, LabOptions, NewDomainRequest};
use crate::utils::log_sanitizer::BodyLog;

const DOMAINS_PATH: &str = "/domains";
const LAB_PATH: &str = "/lab";
const OPTIONS_PATH: &str = "/options";

/// REST client for the lab management API.
pub struct HttpLabApi {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl HttpLabApi {
    /// Build a client for `base_url`; `auth_token` is sent as a bearer token
    /// on every request when present.
    ///
    /// # Errors
    /// * [`ApiError::InvalidEndpoint`] when `base_url` is not an absolute
    ///   http(s) URL
    /// * [`ApiError::Transport`] when the HTTP client cannot be initialised
    pub fn new(base_url: &str, auth_token: Option<String>) -> Result<Self> {
        let parsed = Url::parse(base_url).map_err(|e| ApiError::InvalidEndpoint {
            url: base_url.to_string(),
            detail: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidEndpoint {
                url: base_url.to_string(),
                detail: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let client = Client::builder().build().map_err(|e| ApiError::Transport {
            detail: format!("Failed to create HTTP client: {e}"),
        })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: auth_token.filter(|t| !t.trim().is_empty()),
        })
    }

    /// Base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Attach the bearer token, if one is configured.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl LabApi for HttpLabApi {
    async fn list_domains(&self) -> Result<Vec<Domain>> {
        let request = self.authorize(self.client.get(self.url(DOMAINS_PATH)));
        let (_, body) = HttpUtils::execute_request(
            request,
            "GET",
            DOMAINS_PATH,
            BodyLog::Truncated,
        )
        .await?;
        HttpUtils::parse_json(&body, DOMAINS_PATH)
    }

    async fn create_domain(&self, request: &NewDomainRequest) -> Result<String> {
        let builder = self.authorize(self.client.post(self.url(DOMAINS_PATH)).json(request));
        let (_, body) = HttpUtils::execute_request(
            builder,
            "POST",
            DOMAINS_PATH,
            BodyLog::Truncated,
        )
        .await?;
        Ok(body)
    }

    async fn delete_domain(&self, request: &DeleteDomainRequest) -> Result<()> {
        let builder = self.authorize(self.client.delete(self.url(DOMAINS_PATH)).json(request));
        HttpUtils::execute_request(
            builder,
            "DELETE",
            DOMAINS_PATH,
            BodyLog::Truncated,
        )
        .await?;
        Ok(())
    }

    async fn get_lab(&self, lab_name: &str) -> Result<Lab> {
        let path = format!("{LAB_PATH}?labName={}", urlencoding::encode(lab_name));
        let request = self.authorize(self.client.get(self.url(&path)));
        let (_, body) = HttpUtils::execute_request(
            request,
            "GET",
            &path,
            BodyLog::Masked,
        )
        .await?;
        HttpUtils::parse_json(&body, LAB_PATH)
    }

    async fn get_options(&self) -> Result<LabOptions> {
        let request = self.authorize(self.client.get(self.url(OPTIONS_PATH)));
        let (_, body) = HttpUtils::execute_request(
            request,
            "GET",
            OPTIONS_PATH,
            BodyLog::Truncated,
        )
        .await?;
        HttpUtils::parse_json(&body, OPTIONS_PATH)
    }
}
