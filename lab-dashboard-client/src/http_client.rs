//! Shared HTTP plumbing
//!
//! Every endpoint of [`HttpLabApi`](crate::HttpLabApi) goes through
//! [`HttpUtils::execute_request`], which sends the request, logs it, and turns
//! non-2xx responses into [`ApiError::Server`]. Requests are sent exactly once:
//! there is no retry, no backoff and no request timeout.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, Result};
use crate::utils::log_sanitizer::BodyLog;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Sends a request and returns `(status, body)` for 2xx responses.
    ///
    /// `body_log` decides how much of the response body the debug log sees.
    ///
    /// # Errors
    /// * [`ApiError::Transport`] when no response was received or the body
    ///   could not be read
    /// * [`ApiError::Server`] for any non-2xx status
    pub async fn execute_request(
        request_builder: RequestBuilder,
        method_name: &str,
        path: &str,
        body_log: BodyLog,
    ) -> Result<(u16, String)> {
        log::debug!("{method_name} {path}");

        let response = request_builder.send().await.map_err(|e| {
            log::error!("An error occurred: {e}");
            ApiError::Transport {
                detail: e.to_string(),
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("{method_name} {path} -> HTTP {status_code}");

        let response_text = response.text().await.map_err(|e| ApiError::Transport {
            detail: format!("Failed to read response body: {e}"),
        })?;

        if log::log_enabled!(log::Level::Debug) {
            log::debug!("Response Body: {}", body_log.render(&response_text));
        }

        if !(200..300).contains(&status_code) {
            let err = ApiError::Server {
                status: status_code,
                body: response_text,
            };
            if err.is_expected() {
                log::warn!("Backend returned code {status_code} for {method_name} {path}");
            } else {
                log::error!("Backend returned code {status_code} for {method_name} {path}");
            }
            return Err(err);
        }

        Ok((status_code, response_text))
    }

    /// Parse a JSON response body.
    ///
    /// # Errors
    /// [`ApiError::ParseError`] naming `endpoint` when the body does not match `T`.
    pub fn parse_json<T>(response_text: &str, endpoint: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{endpoint}] JSON parse failed: {e}");
            ApiError::ParseError {
                endpoint: endpoint.to_string(),
                detail: e.to_string(),
            }
        })
    }
}
