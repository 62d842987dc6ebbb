use serde::{Deserialize, Serialize};

/// Unified error type for every call against the lab management API.
///
/// The variants follow the two failure families the dashboard distinguishes:
/// transport failures (no HTTP status, reported as status `0`) and server
/// failures (a non-2xx status with an optional body). Two bookkeeping variants
/// cover bodies that cannot be decoded and endpoints that cannot be built.
///
/// None of these errors are retried. Callers either surface the message once
/// or log it and move on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS failure, refused
    /// connection, TLS error, body read failure).
    Transport {
        /// Error details.
        detail: String,
    },

    /// The server answered with a non-2xx status.
    Server {
        /// HTTP status code.
        status: u16,
        /// Raw response body, possibly empty.
        body: String,
    },

    /// A 2xx response body could not be decoded into the expected type.
    ParseError {
        /// Endpoint that produced the body.
        endpoint: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// The configured base URL cannot be used to build request URLs.
    InvalidEndpoint {
        /// The offending URL.
        url: String,
        /// Why it was rejected.
        detail: String,
    },
}

/// Error body shape some endpoints use for failures.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    /// HTTP status of the failure; `0` when no response was received.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Self::Server { status, .. } => *status,
            _ => 0,
        }
    }

    /// Best-effort human readable message.
    ///
    /// For server errors the body is parsed as JSON first: an `{"error": ...}`
    /// object or a bare JSON string yields its text. Anything else falls back
    /// to the raw body, and an empty body to the status line.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Server { status, body } => {
                if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
                    return parsed.error;
                }
                if let Ok(text) = serde_json::from_str::<String>(body) {
                    return text;
                }
                if body.trim().is_empty() {
                    format!("HTTP {status}")
                } else {
                    body.clone()
                }
            }
            Self::Transport { detail }
            | Self::ParseError { detail, .. }
            | Self::InvalidEndpoint { detail, .. } => detail.clone(),
        }
    }

    /// Whether the failure is an expected outcome (client-side 4xx), used for
    /// log levels: `warn` when `true`, `error` otherwise.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::Server { status, .. } if (400..500).contains(status))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport { detail } => write!(f, "Network error: {detail}"),
            Self::Server { status, body } => {
                if body.is_empty() {
                    write!(f, "Server returned HTTP {status}")
                } else {
                    write!(f, "Server returned HTTP {status}: {}", self.message())
                }
            }
            Self::ParseError { endpoint, detail } => {
                write!(f, "Unexpected response from {endpoint}: {detail}")
            }
            Self::InvalidEndpoint { url, detail } => {
                write!(f, "Invalid API endpoint '{url}': {detail}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Convenience type alias for `Result<T, ApiError>`.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn server(status: u16, body: &str) -> ApiError {
        ApiError::Server {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn message_from_json_error_object() {
        let e = server(400, r#"{"error":"duplicate name"}"#);
        assert_eq!(e.message(), "duplicate name");
    }

    #[test]
    fn message_from_json_string() {
        let e = server(409, r#""already exists""#);
        assert_eq!(e.message(), "already exists");
    }

    #[test]
    fn message_falls_back_to_raw_body() {
        let e = server(500, "internal failure");
        assert_eq!(e.message(), "internal failure");
    }

    #[test]
    fn message_keeps_raw_json_without_error_field() {
        let e = server(422, r#"{"detail":"nope"}"#);
        assert_eq!(e.message(), r#"{"detail":"nope"}"#);
    }

    #[test]
    fn message_for_empty_body() {
        let e = server(503, "  ");
        assert_eq!(e.message(), "HTTP 503");
    }

    #[test]
    fn transport_status_is_zero() {
        let e = ApiError::Transport {
            detail: "connection refused".to_string(),
        };
        assert_eq!(e.status(), 0);
        assert_eq!(e.message(), "connection refused");
        assert_eq!(e.to_string(), "Network error: connection refused");
    }

    #[test]
    fn display_server_error() {
        assert_eq!(
            server(400, r#"{"error":"bad amount"}"#).to_string(),
            "Server returned HTTP 400: bad amount"
        );
        assert_eq!(server(404, "").to_string(), "Server returned HTTP 404");
    }

    #[test]
    fn display_parse_error() {
        let e = ApiError::ParseError {
            endpoint: "/domains".to_string(),
            detail: "expected array".to_string(),
        };
        assert_eq!(e.to_string(), "Unexpected response from /domains: expected array");
    }

    #[test]
    fn expected_only_for_client_errors() {
        assert!(server(400, "").is_expected());
        assert!(server(404, "").is_expected());
        assert!(!server(500, "").is_expected());
        assert!(
            !ApiError::Transport {
                detail: "x".into()
            }
            .is_expected()
        );
    }

    #[test]
    fn serializes_with_code_tag() {
        let json = serde_json::to_string(&server(400, "x")).unwrap();
        assert!(json.contains("\"code\":\"Server\""));
        assert!(json.contains("\"status\":400"));
    }
}
