//! Shared test helpers: a local lab management API on an ephemeral port.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Json;
use axum::Router;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::routing::get;
use serde_json::{Value, json};

/// Assert that a `Result` is `Ok` and unwrap it (fails the test otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// One request as seen by the server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub query: HashMap<String, String>,
    pub body: Option<Value>,
}

/// Canned response for one route.
#[derive(Debug, Clone)]
pub struct Canned {
    pub status: StatusCode,
    pub body: String,
}

impl Canned {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.into(),
        }
    }

    pub fn json(value: &Value) -> Self {
        Self::ok(value.to_string())
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body: body.into(),
        }
    }
}

#[derive(Clone, Default)]
struct ServerState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responses: Arc<Mutex<HashMap<(Method, &'static str), Canned>>>,
}

impl ServerState {
    fn handle(
        &self,
        method: Method,
        path: &'static str,
        headers: &HeaderMap,
        query: HashMap<String, String>,
        body: &str,
    ) -> (StatusCode, String) {
        let authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = if body.is_empty() {
            None
        } else {
            serde_json::from_str(body).ok()
        };
        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.clone(),
            path: path.to_string(),
            authorization,
            query,
            body,
        });
        let canned = self
            .responses
            .lock()
            .unwrap()
            .get(&(method, path))
            .cloned()
            .unwrap_or_else(|| Canned::status(404, ""));
        (canned.status, canned.body)
    }
}

async fn domains_get(State(state): State<ServerState>, headers: HeaderMap) -> (StatusCode, String) {
    state.handle(Method::GET, "/domains", &headers, HashMap::new(), "")
}

async fn domains_post(
    State(state): State<ServerState>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    state.handle(Method::POST, "/domains", &headers, HashMap::new(), &body)
}

async fn domains_delete(
    State(state): State<ServerState>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    state.handle(Method::DELETE, "/domains", &headers, HashMap::new(), &body)
}

async fn lab_get(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    state.handle(Method::GET, "/lab", &headers, query, "")
}

async fn options_get(State(state): State<ServerState>, headers: HeaderMap) -> (StatusCode, String) {
    state.handle(Method::GET, "/options", &headers, HashMap::new(), "")
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

/// A running local API.
pub struct TestServer {
    pub base_url: String,
    state: ServerState,
}

impl TestServer {
    /// Bind `127.0.0.1:0` and serve in the background.
    pub async fn start() -> Self {
        let state = ServerState::default();
        let app = Router::new()
            .route(
                "/domains",
                get(domains_get).post(domains_post).delete(domains_delete),
            )
            .route("/lab", get(lab_get))
            .route("/options", get(options_get))
            .route("/health", get(health))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// Set the response for `method path`.
    pub fn respond(&self, method: Method, path: &'static str, canned: Canned) {
        self.state
            .responses
            .lock()
            .unwrap()
            .insert((method, path), canned);
    }

    /// Everything received so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

pub fn sample_domains() -> Value {
    json!([
        {
            "domain_name": "beta",
            "owner": "bob",
            "type": "Discovery",
            "amount": 1,
            "creation_date": "2024-02-01T00:00:00Z",
            "expiration_date": "2024-03-01T00:00:00Z",
            "vulnerable_applications": [],
            "labs": [{"id": "b1", "name": "beta-1"}]
        },
        {
            "domain_name": "alpha",
            "owner": "alice",
            "type": "Detection",
            "amount": 2,
            "creation_date": "2024-01-01T00:00:00Z",
            "expiration_date": "2024-03-01",
            "learned_apis": ["Hackazon"],
            "labs": [{"id": "a1", "name": "alpha-1"}, {"id": "a2", "name": "alpha-2"}]
        }
    ])
}

pub fn sample_lab() -> Value {
    json!({
        "vulnerable_applications": [
            {"name": "Hackazon", "url": "http://hackazon.lab"},
            {"name": "Crapi", "url": "http://crapi.lab"}
        ],
        "salt_login_details": {"username": "salt", "password": "salt-pass"},
        "aws_console_login": {"url": "https://aws.lab", "username": "aws", "password": "aws-pass"},
        "traffic_generator_url": "http://traffic.lab",
        "generation_time": "2024-01-01T10:00:00Z"
    })
}
