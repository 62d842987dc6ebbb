//! What of a response body reaches the debug log
//!
//! Each endpoint picks a [`BodyLog`] policy. Domain lists are only long, but
//! lab bundles carry Salt and AWS console passwords, so their secret fields
//! are masked before anything is formatted.

use serde_json::Value;

/// Bodies longer than this many bytes are cut on a char boundary.
const BODY_LOG_LIMIT: usize = 512;

const MASK: &str = "***";

/// Object keys whose values never reach the log, matched case-insensitively
/// as substrings (`password`, `sessionToken`, `secret_access_key`).
const SECRET_KEYS: [&str; 3] = ["password", "token", "secret"];

/// How an endpoint's response body is written to the debug log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyLog {
    /// Bounded prefix of the raw body.
    Truncated,
    /// JSON with secret fields masked, then bounded. Bodies that are not JSON
    /// are reduced to their size.
    Masked,
}

impl BodyLog {
    #[must_use]
    pub fn render(self, body: &str) -> String {
        match self {
            Self::Truncated => truncate(body),
            Self::Masked => match serde_json::from_str::<Value>(body) {
                Ok(mut value) => {
                    mask_secrets(&mut value);
                    truncate(&value.to_string())
                }
                Err(_) => format!("<{} bytes redacted>", body.len()),
            },
        }
    }
}

fn is_secret(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    SECRET_KEYS.iter().any(|secret| key.contains(secret))
}

fn mask_secrets(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, field) in map.iter_mut() {
                if is_secret(key) && !field.is_null() {
                    *field = Value::String(MASK.to_string());
                } else {
                    mask_secrets(field);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(mask_secrets),
        _ => {}
    }
}

fn truncate(body: &str) -> String {
    if body.len() <= BODY_LOG_LIMIT {
        return body.to_string();
    }
    let mut end = BODY_LOG_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... <{} bytes total>", &body[..end], body.len())
}
