//! Response normalization and error classification.
//!
//! The processor reports failures through two channels: the HTTP status code,
//! and a `status`/`message` pair inside an otherwise successful response.
//! The checks here fold both into a [`NormalizedResult`] or a single
//! [`VirtualCardError`] so callers never look at status codes themselves.

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{SERVER_DOWN_MESSAGE, VirtualCardError};
use crate::operation::Operation;

/// Status code and body text of a processor response.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for 2xx status codes.
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Envelope the processor wraps around every answer.
///
/// Built leniently from any JSON value: a non-string `status` never counts
/// as success, and a non-string `message` is kept as its JSON text.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParsedBody {
    pub status: Option<String>,
    pub message: Option<String>,
    pub data: Option<Value>,
}

impl ParsedBody {
    pub fn from_value(body: &Value) -> Self {
        let message = match body.get("message") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        };
        Self {
            status: body.get("status").and_then(Value::as_str).map(str::to_string),
            message,
            data: body.get("data").cloned(),
        }
    }

    fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }
}

/// Uniform success value returned by every operation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedResult {
    pub error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returned_data: Option<Value>,
}

impl NormalizedResult {
    /// Result of a successful card creation.
    pub fn created(id: Option<String>, data: Value) -> Self {
        Self {
            error: false,
            id,
            data: Some(data),
            returned_data: None,
        }
    }

    /// Result of a successful query or status change.
    pub fn returned(body: Value) -> Self {
        Self {
            error: false,
            id: None,
            data: None,
            returned_data: Some(body),
        }
    }
}

/// JSON truthiness: `null`, `false`, `0`, `""`, `[]` and `{}` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn card_id(data: &Value) -> Option<String> {
    match data.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Classifies the response to a card creation request.
///
/// `billing_name` identifies the card in errors raised before the processor's
/// own payload is known to be usable.
pub fn check_create_response(
    response: &RawResponse,
    billing_name: &str,
) -> Result<NormalizedResult, VirtualCardError> {
    let body = match serde_json::from_str::<Value>(&response.body) {
        Ok(value) => ParsedBody::from_value(&value),
        Err(e) => {
            debug!("Create response for {} is not JSON: {}", billing_name, e);
            return Err(VirtualCardError::Server {
                name: Some(billing_name.to_string()),
                message: response.body.clone(),
            });
        }
    };

    let data = match body.data {
        Some(ref data) if is_truthy(data) => data.clone(),
        _ => {
            return Err(VirtualCardError::CardCreation {
                name: Some(billing_name.to_string()),
                message: Some(
                    body.message
                        .unwrap_or_else(|| SERVER_DOWN_MESSAGE.to_string()),
                ),
                data: None,
            });
        }
    };

    if !response.is_ok() {
        debug!("Create request returned HTTP {}", response.status);
        let message = data
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or(body.message);
        return Err(VirtualCardError::CardCreation {
            name: Some(billing_name.to_string()),
            message,
            data: Some(data),
        });
    }

    if body.is_success() {
        Ok(NormalizedResult::created(card_id(&data), data))
    } else {
        debug!(
            "Create request answered with status {:?}",
            body.status.as_deref()
        );
        Err(VirtualCardError::CardCreation {
            name: Some(billing_name.to_string()),
            message: body.message,
            data: Some(data),
        })
    }
}

/// Classifies the response to any operation other than card creation.
pub fn check_status_response(
    operation: Operation,
    response: &RawResponse,
) -> Result<NormalizedResult, VirtualCardError> {
    let body: Value = match serde_json::from_str(&response.body) {
        Ok(body) => body,
        Err(e) => {
            debug!("{} response is not JSON: {}", operation, e);
            return Err(VirtualCardError::server(response.body.clone()));
        }
    };

    if response.is_ok() {
        Ok(NormalizedResult::returned(body))
    } else {
        debug!("{} request returned HTTP {}", operation, response.status);
        Err(VirtualCardError::CardStatus {
            operation,
            returned_data: body,
        })
    }
}
