//! Typed failures returned by every virtual-card operation.

use serde_json::Value;

use crate::operation::Operation;

/// Fallback message when the processor answers without `data` or `message`.
pub const SERVER_DOWN_MESSAGE: &str = "Server is down";

/// Every way a virtual-card operation can fail.
#[derive(Debug, Clone, PartialEq)]
pub enum VirtualCardError {
    /// The transport failed or the response body was not JSON.
    Server {
        /// Billing name of the card being created, when there was one.
        name: Option<String>,
        /// Raw response text or transport fault description.
        message: String,
    },
    /// Required request fields were missing; nothing was sent.
    IncompleteCardDetails {
        /// Names of the missing fields, in declaration order.
        missing: Vec<&'static str>,
    },
    /// The processor refused to create the card.
    CardCreation {
        name: Option<String>,
        message: Option<String>,
        data: Option<Value>,
    },
    /// The processor refused a query or status-changing operation.
    CardStatus {
        operation: Operation,
        returned_data: Value,
    },
}

impl VirtualCardError {
    /// Short kind name, stable across messages.
    pub fn kind(&self) -> &'static str {
        match self {
            VirtualCardError::Server { .. } => "ServerError",
            VirtualCardError::IncompleteCardDetails { .. } => "IncompleteCardDetailsError",
            VirtualCardError::CardCreation { .. } => "CardCreationError",
            VirtualCardError::CardStatus { .. } => "CardStatusError",
        }
    }

    pub(crate) fn server(message: impl Into<String>) -> Self {
        VirtualCardError::Server {
            name: None,
            message: message.into(),
        }
    }

    pub(crate) fn missing(fields: Vec<&'static str>) -> Self {
        VirtualCardError::IncompleteCardDetails { missing: fields }
    }
}

impl std::fmt::Display for VirtualCardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VirtualCardError::Server { name, message } => match name {
                Some(name) => write!(f, "Server error for {}: {}", name, message),
                None => write!(f, "Server error: {}", message),
            },
            VirtualCardError::IncompleteCardDetails { missing } => {
                write!(
                    f,
                    "Incomplete card details: missing {}",
                    missing.join(", ")
                )
            }
            VirtualCardError::CardCreation {
                name,
                message,
                data,
            } => {
                write!(f, "Card creation failed")?;
                if let Some(name) = name {
                    write!(f, " for {}", name)?;
                }
                match (message, data) {
                    (Some(message), _) => write!(f, ": {}", message),
                    (None, Some(data)) => write!(f, ": {}", data),
                    (None, None) => Ok(()),
                }
            }
            VirtualCardError::CardStatus {
                operation,
                returned_data,
            } => {
                write!(f, "{} request failed: {}", operation, returned_data)
            }
        }
    }
}

impl std::error::Error for VirtualCardError {}
