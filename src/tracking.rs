//! Usage beacon sent alongside every operation.
//!
//! The beacon runs on its own task. Its outcome is only logged and never
//! reaches the operation that fired it.

use log::{debug, warn};
use serde::Serialize;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::http::HttpClient;
use crate::operation::Operation;

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackingPayload {
    pub public_key: String,
    pub language: &'static str,
    pub version: &'static str,
    pub title: &'static str,
    pub message: &'static str,
}

impl TrackingPayload {
    pub fn new(public_key: &str, operation: Operation) -> Self {
        Self {
            public_key: public_key.to_string(),
            language: "Rust",
            version: env!("RAVECARD_VERSION"),
            title: "Incoming call",
            message: operation.tracking_message(),
        }
    }
}

#[derive(Clone)]
pub struct Tracker {
    http_client: HttpClient,
    url: Option<String>,
    public_key: String,
}

impl Tracker {
    pub fn new(http_client: HttpClient, url: Option<String>, public_key: impl Into<String>) -> Self {
        Self {
            http_client,
            url,
            public_key: public_key.into(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.url.is_some()
    }

    /// Fires the beacon for `operation` in the background.
    ///
    /// Returns the spawned task, or `None` when tracking is disabled or no
    /// Tokio runtime is available to run it. Callers are free to drop the
    /// handle.
    pub fn track(&self, operation: Operation) -> Option<JoinHandle<()>> {
        let url = self.url.clone()?;
        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                warn!("Skipping tracking beacon for {}: {}", operation, e);
                return None;
            }
        };
        let http_client = self.http_client.clone();
        let payload = TrackingPayload::new(&self.public_key, operation);

        Some(handle.spawn(async move {
            let body = match serde_json::to_value(&payload) {
                Ok(body) => body,
                Err(e) => {
                    warn!("Failed to encode tracking payload: {}", e);
                    return;
                }
            };
            match http_client.post_json(&url, &body).await {
                Ok(()) => debug!("Tracking beacon sent for {}", operation),
                Err(e) => warn!("Tracking beacon for {} failed: {:#}", operation, e),
            }
        }))
    }
}
