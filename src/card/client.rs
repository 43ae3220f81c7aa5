use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use serde_json::{Value, json};

use crate::config::Config;
use crate::error::VirtualCardError;
use crate::http::{ApiRequest, HttpClient, Transport, build_http_client};
use crate::operation::Operation;
use crate::response::{RawResponse, check_create_response, check_status_response};
use crate::tracking::Tracker;

use super::{CardApi, CardResult, NewCard};

pub struct VirtualCardClient<T: Transport = HttpClient> {
    config: Config,
    transport: T,
    tracker: Tracker,
}

impl VirtualCardClient<HttpClient> {
    /// Creates a client talking to the processor over HTTP.
    pub fn new(config: Config) -> Result<Self> {
        let http_client = build_http_client()?;
        Ok(Self::with_transport(config, http_client.clone(), http_client))
    }
}

impl<T: Transport> VirtualCardClient<T> {
    /// Creates a client over a custom transport; the beacon still goes out
    /// through `beacon_client`.
    pub fn with_transport(config: Config, transport: T, beacon_client: HttpClient) -> Self {
        let tracker = Tracker::new(
            beacon_client,
            config.tracking_url().map(str::to_string),
            config.credentials().public_key(),
        );
        Self {
            config,
            transport,
            tracker,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn secret_key(&self) -> &str {
        self.config.credentials().secret_key()
    }

    async fn dispatch(
        &self,
        operation: Operation,
        request: ApiRequest,
    ) -> Result<RawResponse, VirtualCardError> {
        // Beacon outcome never feeds back into the operation
        let _ = self.tracker.track(operation);

        self.transport
            .send(request)
            .await
            .map_err(|e| VirtualCardError::server(format!("{:#}", e)))
    }

    async fn status_request(
        &self,
        operation: Operation,
        card_id: Option<&str>,
        body: Value,
    ) -> CardResult {
        let url = self.endpoint(operation, card_id)?;
        debug!("{} request to {}", operation, url);

        let mut request = ApiRequest::post(url, body);
        if operation == Operation::List {
            request = request.with_query("seckey", self.secret_key());
        }

        let response = self.dispatch(operation, request).await?;
        check_status_response(operation, &response)
    }

    fn endpoint(
        &self,
        operation: Operation,
        card_id: Option<&str>,
    ) -> Result<String, VirtualCardError> {
        self.config
            .url(operation, card_id)
            .map_err(|e| VirtualCardError::server(format!("{:#}", e)))
    }

    fn require_card_id(card_id: &str) -> Result<(), VirtualCardError> {
        if card_id.trim().is_empty() {
            return Err(VirtualCardError::missing(vec!["card_id"]));
        }
        Ok(())
    }
}

#[async_trait]
impl<T: Transport> CardApi for VirtualCardClient<T> {
    #[tracing::instrument(skip(self, card))]
    async fn create(&self, card: &NewCard) -> CardResult {
        let missing = card.missing_fields();
        if !missing.is_empty() {
            return Err(VirtualCardError::missing(missing));
        }

        let mut body = serde_json::to_value(card)
            .map_err(|e| VirtualCardError::server(format!("Failed to encode card details: {}", e)))?;
        if let Value::Object(ref mut map) = body {
            map.insert("seckey".to_string(), json!(self.secret_key()));
        }

        let billing_name = card.billing_name.clone().unwrap_or_default();
        let with_name = |e: VirtualCardError| match e {
            VirtualCardError::Server { message, .. } => VirtualCardError::Server {
                name: Some(billing_name.clone()),
                message,
            },
            other => other,
        };

        let url = self
            .endpoint(Operation::Create, None)
            .map_err(with_name)?;
        debug!("Creating virtual card for {} via {}", billing_name, url);

        let response = self
            .dispatch(Operation::Create, ApiRequest::post(url, body))
            .await
            .map_err(with_name)?;

        check_create_response(&response, &billing_name)
    }

    #[tracing::instrument(skip(self))]
    async fn all(&self) -> CardResult {
        let body = json!({ "seckey": self.secret_key() });
        self.status_request(Operation::List, None, body).await
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, card_id: &str) -> CardResult {
        Self::require_card_id(card_id)?;
        let body = json!({ "id": card_id, "seckey": self.secret_key() });
        self.status_request(Operation::Get, Some(card_id), body).await
    }

    #[tracing::instrument(skip(self))]
    async fn cancel(&self, card_id: &str) -> CardResult {
        Self::require_card_id(card_id)?;
        let body = json!({ "seckey": self.secret_key() });
        self.status_request(Operation::Cancel, Some(card_id), body).await
    }

    #[tracing::instrument(skip(self))]
    async fn freeze(&self, card_id: &str) -> CardResult {
        Self::require_card_id(card_id)?;
        let body = json!({ "seckey": self.secret_key() });
        self.status_request(Operation::Freeze, Some(card_id), body).await
    }

    #[tracing::instrument(skip(self))]
    async fn unfreeze(&self, card_id: &str) -> CardResult {
        Self::require_card_id(card_id)?;
        let body = json!({ "seckey": self.secret_key() });
        self.status_request(Operation::Unfreeze, Some(card_id), body).await
    }

    #[tracing::instrument(skip(self))]
    async fn fund(&self, card_id: &str, currency: &str, amount: f64) -> CardResult {
        let mut missing = Vec::new();
        if card_id.trim().is_empty() {
            missing.push("card_id");
        }
        if currency.trim().is_empty() {
            missing.push("currency");
        }
        if !missing.is_empty() {
            return Err(VirtualCardError::missing(missing));
        }

        let body = json!({
            "card_id": card_id,
            "amount": amount,
            "debit_currency": currency,
            "seckey": self.secret_key(),
        });
        self.status_request(Operation::Fund, Some(card_id), body).await
    }

    #[tracing::instrument(skip(self))]
    async fn withdraw(&self, card_id: &str, amount: f64) -> CardResult {
        Self::require_card_id(card_id)?;
        let body = json!({
            "card_id": card_id,
            "amount": amount,
            "seckey": self.secret_key(),
        });
        self.status_request(Operation::Withdraw, Some(card_id), body).await
    }
}
