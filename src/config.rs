//! Client configuration: credentials, environment and endpoint layout.

use anyhow::{Context, Result, anyhow};
use log::debug;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::operation::Operation;
use crate::runtime::Runtime;

pub const SANDBOX_URL: &str = "https://ravesandboxapi.flutterwave.com/";
pub const PRODUCTION_URL: &str = "https://api.ravepay.co/";
pub const DEFAULT_TRACKING_URL: &str =
    "https://kgelfdz7mf.execute-api.us-east-1.amazonaws.com/staging/sendevent";

pub const PUBLIC_KEY_ENV: &str = "RAVE_PUBLIC_KEY";
pub const SECRET_KEY_ENV: &str = "RAVE_SECRET_KEY";

/// Merchant key pair issued by the processor.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    public_key: String,
    secret_key: String,
}

impl Credentials {
    pub fn new(public_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            secret_key: secret_key.into(),
        }
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

/// Keeps the first 8 and last 4 characters of long keys; hides short ones entirely.
fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 12 {
        return "*********".to_string();
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}*********{}", head, tail)
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("public_key", &mask(&self.public_key))
            .field("secret_key", &mask(&self.secret_key))
            .finish()
    }
}

/// Which processor deployment to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Sandbox,
    Production,
}

impl Environment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => SANDBOX_URL,
            Environment::Production => PRODUCTION_URL,
        }
    }
}

/// Path fragment of every virtual-card endpoint, relative to the base URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointTable {
    pub create: String,
    pub list: String,
    pub get: String,
    pub terminate: String,
    pub freeze: String,
    pub unfreeze: String,
    pub fund: String,
    pub withdraw: String,
}

impl Default for EndpointTable {
    fn default() -> Self {
        Self {
            create: "v2/services/virtualcards/new".to_string(),
            list: "v2/services/virtualcards/search".to_string(),
            get: "v2/services/virtualcards/get".to_string(),
            terminate: "v2/services/virtualcards/".to_string(),
            freeze: "v2/services/virtualcards/".to_string(),
            unfreeze: "v2/services/virtualcards/".to_string(),
            fund: "v2/services/virtualcards/fund".to_string(),
            withdraw: "v2/services/virtualcards/withdraw".to_string(),
        }
    }
}

impl EndpointTable {
    pub fn path(&self, operation: Operation) -> &str {
        match operation {
            Operation::Create => &self.create,
            Operation::List => &self.list,
            Operation::Get => &self.get,
            Operation::Cancel => &self.terminate,
            Operation::Freeze => &self.freeze,
            Operation::Unfreeze => &self.unfreeze,
            Operation::Fund => &self.fund,
            Operation::Withdraw => &self.withdraw,
        }
    }
}

/// Immutable settings shared by every operation of a client.
#[derive(Debug, Clone)]
pub struct Config {
    credentials: Credentials,
    environment: Environment,
    base_url: String,
    endpoints: EndpointTable,
    tracking_url: Option<String>,
}

impl Config {
    pub fn new(credentials: Credentials, environment: Environment) -> Self {
        Self {
            credentials,
            environment,
            base_url: environment.base_url().to_string(),
            endpoints: EndpointTable::default(),
            tracking_url: Some(DEFAULT_TRACKING_URL.to_string()),
        }
    }

    /// Reads the key pair from `RAVE_PUBLIC_KEY` and `RAVE_SECRET_KEY`.
    pub fn from_env<R: Runtime>(runtime: &R, environment: Environment) -> Result<Self> {
        let public_key = runtime
            .env_var(PUBLIC_KEY_ENV)
            .with_context(|| format!("{} is not set", PUBLIC_KEY_ENV))?;
        let secret_key = runtime
            .env_var(SECRET_KEY_ENV)
            .with_context(|| format!("{} is not set", SECRET_KEY_ENV))?;

        let credentials = Credentials::new(public_key, secret_key);
        debug!("Loaded credentials from environment: {:?}", credentials);

        Ok(Self::new(credentials, environment))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_endpoints(mut self, endpoints: EndpointTable) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_tracking_url(mut self, tracking_url: impl Into<String>) -> Self {
        self.tracking_url = Some(tracking_url.into());
        self
    }

    pub fn without_tracking(mut self) -> Self {
        self.tracking_url = None;
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoints(&self) -> &EndpointTable {
        &self.endpoints
    }

    pub fn tracking_url(&self) -> Option<&str> {
        self.tracking_url.as_deref()
    }

    /// Full endpoint URL for `operation`.
    ///
    /// Cancel, Freeze and Unfreeze address the card in the path, so their
    /// URL ends with `<card_id>/<action>`. The card id is pushed as a single
    /// escaped segment. Query parameters are not included.
    pub fn url(&self, operation: Operation, card_id: Option<&str>) -> Result<String> {
        let joined = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.endpoints.path(operation).trim_start_matches('/')
        );
        let mut url =
            Url::parse(&joined).with_context(|| format!("Invalid endpoint URL: {}", joined))?;

        if let (Some(suffix), Some(card_id)) = (operation.card_path_suffix(), card_id) {
            url.path_segments_mut()
                .map_err(|_| anyhow!("Endpoint URL cannot take a card id: {}", joined))?
                .pop_if_empty()
                .push(card_id)
                .extend(suffix.split('/'));
        }

        Ok(url.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;

    fn credentials() -> Credentials {
        Credentials::new(
            "FLWPUBK-0123456789abcdef-X",
            "FLWSECK-fedcba9876543210-X",
        )
    }

    #[test]
    fn test_debug_masks_keys() {
        let debug = format!("{:?}", credentials());
        assert!(!debug.contains("fedcba9876543210"));
        assert!(!debug.contains("0123456789abcdef"));
        assert!(debug.contains("FLWSECK-*********10-X"));
        assert!(debug.contains("FLWPUBK-*********ef-X"));
    }

    #[test]
    fn test_mask_short_key() {
        assert_eq!(mask("short"), "*********");
        assert_eq!(mask(""), "*********");
    }

    #[test]
    fn test_environment_base_url() {
        assert_eq!(Environment::default(), Environment::Sandbox);
        let config = Config::new(credentials(), Environment::Sandbox);
        assert_eq!(config.base_url(), SANDBOX_URL);
        let config = Config::new(credentials(), Environment::Production);
        assert_eq!(config.base_url(), PRODUCTION_URL);
        assert_eq!(config.environment(), Environment::Production);
    }

    #[test]
    fn test_url_for_body_addressed_operations() {
        let config = Config::new(credentials(), Environment::Sandbox);
        assert_eq!(
            config.url(Operation::Create, None).unwrap(),
            "https://ravesandboxapi.flutterwave.com/v2/services/virtualcards/new"
        );
        assert_eq!(
            config.url(Operation::List, None).unwrap(),
            "https://ravesandboxapi.flutterwave.com/v2/services/virtualcards/search"
        );
        assert_eq!(
            config.url(Operation::Get, Some("card-1")).unwrap(),
            "https://ravesandboxapi.flutterwave.com/v2/services/virtualcards/get"
        );
        assert_eq!(
            config.url(Operation::Fund, Some("card-1")).unwrap(),
            "https://ravesandboxapi.flutterwave.com/v2/services/virtualcards/fund"
        );
        assert_eq!(
            config.url(Operation::Withdraw, Some("card-1")).unwrap(),
            "https://ravesandboxapi.flutterwave.com/v2/services/virtualcards/withdraw"
        );
    }

    #[test]
    fn test_url_for_path_addressed_operations() {
        let config = Config::new(credentials(), Environment::Production);
        assert_eq!(
            config.url(Operation::Cancel, Some("card-1")).unwrap(),
            "https://api.ravepay.co/v2/services/virtualcards/card-1/terminate"
        );
        assert_eq!(
            config.url(Operation::Freeze, Some("card-1")).unwrap(),
            "https://api.ravepay.co/v2/services/virtualcards/card-1/status/block"
        );
        assert_eq!(
            config.url(Operation::Unfreeze, Some("card-1")).unwrap(),
            "https://api.ravepay.co/v2/services/virtualcards/card-1/status/unblock"
        );
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let config =
            Config::new(credentials(), Environment::Sandbox).with_base_url("http://127.0.0.1:1234");
        assert_eq!(
            config.url(Operation::Create, None).unwrap(),
            "http://127.0.0.1:1234/v2/services/virtualcards/new"
        );

        let endpoints = EndpointTable {
            freeze: "/cards".to_string(),
            ..EndpointTable::default()
        };
        let config = config.with_endpoints(endpoints);
        assert_eq!(
            config.url(Operation::Freeze, Some("c9")).unwrap(),
            "http://127.0.0.1:1234/cards/c9/status/block"
        );
    }

    #[test]
    fn test_url_escapes_card_id() {
        let config = Config::new(credentials(), Environment::Production);
        assert_eq!(
            config
                .url(Operation::Freeze, Some("card-1/terminate#"))
                .unwrap(),
            "https://api.ravepay.co/v2/services/virtualcards/card-1%2Fterminate%23/status/block"
        );
        assert_eq!(
            config.url(Operation::Cancel, Some("a?b c")).unwrap(),
            "https://api.ravepay.co/v2/services/virtualcards/a%3Fb%20c/terminate"
        );
    }

    #[test]
    fn test_url_rejects_invalid_base() {
        let config = Config::new(credentials(), Environment::Sandbox).with_base_url("not a url");
        assert!(config.url(Operation::Create, None).is_err());
    }

    #[test]
    fn test_tracking_overrides() {
        let config = Config::new(credentials(), Environment::Sandbox);
        assert_eq!(config.tracking_url(), Some(DEFAULT_TRACKING_URL));

        let config = config.with_tracking_url("http://localhost/beacon");
        assert_eq!(config.tracking_url(), Some("http://localhost/beacon"));

        let config = config.without_tracking();
        assert_eq!(config.tracking_url(), None);
    }

    #[test]
    fn test_from_env() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_env_var()
            .with(eq(PUBLIC_KEY_ENV))
            .returning(|_| Ok("FLWPUBK-test".to_string()));
        runtime
            .expect_env_var()
            .with(eq(SECRET_KEY_ENV))
            .returning(|_| Ok("FLWSECK-test".to_string()));

        let config = Config::from_env(&runtime, Environment::Sandbox).unwrap();
        assert_eq!(config.credentials().public_key(), "FLWPUBK-test");
        assert_eq!(config.credentials().secret_key(), "FLWSECK-test");
    }

    #[test]
    fn test_from_env_missing_secret_key() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_env_var()
            .with(eq(PUBLIC_KEY_ENV))
            .returning(|_| Ok("FLWPUBK-test".to_string()));
        runtime
            .expect_env_var()
            .with(eq(SECRET_KEY_ENV))
            .returning(|_| Err(std::env::VarError::NotPresent));

        let err = Config::from_env(&runtime, Environment::Sandbox).unwrap_err();
        assert!(err.to_string().contains(SECRET_KEY_ENV));
    }
}
