//! Client for the Rave virtual-card API.
//!
//! Every operation sends one request and folds the processor's answer into
//! either a [`NormalizedResult`] or a [`VirtualCardError`].
//!
//! ```rust,ignore
//! use ravecard::{CardApi, Config, Credentials, Environment, VirtualCardClient};
//!
//! let config = Config::new(Credentials::new(public_key, secret_key), Environment::Sandbox);
//! let client = VirtualCardClient::new(config)?;
//! let cards = client.all().await?;
//! ```

pub mod card;
pub mod commands;
pub mod config;
pub mod error;
pub mod http;
pub mod operation;
pub mod response;
pub mod runtime;
pub mod tracking;

pub use card::{CardApi, CardResult, NewCard, VirtualCardClient};
pub use config::{Config, Credentials, EndpointTable, Environment};
pub use error::VirtualCardError;
pub use operation::Operation;
pub use response::{NormalizedResult, RawResponse, check_create_response, check_status_response};
