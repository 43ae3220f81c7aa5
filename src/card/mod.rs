//! Virtual-card operations.
//!
//! [`CardApi`] is the operation surface; [`VirtualCardClient`] implements it
//! over a [`Transport`](crate::http::Transport). Every operation sends one
//! request and returns either a [`NormalizedResult`] or a
//! [`VirtualCardError`].

mod client;
mod types;

use async_trait::async_trait;

use crate::error::VirtualCardError;
use crate::response::NormalizedResult;

pub use client::VirtualCardClient;
pub use types::NewCard;

/// Result type shared by every card operation.
pub type CardResult = Result<NormalizedResult, VirtualCardError>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CardApi: Send + Sync {
    /// Issues a new card. Fails before any request if required fields are missing.
    async fn create(&self, card: &NewCard) -> CardResult;

    /// Lists every card on the merchant account.
    async fn all(&self) -> CardResult;

    /// Fetches one card's details and transactions.
    async fn get(&self, card_id: &str) -> CardResult;

    /// Permanently terminates a card.
    async fn cancel(&self, card_id: &str) -> CardResult;

    /// Temporarily blocks a card.
    async fn freeze(&self, card_id: &str) -> CardResult;

    /// Lifts a block placed by [`CardApi::freeze`].
    async fn unfreeze(&self, card_id: &str) -> CardResult;

    /// Loads `amount` of `currency` onto the card.
    async fn fund(&self, card_id: &str, currency: &str, amount: f64) -> CardResult;

    /// Moves `amount` from the card back to the merchant balance.
    async fn withdraw(&self, card_id: &str, amount: f64) -> CardResult;
}
