//! Command-line surface over [`CardApi`].

use crate::card::{CardApi, CardResult, NewCard};

#[derive(clap::Subcommand, Debug, Clone, PartialEq)]
pub enum CardCommand {
    /// Create a new virtual card
    Create(CreateArgs),

    /// List every virtual card on the account
    List,

    /// Show a card's details and transactions
    Get(CardIdArgs),

    /// Permanently terminate a card
    Cancel(CardIdArgs),

    /// Temporarily block a card
    Freeze(CardIdArgs),

    /// Unblock a frozen card
    Unfreeze(CardIdArgs),

    /// Load funds onto a card
    Fund(FundArgs),

    /// Withdraw funds from a card to the account balance
    Withdraw(WithdrawArgs),
}

#[derive(clap::Args, Debug, Clone, PartialEq)]
pub struct CardIdArgs {
    /// Identifier of the card
    #[arg(value_name = "CARD_ID")]
    pub card_id: String,
}

#[derive(clap::Args, Debug, Clone, PartialEq)]
pub struct CreateArgs {
    /// Card currency (e.g. NGN, USD)
    #[arg(long)]
    pub currency: Option<String>,

    /// Initial balance
    #[arg(long)]
    pub amount: Option<f64>,

    /// Cardholder name
    #[arg(long)]
    pub billing_name: Option<String>,

    #[arg(long)]
    pub billing_address: Option<String>,

    #[arg(long)]
    pub billing_city: Option<String>,

    #[arg(long)]
    pub billing_state: Option<String>,

    #[arg(long)]
    pub billing_postal_code: Option<String>,

    #[arg(long)]
    pub billing_country: Option<String>,

    /// URL notified of card transactions
    #[arg(long)]
    pub callback_url: Option<String>,
}

impl From<CreateArgs> for NewCard {
    fn from(args: CreateArgs) -> Self {
        NewCard {
            currency: args.currency,
            amount: args.amount,
            billing_name: args.billing_name,
            billing_address: args.billing_address,
            billing_city: args.billing_city,
            billing_state: args.billing_state,
            billing_postal_code: args.billing_postal_code,
            billing_country: args.billing_country,
            callback_url: args.callback_url,
        }
    }
}

#[derive(clap::Args, Debug, Clone, PartialEq)]
pub struct FundArgs {
    #[arg(value_name = "CARD_ID")]
    pub card_id: String,

    /// Currency debited from the account balance
    #[arg(long)]
    pub currency: String,

    #[arg(long)]
    pub amount: f64,
}

#[derive(clap::Args, Debug, Clone, PartialEq)]
pub struct WithdrawArgs {
    #[arg(value_name = "CARD_ID")]
    pub card_id: String,

    #[arg(long)]
    pub amount: f64,
}

/// Runs a single command against `api`.
#[tracing::instrument(skip(api))]
pub async fn execute<A: CardApi + ?Sized>(api: &A, command: CardCommand) -> CardResult {
    match command {
        CardCommand::Create(args) => api.create(&NewCard::from(args)).await,
        CardCommand::List => api.all().await,
        CardCommand::Get(args) => api.get(&args.card_id).await,
        CardCommand::Cancel(args) => api.cancel(&args.card_id).await,
        CardCommand::Freeze(args) => api.freeze(&args.card_id).await,
        CardCommand::Unfreeze(args) => api.unfreeze(&args.card_id).await,
        CardCommand::Fund(args) => api.fund(&args.card_id, &args.currency, args.amount).await,
        CardCommand::Withdraw(args) => api.withdraw(&args.card_id, args.amount).await,
    }
}
