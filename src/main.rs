use anyhow::{Context, Result};
use clap::Parser;
use ravecard::commands::{CardCommand, execute};
use ravecard::runtime::RealRuntime;
use ravecard::{Config, Environment, VirtualCardClient};

/// ravecard - Rave virtual card client
///
/// Manage virtual cards on a Rave merchant account.
///
/// Credentials are read from the RAVE_PUBLIC_KEY and RAVE_SECRET_KEY
/// environment variables. Results are printed as JSON.
///
/// Examples:
///   ravecard list                       # List every card on the account
///   ravecard freeze <CARD_ID>           # Block a card
#[derive(Parser, Debug)]
#[command(author, version = env!("RAVECARD_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: CardCommand,

    /// Use the production API instead of the sandbox (also via RAVE_PRODUCTION)
    #[arg(
        long,
        env = "RAVE_PRODUCTION",
        global = true,
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    production: bool,

    /// API base URL (overrides the environment default)
    #[arg(long = "base-url", value_name = "URL", global = true)]
    base_url: Option<String>,

    /// Do not send the usage beacon
    #[arg(long = "no-tracking", global = true)]
    no_tracking: bool,
}

impl Cli {
    fn config(&self) -> Result<Config> {
        let environment = if self.production {
            Environment::Production
        } else {
            Environment::Sandbox
        };

        let mut config = Config::from_env(&RealRuntime, environment)?;
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url);
        }
        if self.no_tracking {
            config = config.without_tracking();
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let client = VirtualCardClient::new(cli.config()?)?;
    let result = execute(&client, cli.command).await?;

    let output = serde_json::to_string_pretty(&result).context("Failed to render result")?;
    println!("{}", output);
    Ok(())
}
