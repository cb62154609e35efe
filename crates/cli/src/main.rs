//! Haat CLI
//!
//! Command-line views over the farm marketplace API: browsing, the shop
//! session, order management for both roles, and the dashboards.

use std::{path::PathBuf, process, time::Duration};

use clap::{Args, Parser, Subcommand};
use haat_app::{config::ClientConfig, context::AppContext};
use tracing_subscriber::EnvFilter;

mod auth;
mod console;
mod dashboard;
mod farm;
mod orders;
mod products;
mod render;
mod shop;

#[derive(Debug, Parser)]
#[command(name = "haat", about = "Farm marketplace client", long_about = None)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Args)]
struct ConnectionArgs {
    /// API base URL
    #[arg(long, env = "HAAT_API_URL", global = true)]
    api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "HAAT_TIMEOUT_SECS", global = true)]
    timeout_secs: Option<u64>,

    /// Directory holding the persisted session
    #[arg(long, env = "HAAT_STATE_DIR", global = true)]
    state_dir: Option<PathBuf>,
}

impl ConnectionArgs {
    fn into_config(self) -> Result<ClientConfig, String> {
        let mut config =
            ClientConfig::from_env().map_err(|error| format!("bad configuration: {error}"))?;

        if let Some(api_url) = self.api_url {
            config = ClientConfig::new(api_url, config.timeout, config.state_dir);
        }

        if let Some(secs) = self.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(dir) = self.state_dir {
            config.state_dir = dir;
        }

        Ok(config)
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Sign up, log in and manage the session
    Auth(AuthCommand),

    /// Browse public product listings
    Products(ProductsCommand),

    /// Manage your own listings (farmers)
    Farm(FarmCommand),

    /// Start an interactive shopping session (buyers)
    Shop,

    /// View and act on your placed orders (buyers)
    Orders(OrdersCommand),

    /// View and act on received orders (farmers)
    Received(ReceivedCommand),

    /// Role-appropriate dashboard statistics
    Dashboard,
}

#[derive(Debug, Args)]
struct AuthCommand {
    #[command(subcommand)]
    command: auth::AuthSubcommand,
}

#[derive(Debug, Args)]
struct ProductsCommand {
    #[command(subcommand)]
    command: products::ProductsSubcommand,
}

#[derive(Debug, Args)]
struct FarmCommand {
    #[command(subcommand)]
    command: farm::FarmSubcommand,
}

#[derive(Debug, Args)]
struct OrdersCommand {
    #[command(subcommand)]
    command: orders::BuyerSubcommand,
}

#[derive(Debug, Args)]
struct ReceivedCommand {
    #[command(subcommand)]
    command: orders::FarmerSubcommand,
}

#[tokio::main]
async fn main() {
    let _env = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let config = cli.connection.into_config()?;
    let ctx = AppContext::new(config).map_err(|error| format!("startup failed: {error}"))?;

    match cli.command {
        Commands::Auth(AuthCommand { command }) => auth::run(&ctx, command).await,
        Commands::Products(ProductsCommand { command }) => products::run(&ctx, command).await,
        Commands::Farm(FarmCommand { command }) => farm::run(&ctx, command).await,
        Commands::Shop => shop::run(&ctx).await,
        Commands::Orders(OrdersCommand { command }) => orders::run_buyer(&ctx, command).await,
        Commands::Received(ReceivedCommand { command }) => orders::run_farmer(&ctx, command).await,
        Commands::Dashboard => dashboard::run(&ctx).await,
    }
}
