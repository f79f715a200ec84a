//! TR-Tech CLI - shop and back-office tool for the TR-Tech backend.
//!
//! Commands:
//! - `trtech products` - Browse the catalogue
//! - `trtech services` - List repair services
//! - `trtech checkout` - Build a cart and place an order over WhatsApp
//! - `trtech orders` - List, filter and update orders
//! - `trtech repairs` - Book repairs and manage repair jobs
//! - `trtech contact` - Send or list contact messages
//! - `trtech health` - Check the backend
//! - `trtech config` - Manage configuration

mod commands;
mod config;
mod context;
mod opener;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    CheckoutArgs, ConfigArgs, ContactArgs, OrdersArgs, ProductsArgs, RepairsArgs, ServicesArgs,
};

/// TR-Tech CLI - shop, checkout and back office for TR-Tech Repairs and Designs
#[derive(Parser)]
#[command(name = "trtech")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse products
    Products(ProductsArgs),

    /// List repair services
    Services(ServicesArgs),

    /// Pick products and place an order
    Checkout(CheckoutArgs),

    /// Manage orders
    Orders(OrdersArgs),

    /// Book and manage repairs
    Repairs(RepairsArgs),

    /// Send or read contact messages
    Contact(ContactArgs),

    /// Check that the backend is up
    Health,

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;
    ctx.init_logging();

    let result = match cli.command {
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Services(args) => commands::products::run_services(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Orders(args) => commands::orders::run(args, &ctx).await,
        Commands::Repairs(args) => commands::repairs::run(args, &ctx).await,
        Commands::Contact(args) => commands::contact::run(args, &ctx).await,
        Commands::Health => commands::health::run(&ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
