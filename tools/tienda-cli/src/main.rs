//! Tienda CLI - manage the storefront's product file and order history.
//!
//! Commands:
//! - `tienda products` - List, add, update and delete products in the JSON catalog
//! - `tienda orders` - Inspect or clear the stored order history
//! - `tienda config` - Show or create the configuration file

mod catalog_file;
mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ConfigArgs, OrdersArgs, ProductsArgs};

/// Tienda CLI - manage the storefront catalog and orders
#[derive(Parser)]
#[command(name = "tienda")]
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
    /// Manage the product catalog file
    Products(ProductsArgs),

    /// Inspect the stored order history
    Orders(OrdersArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = output::Output::new(cli.verbose, cli.json);

    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Orders(args) => commands::orders::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
