//! Rocket CLI - Command line cart client for the RocketShoes storefront.
//!
//! Commands:
//! - `rocket show` - Show the cart with totals
//! - `rocket add <id>` - Add one unit of a product
//! - `rocket remove <id>` - Remove a product from the cart
//! - `rocket update <id> <amount>` - Set a product's amount
//! - `rocket config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rocket_observability::{init_logging, LogLevel};

use commands::{AmountArgs, ConfigArgs, ProductArgs, ShowArgs};

/// Rocket CLI - Manage the RocketShoes cart from the terminal
#[derive(Parser)]
#[command(name = "rocket")]
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
    /// Show the cart
    Show(ShowArgs),

    /// Add one unit of a product
    Add(ProductArgs),

    /// Remove a product from the cart
    Remove(ProductArgs),

    /// Set the amount of a product in the cart
    Update(AmountArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    let mut logging = ctx.config.logging.to_config();
    if cli.verbose {
        logging = logging.with_level(LogLevel::Debug);
    }
    init_logging(&logging);

    let result = match cli.command {
        Commands::Show(args) => commands::cart::show(args, &ctx).await,
        Commands::Add(args) => commands::cart::add(args, &ctx).await,
        Commands::Remove(args) => commands::cart::remove(args, &ctx).await,
        Commands::Update(args) => commands::cart::update(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = &result {
        ctx.output.error(&format!("{:#}", e));
    }

    // Notices were already printed as they arrived.
    let code = exit_code(&result, ctx.notifier.emitted());
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}

/// Process exit status: 1 after an error or any notice.
fn exit_code(result: &Result<()>, notices: usize) -> i32 {
    if result.is_err() || notices > 0 {
        1
    } else {
        0
    }
}
