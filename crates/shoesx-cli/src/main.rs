use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use shoesx_core::cart::ProductRef;
use shoesx_core::catalog::SortBy;
use shoesx_core::fit::{FootMeasurements, Gender, PreferredFit};
use shoesx_infrastructure::ShoesxPaths;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::AppContext;

#[derive(Parser)]
#[command(name = "shoesx")]
#[command(about = "ShoesX storefront CLI - catalog, cart and fit tools", long_about = None)]
struct Cli {
    /// Keep config and data under this directory instead of the platform dirs
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    /// Path to config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter and sort the product catalog
    Catalog {
        /// JSON array of product attribute objects
        #[arg(long)]
        products: Option<PathBuf>,
        /// Initial URL query, e.g. "category=running&price=0-150"
        #[arg(long, default_value = "")]
        query: String,
        /// default | price-low | price-high | name | rating
        #[arg(long)]
        sort: Option<SortBy>,
    },
    /// Inspect or change the local cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Recommend a size from foot measurements
    Fit {
        /// Male | Female | Unisex
        #[arg(long)]
        gender: Gender,
        /// Foot length in cm
        #[arg(long)]
        length: f64,
        /// Foot width in cm
        #[arg(long)]
        width: f64,
        #[arg(long)]
        category: String,
        /// snug | regular | relaxed
        #[arg(long, default_value = "regular")]
        fit: PreferredFit,
        /// Also save the measurements to this user's profile
        #[arg(long)]
        user: Option<String>,
    },
    /// Synchronise the local cart with a user's remote document
    Sync {
        #[command(subcommand)]
        action: SyncAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the cart
    Show,
    /// Add a product variant
    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        /// Display price, e.g. "$120.00"
        #[arg(long)]
        price: String,
        #[arg(long, default_value = "")]
        category: String,
        #[arg(long, default_value = "")]
        image: String,
        #[arg(long)]
        size: String,
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product variant
    Remove {
        #[arg(long)]
        id: String,
        #[arg(long)]
        size: String,
    },
    /// Set the quantity of a product variant (0 or less removes it)
    Update {
        #[arg(long)]
        id: String,
        #[arg(long)]
        size: String,
        #[arg(long, allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum SyncAction {
    /// Save the local cart to the user's document
    Push {
        #[arg(long)]
        user: String,
    },
    /// Replace the local cart with the user's remote cart
    Pull {
        #[arg(long)]
        user: String,
    },
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let ctx = AppContext::load(ShoesxPaths::new(cli.home), cli.config)?;
    init_tracing(&ctx.config.logging.level);
    tracing::debug!("[Cli] Loaded config: {:?}", ctx.config);

    match cli.command {
        Commands::Catalog { products, query, sort } => commands::catalog::run(&ctx, products, &query, sort)?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&ctx)?,
            CartAction::Add {
                id,
                name,
                price,
                category,
                image,
                size,
                quantity,
            } => {
                let product = ProductRef::new(id, name, price, image, category);
                commands::cart::add(&ctx, &product, &size, quantity)?
            }
            CartAction::Remove { id, size } => commands::cart::remove(&ctx, &id, &size)?,
            CartAction::Update { id, size, quantity } => commands::cart::update(&ctx, &id, &size, quantity)?,
            CartAction::Clear => commands::cart::clear(&ctx)?,
        },
        Commands::Fit {
            gender,
            length,
            width,
            category,
            fit,
            user,
        } => {
            let measurements = FootMeasurements::new(gender, length, width, fit);
            commands::fit::run(&ctx, measurements, &category, user.as_deref()).await?
        }
        Commands::Sync { action } => match action {
            SyncAction::Push { user } => commands::sync::push(&ctx, &user).await?,
            SyncAction::Pull { user } => commands::sync::pull(&ctx, &user).await?,
        },
    }

    Ok(())
}
