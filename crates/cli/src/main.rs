//! Blossom CLI - demo shell over the Mini App client core.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! blossom catalog categories
//! blossom catalog products --category bouquets --in-stock
//! blossom catalog show peony-bouquet
//!
//! # Manage the local cart (persisted between invocations)
//! blossom cart add peony-bouquet --qty 2
//! blossom cart show
//! blossom cart promo SPRING --percent 10
//!
//! # Authenticate and order
//! blossom login
//! blossom checkout --name "Anna Petrova" --phone "+79001234567" \
//!     --address "Arbat 12, apt 5"
//! blossom orders list
//! ```
//!
//! # Environment Variables
//!
//! - `BLOSSOM_API_BASE_URL` - backend REST base URL (required)
//! - `BLOSSOM_DATA_DIR` - local store directory (default `.blossom`)
//! - `TELEGRAM_INIT_DATA` - host-platform init token for `login`

#![cfg_attr(not(test), forbid(unsafe_code))]

use blossom_client::config::Config;
use blossom_client::state::AppState;
use blossom_core::{OrderId, ProductId};
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "blossom")]
#[command(author, version, about = "Blossom flower shop client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the local cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage local favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
    /// Authenticate via the Telegram init token from the environment
    Login,
    /// Drop the local session
    Logout,
    /// Show the current identity
    Whoami,
    /// Validate the form and submit the cart as an order
    Checkout {
        /// Recipient name
        #[arg(short, long)]
        name: String,

        /// Contact phone number
        #[arg(short, long)]
        phone: String,

        /// Delivery address
        #[arg(short, long)]
        address: String,

        /// Courier comment
        #[arg(short, long)]
        comment: Option<String>,
    },
    /// Inspect order history
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List categories
    Categories,
    /// List products, optionally filtered
    Products {
        /// Category slug
        #[arg(long)]
        category: Option<String>,

        /// Free-text search
        #[arg(long)]
        search: Option<String>,

        /// Only products in stock
        #[arg(long)]
        in_stock: bool,

        /// Sort key (e.g. `price`, `-price`, `-created_at`)
        #[arg(long)]
        ordering: Option<String>,

        /// Page number
        #[arg(long)]
        page: Option<u32>,
    },
    /// Show one product by slug
    Show { slug: String },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Add a catalog product by slug
    Add {
        slug: String,

        /// Quantity to add
        #[arg(long, default_value_t = 1)]
        qty: u32,
    },
    /// Remove a line by product id
    Remove { product_id: i64 },
    /// Set a line's quantity (zero removes the line)
    SetQty { product_id: i64, qty: i64 },
    /// Empty the cart
    Clear,
    /// Apply a promo code
    Promo {
        code: String,

        /// Percent discount carried by the code
        #[arg(long, conflicts_with = "fixed")]
        percent: Option<u32>,

        /// Fixed discount in minor currency units
        #[arg(long)]
        fixed: Option<i64>,
    },
    /// Remove the applied promo code
    RemovePromo,
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// List favorites
    Show,
    /// Toggle a catalog product by slug
    Toggle { slug: String },
    /// Remove all favorites
    Clear,
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List the current identity's orders
    List,
    /// Show one order's detail
    Show { id: i64 },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    let state = AppState::new(config)?;

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::Categories => commands::catalog::categories(&state).await?,
            CatalogAction::Products {
                category,
                search,
                in_stock,
                ordering,
                page,
            } => {
                commands::catalog::products(&state, category, search, in_stock, ordering, page)
                    .await?;
            }
            CatalogAction::Show { slug } => commands::catalog::show(&state, &slug).await?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state),
            CartAction::Add { slug, qty } => commands::cart::add(&state, &slug, qty).await?,
            CartAction::Remove { product_id } => {
                commands::cart::remove(&state, ProductId::new(product_id));
            }
            CartAction::SetQty { product_id, qty } => {
                commands::cart::set_qty(&state, ProductId::new(product_id), qty);
            }
            CartAction::Clear => commands::cart::clear(&state),
            CartAction::Promo {
                code,
                percent,
                fixed,
            } => commands::cart::promo(&state, code, percent, fixed),
            CartAction::RemovePromo => commands::cart::remove_promo(&state),
        },
        Commands::Favorites { action } => match action {
            FavoritesAction::Show => commands::favorites::show(&state),
            FavoritesAction::Toggle { slug } => {
                commands::favorites::toggle(&state, &slug).await?;
            }
            FavoritesAction::Clear => commands::favorites::clear(&state),
        },
        Commands::Login => commands::account::login(&state).await?,
        Commands::Logout => commands::account::logout(&state),
        Commands::Whoami => commands::account::whoami(&state).await?,
        Commands::Checkout {
            name,
            phone,
            address,
            comment,
        } => commands::orders::checkout(&state, name, phone, address, comment).await?,
        Commands::Orders { action } => match action {
            OrdersAction::List => commands::orders::list(&state).await?,
            OrdersAction::Show { id } => commands::orders::show(&state, OrderId::new(id)).await?,
        },
    }
    Ok(())
}
