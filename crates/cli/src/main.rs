//! Storefront Cart CLI - Inspect and edit a file-backed cart.
//!
//! Each invocation is one cart session: the stored cart is loaded, the
//! command is applied, and the result is written back.
//!
//! # Usage
//!
//! ```bash
//! # Add two units of a product
//! cart-cli add --id p1 --name "Linen Shirt" --price 49.50 --quantity 2
//!
//! # Change a quantity (0 or less removes the line)
//! cart-cli set p1 5
//!
//! # Remove a line
//! cart-cli remove p1
//!
//! # Show the cart, or print it as JSON
//! cart-cli show
//! cart-cli show --json
//!
//! # Empty the cart
//! cart-cli clear
//! ```
//!
//! # Environment Variables
//!
//! - `CART_STORAGE_DIR` - Storage directory (default: .cart)
//! - `CART_STORAGE_KEY` - Storage key (default: cart)
//! - `CART_CURRENCY` - Display currency (default: USD)
//! - `RUST_LOG` - Log filter (default: `storefront_cart=info,cart_cli=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use storefront_cart::{CartConfig, CartSession, FileStorage};
use storefront_cart_core::{CurrencyCode, Product};

mod commands;

#[derive(Parser)]
#[command(name = "cart-cli")]
#[command(author, version, about = "Storefront cart tools")]
struct Cli {
    /// Storage directory (overrides `CART_STORAGE_DIR`)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    /// Storage key (overrides `CART_STORAGE_KEY`)
    #[arg(long, global = true)]
    key: Option<String>,

    /// Display currency (overrides `CART_CURRENCY`)
    #[arg(long, global = true)]
    currency: Option<CurrencyCode>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a product to the cart
    Add {
        /// Product ID
        #[arg(long)]
        id: String,

        /// Product name
        #[arg(long)]
        name: String,

        /// Unit price
        #[arg(long)]
        price: Decimal,

        /// Units to add (negative values decrement an existing line)
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,

        /// Image URL (repeatable, primary first)
        #[arg(long = "image")]
        images: Vec<String>,

        /// Category name
        #[arg(long, default_value = "")]
        category: String,

        /// Size option (repeatable)
        #[arg(long = "size")]
        sizes: Vec<String>,

        /// Color option (repeatable)
        #[arg(long = "color")]
        colors: Vec<String>,
    },
    /// Set the quantity of a line (0 or less removes it)
    Set {
        /// Product ID
        id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line
    Remove {
        /// Product ID
        id: String,
    },
    /// Remove every line
    Clear,
    /// Show the cart
    Show {
        /// Print the cart view as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "storefront_cart=info,cart_cli=info".into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CartConfig::from_env()?;
    if let Some(dir) = cli.storage_dir {
        config.storage_dir = dir;
    }
    if let Some(key) = cli.key {
        config.storage_key = key;
    }
    if let Some(currency) = cli.currency {
        config.currency = currency;
    }

    let storage = FileStorage::new(config.storage_dir.clone());
    let mut session = CartSession::from_config(storage, &config);
    session.mount();

    match cli.command {
        Commands::Add {
            id,
            name,
            price,
            quantity,
            images,
            category,
            sizes,
            colors,
        } => {
            let mut product = Product::new(id, name, price);
            product.images = images;
            product.category = category;
            product.sizes = sizes;
            product.colors = colors;
            commands::cart::add(&mut session, &product, quantity);
        }
        Commands::Set { id, quantity } => commands::cart::set(&mut session, &id.into(), quantity),
        Commands::Remove { id } => commands::cart::remove(&mut session, &id.into()),
        Commands::Clear => commands::cart::clear(&mut session),
        Commands::Show { json } => commands::cart::show(&session, config.currency, json)?,
    }
    Ok(())
}
