//! Vitrine CLI - Manage the storefront catalog, cart and preferences.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! vitrine products list --search "ui kit" --sort price-asc
//!
//! # Fill the cart
//! vitrine cart add p_0123abcd --qty 2
//! vitrine cart show
//!
//! # Manage products (admin only)
//! vitrine admin login --password "$VITRINE_ADMIN_PASSWORD"
//! vitrine products add --name "Font Pack" --price 99000 --description "Ten display fonts" --image https://example.com/fonts.png --new
//! vitrine products delete p_0123abcd
//! ```
//!
//! # Commands
//!
//! - `products` - List, show, add, edit and delete products
//! - `cart` - Show and edit the cart
//! - `admin` - Log in/out and reset all state
//! - `theme` / `topbar` - UI preferences
//!
//! State lives under `VITRINE_DATA_DIR` (default `.vitrine`) unless
//! `--data-dir` is given.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitrine_core::{ProductId, Theme};
use vitrine_storefront::Storefront;
use vitrine_storefront::config::{LogFormat, StorefrontConfig};
use vitrine_storefront::search::SortMode;

mod commands;

use commands::CommandError;
use commands::products::{ProductEdit, ProductForm};

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(author, version, about = "Vitrine storefront tools")]
struct Cli {
    /// Directory holding the persisted state (overrides `VITRINE_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse and manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Show and edit the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Admin login and maintenance
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Colour theme preference
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
    /// Announcement bar preference
    Topbar {
        #[command(subcommand)]
        action: TopbarAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List products, optionally filtered and sorted
    List {
        /// Case-insensitive text to look for in names and descriptions
        #[arg(short, long, default_value = "")]
        search: String,

        /// Sort order (`default`, `newest`, `price-asc`, `price-desc`, `name-asc`)
        #[arg(long, default_value = "default")]
        sort: SortMode,
    },
    /// Show one product
    Show { id: String },
    /// Create a product (admin only)
    Add {
        #[command(flatten)]
        form: ProductForm,
    },
    /// Edit a product; omitted fields keep their current value (admin only)
    Edit {
        id: String,

        #[command(flatten)]
        edit: ProductEdit,
    },
    /// Delete a product and remove it from the cart (admin only)
    Delete { id: String },
    /// Prepend a ready-made demo product
    Demo,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Add a product
    Add {
        id: String,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        qty: i64,
    },
    /// Remove a product
    Remove { id: String },
    /// Set the quantity of a product already in the cart
    Set {
        id: String,
        #[arg(allow_negative_numbers = true)]
        qty: i64,
    },
    /// Remove everything
    Clear,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Unlock admin operations
    Login {
        /// Admin password
        #[arg(short, long, env = "VITRINE_ADMIN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Lock admin operations
    Logout,
    /// Show whether admin operations are unlocked
    Status,
    /// Erase products, cart, theme and login, then restore defaults
    Reset,
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Show the current theme
    Show,
    /// Switch between light and dark
    Toggle,
    /// Choose a theme
    Set { theme: Theme },
}

#[derive(Subcommand)]
enum TopbarAction {
    /// Show whether the announcement bar is dismissed
    Status,
    /// Dismiss the announcement bar
    Dismiss,
}

fn main() {
    let cli = Cli::parse();

    let config = StorefrontConfig::from_env();
    init_tracing(config.as_ref().map_or(LogFormat::Pretty, |c| c.log_format));

    let result = config
        .map_err(CommandError::from)
        .and_then(|config| run(cli, config));

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing with `RUST_LOG` filtering, defaulting to `info`.
fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init(),
    }
}

fn parse_id(raw: &str) -> Result<ProductId, CommandError> {
    ProductId::parse(raw).ok_or(CommandError::EmptyProductId)
}

fn run(cli: Cli, mut config: StorefrontConfig) -> Result<(), CommandError> {
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    let mut shop = Storefront::open(&config)?;

    match cli.command {
        Commands::Products { action } => match action {
            ProductAction::List { search, sort } => {
                commands::products::list(&shop, &search, sort);
            }
            ProductAction::Show { id } => commands::products::show(&shop, &parse_id(&id)?)?,
            ProductAction::Add { form } => commands::products::add(&mut shop, form)?,
            ProductAction::Edit { id, edit } => {
                commands::products::edit(&mut shop, &parse_id(&id)?, edit)?;
            }
            ProductAction::Delete { id } => {
                commands::products::delete(&mut shop, &parse_id(&id)?)?;
            }
            ProductAction::Demo => commands::products::demo(&mut shop)?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&shop),
            CartAction::Add { id, qty } => commands::cart::add(&mut shop, &parse_id(&id)?, qty)?,
            CartAction::Remove { id } => commands::cart::remove(&mut shop, &parse_id(&id)?)?,
            CartAction::Set { id, qty } => {
                commands::cart::set_quantity(&mut shop, &parse_id(&id)?, qty)?;
            }
            CartAction::Clear => commands::cart::clear(&mut shop)?,
        },
        Commands::Admin { action } => match action {
            AdminAction::Login { password } => commands::admin::login(&mut shop, password)?,
            AdminAction::Logout => commands::admin::logout(&mut shop)?,
            AdminAction::Status => commands::admin::status(&shop),
            AdminAction::Reset => commands::admin::reset(&mut shop)?,
        },
        Commands::Theme { action } => match action {
            ThemeAction::Show => commands::preferences::show_theme(&shop),
            ThemeAction::Toggle => commands::preferences::toggle_theme(&mut shop)?,
            ThemeAction::Set { theme } => commands::preferences::set_theme(&mut shop, theme)?,
        },
        Commands::Topbar { action } => match action {
            TopbarAction::Status => commands::preferences::topbar_status(&shop),
            TopbarAction::Dismiss => commands::preferences::dismiss_topbar(&mut shop)?,
        },
    }
    Ok(())
}
