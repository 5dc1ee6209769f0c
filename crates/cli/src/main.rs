//! Metriks CLI - drive the catalog widget from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog, filtered and sorted
//! mx-cli catalog --search bolt --sort name-asc
//!
//! # Print the rendered product grid instead
//! mx-cli catalog --category anchors --html
//!
//! # Work with the locally stored cart
//! mx-cli cart add 101 "Bolt M8x40"
//! mx-cli cart set 101 120
//! mx-cli cart show
//!
//! # Send an order request for the current cart
//! mx-cli order submit -n "Ivan Petrov" -e ivan@example.com -p "+7 900 123-45-67"
//! ```
//!
//! # Commands
//!
//! - `catalog` - Load the catalog page and print the visible products
//! - `cart` - Show or change the cart kept in `METRIKS_CART_PATH`
//! - `order submit` - Submit an order request for the cart
//!
//! Configuration comes from the environment (see
//! [`metriks_storefront::config`]).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use metriks_storefront::config::{LogFormat, WidgetConfig};

mod commands;

#[derive(Parser)]
#[command(name = "mx-cli")]
#[command(author, version, about = "Metriks catalog and cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the catalog and print the visible products
    Catalog {
        /// Search query (name, description, brand, SKU)
        #[arg(short, long)]
        search: Option<String>,

        /// Category id to show (`all` for every category)
        #[arg(short, long)]
        category: Option<String>,

        /// Sort order (`default`, `name-asc`, `name-desc`, `category`)
        #[arg(long, default_value = "default")]
        sort: String,

        /// Print the rendered product grid markup
        #[arg(long)]
        html: bool,
    },
    /// Show or change the stored cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Order requests
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the cart and whether it can be submitted
    Show,
    /// Add one unit of a product
    Add {
        /// Product id
        id: String,
        /// Product name shown in the cart
        name: String,
    },
    /// Remove a product from the cart
    Remove { id: String },
    /// Increase a quantity by one
    Plus { id: String },
    /// Decrease a quantity by one (removes the item at 1)
    Minus { id: String },
    /// Set a quantity from raw input (below 1 removes the item)
    Set {
        id: String,
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },
}

#[derive(Subcommand)]
enum OrderAction {
    /// Submit an order request for the stored cart
    Submit {
        /// Contact name
        #[arg(short, long)]
        name: String,

        /// Contact email
        #[arg(short, long)]
        email: String,

        /// Contact phone (at least 10 digits)
        #[arg(short, long)]
        phone: String,

        /// Free-form comment
        #[arg(short, long, default_value = "")]
        comment: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match WidgetConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::default());
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(config.log_format);

    let result: Result<(), Box<dyn std::error::Error>> = run(cli, &config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Install the tracing subscriber.
///
/// Defaults to info level for our crates if `RUST_LOG` is not set.
fn init_tracing(format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "metriks_storefront=info,metriks_cli=info".into());

    let json = format == LogFormat::Json;
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run(cli: Cli, config: &WidgetConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog {
            search,
            category,
            sort,
            html,
        } => {
            let query = commands::catalog::CatalogQuery {
                search,
                category,
                sort: sort.parse()?,
                html,
            };
            commands::catalog::show(config, &query).await?;
        }
        Commands::Cart { action } => {
            let mut cart = commands::cart::open(config)?;
            match action {
                CartAction::Show => {}
                CartAction::Add { id, name } => commands::cart::add(&mut cart, &id, &name)?,
                CartAction::Remove { id } => commands::cart::remove(&mut cart, &id)?,
                CartAction::Plus { id } => commands::cart::plus(&mut cart, &id)?,
                CartAction::Minus { id } => commands::cart::minus(&mut cart, &id)?,
                CartAction::Set { id, quantity } => commands::cart::set(&mut cart, &id, &quantity)?,
            }
            commands::cart::print(&cart);
        }
        Commands::Order { action } => match action {
            OrderAction::Submit {
                name,
                email,
                phone,
                comment,
            } => {
                let contact = commands::order::Contact {
                    name: &name,
                    email: &email,
                    phone: &phone,
                    comment: &comment,
                };
                commands::order::submit(config, &contact).await?;
            }
        },
    }
    Ok(())
}
