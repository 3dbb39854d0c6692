use clap::{Args, Parser, Subcommand};

use crate::model::{Currency, ItemStatus};

#[derive(Parser)]
#[command(name = "stock", about = concat!("stockroom v", env!("CARGO_PKG_VERSION"), " - warehouse intake from the terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use the built-in demo catalog instead of the configured API
    #[arg(long, global = true)]
    pub demo: bool,

    /// Path to stockroom.toml (default: search upwards from the current directory)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List suppliers, optionally filtered by a search query
    Suppliers(LookupArgs),
    /// List products, optionally filtered by a search query
    Products(LookupArgs),
    /// List warehouse items, optionally filtered by a search query
    Items(LookupArgs),
    /// Add a warehouse item (same validation as the interactive form)
    Add(AddArgs),
    /// Edit a warehouse item; with no field flags, opens the edit form
    Edit(EditArgs),
    /// Show the effective configuration
    Config,
}

#[derive(Args)]
pub struct LookupArgs {
    /// Search text sent as ?query=
    pub query: Option<String>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Product name
    #[arg(long)]
    pub name: Option<String>,
    /// Number of units (optional)
    #[arg(long)]
    pub quantity: Option<String>,
    /// Purchase price per unit
    #[arg(long)]
    pub price: Option<String>,
    /// Currency of the price (USD or UZS)
    #[arg(long)]
    pub currency: Option<Currency>,
    /// Supplier name
    #[arg(long)]
    pub supplier: Option<String>,
    /// Serial numbers, one per line
    #[arg(long)]
    pub serials: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Warehouse item id
    pub id: u64,
    /// Product name
    #[arg(long)]
    pub name: Option<String>,
    /// Purchase price per unit
    #[arg(long)]
    pub price: Option<String>,
    /// Currency of the price (USD or UZS)
    #[arg(long)]
    pub currency: Option<Currency>,
    /// Supplier name
    #[arg(long)]
    pub supplier: Option<String>,
    /// IN_STOCK, SOLD or REFUND
    #[arg(long)]
    pub status: Option<ItemStatus>,
    /// Serial number ("" clears it)
    #[arg(long)]
    pub serial: Option<String>,
}

impl EditArgs {
    /// True when any field flag was given
    pub fn has_changes(&self) -> bool {
        self.name.is_some()
            || self.price.is_some()
            || self.currency.is_some()
            || self.supplier.is_some()
            || self.status.is_some()
            || self.serial.is_some()
    }
}
