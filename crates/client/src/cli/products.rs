//! Product CLI commands.

use clap::{Parser, Subcommand};

/// Product management commands.
#[derive(Debug, Parser)]
pub struct ProductsCommand {
    #[command(subcommand)]
    pub action: ProductsAction,
}

/// Available product actions.
#[derive(Debug, Subcommand)]
pub enum ProductsAction {
    /// List all products.
    List,
    /// Create a new product.
    Create {
        /// Product name.
        #[arg(long)]
        name: String,
        /// Product description.
        #[arg(long, default_value = "")]
        description: String,
        /// Price in whole units.
        #[arg(long)]
        price: i64,
    },
    /// Get product by ID.
    Get {
        /// Product ID.
        id: i64,
    },
    /// Replace every field of a product.
    Update {
        /// Product ID.
        id: i64,
        /// New name.
        #[arg(long)]
        name: String,
        /// New description.
        #[arg(long)]
        description: String,
        /// New price.
        #[arg(long)]
        price: i64,
    },
    /// Change only the given fields of a product.
    Patch {
        /// Product ID.
        id: i64,
        /// New name.
        #[arg(long)]
        name: Option<String>,
        /// New description.
        #[arg(long)]
        description: Option<String>,
        /// New price.
        #[arg(long)]
        price: Option<i64>,
    },
    /// Delete product by ID.
    Delete {
        /// Product ID.
        id: i64,
    },
    /// Show the orders a product appears on.
    Orders {
        /// Product ID.
        id: i64,
    },
}
