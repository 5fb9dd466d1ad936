//! Order CLI commands.

use clap::{Parser, Subcommand};

/// Order management commands.
#[derive(Debug, Parser)]
pub struct OrdersCommand {
    #[command(subcommand)]
    pub action: OrdersAction,
}

/// Available order actions.
#[derive(Debug, Subcommand)]
pub enum OrdersAction {
    /// List all orders with their lines.
    List,
    /// Create a new order.
    Create {
        /// Promotional code.
        #[arg(long)]
        promocode: Option<String>,
    },
    /// Get an order with its lines.
    Get {
        /// Order ID.
        id: i64,
    },
    /// Delete order by ID.
    Delete {
        /// Order ID.
        id: i64,
    },
    /// Add a product to an order, or increase its count.
    AddProduct {
        /// Order ID.
        order_id: i64,
        /// Product ID.
        #[arg(long)]
        product_id: i64,
        /// Units to add.
        #[arg(long, default_value_t = 1)]
        count: i64,
    },
}
