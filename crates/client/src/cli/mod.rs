//! CLI command definitions.

pub mod auth;
pub mod health;
pub mod orders;
pub mod products;

use clap::{Parser, Subcommand, ValueEnum};

/// CLI client for the storefront API.
#[derive(Debug, Parser)]
#[command(name = "storefront-client")]
#[command(about = "CLI client for the storefront API", long_about = None)]
pub struct Cli {
    /// Server base URL.
    #[arg(long, env = "STOREFRONT_URL", default_value = "http://localhost:8000")]
    pub base_url: String,

    /// Prefix the versioned API is mounted under.
    #[arg(long, env = "API_V1_PREFIX", default_value = "/api/v1")]
    pub api_prefix: String,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Product catalog management.
    Products(products::ProductsCommand),
    /// Orders and their lines.
    Orders(orders::OrdersCommand),
    /// Demo authentication schemes.
    Auth(auth::AuthCommand),
    /// Liveness, greeting and calculator endpoints.
    Health(health::HealthCommand),
}
