//! Commands for the endpoints outside the API prefix.

use clap::{Parser, Subcommand};

/// Liveness and greeting endpoints.
#[derive(Debug, Parser)]
pub struct HealthCommand {
    #[command(subcommand)]
    pub action: HealthAction,
}

#[derive(Debug, Subcommand)]
pub enum HealthAction {
    /// Liveness probe.
    Livez,
    /// Readiness probe.
    Readyz,
    /// Fetch the index greeting.
    Index,
    /// Greet someone by name.
    Hello {
        /// Name to greet (server default: "world").
        #[arg(long)]
        name: Option<String>,
    },
    /// Add two integers on the server.
    Add {
        #[arg(allow_negative_numbers = true)]
        a: i64,
        #[arg(allow_negative_numbers = true)]
        b: i64,
    },
}
