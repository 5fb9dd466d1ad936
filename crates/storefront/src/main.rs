mod app;
mod config;
mod demo;
mod handlers;
mod state;
mod storage;

use anyhow::Result;
use clap::{Parser, Subcommand};
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront_auth::AuthConfig;

use crate::{app::create_app, config::Config, demo::Scenario, state::AppState};

/// Storefront - Products, orders and demo authentication over HTTP
#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "8000", env = "PORT")]
    port: u16,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Seed the database with a scenario and print the resulting graphs
    Demo {
        #[arg(value_enum)]
        scenario: Scenario,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let auth_config = AuthConfig::from_env()?;
    let state = AppState::new(&config, auth_config).await?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&cli.host, cli.port, state).await,
        Command::Demo { scenario } => {
            let report = demo::run(scenario, &state).await?;
            print!("{report}");
            Ok(())
        }
    }
}

async fn serve(host: &str, port: u16, state: AppState) -> Result<()> {
    // Build the application router
    let app = create_app(state.clone());

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        // If we are given a tcp listener on listen fd 0, use that one
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        // Otherwise fall back to CLI-specified host:port
        None => {
            let addr = format!("{host}:{port}");
            TcpListener::bind(&addr).await?
        }
    };

    tracing::info!(prefix = %state.api_prefix, "listening on {}", listener.local_addr()?);

    // Run the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Sessions live for one process lifetime
    if let Err(e) = state.auth.sessions.clear().await {
        tracing::warn!(error = %e, "Failed to clear demo sessions");
    }

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_to_no_subcommand() {
        let cli = Cli::try_parse_from(["storefront"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parses_demo_scenario() {
        let cli = Cli::try_parse_from(["storefront", "demo", "m2m"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Demo {
                scenario: Scenario::M2m
            })
        ));

        assert!(Cli::try_parse_from(["storefront", "demo", "unknown"]).is_err());
    }
}
