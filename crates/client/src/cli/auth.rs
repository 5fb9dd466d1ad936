//! Demo auth CLI commands.

use clap::{Parser, Subcommand};

use crate::client::auth::DEFAULT_COOKIE_NAME;

/// Demo authentication commands.
#[derive(Debug, Parser)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub action: AuthAction,
}

/// Available auth actions.
#[derive(Debug, Subcommand)]
pub enum AuthAction {
    /// Echo Basic credentials back.
    Basic {
        #[arg(long, short)]
        username: String,
        #[arg(long, short)]
        password: String,
    },
    /// Check Basic credentials against the server's table.
    BasicUsername {
        #[arg(long, short)]
        username: String,
        #[arg(long, short)]
        password: String,
    },
    /// Resolve a static token to its user.
    Token {
        /// Value for the x-auth-token header.
        token: String,
    },
    /// Log in with a token, check the session, then log out.
    CookieFlow {
        /// Value for the x-auth-token header.
        token: String,
        /// Session cookie name.
        #[arg(long, env = "SESSION_COOKIE_NAME", default_value = DEFAULT_COOKIE_NAME)]
        cookie_name: String,
    },
}
