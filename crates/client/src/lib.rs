//! storefront_client - CLI client for the storefront API.

pub mod cli;
pub mod client;
pub mod error;
pub mod output;

pub use client::StorefrontClient;
pub use error::{ClientError, Result};
