//! Functional core for storefront.
//!
//! Pure data types, validation and graph assembly shared by the server, the
//! auth crate and the CLI client. Nothing in here performs I/O; storage and
//! session backends implement the traits declared in [`storage`] and [`auth`].

pub mod accounts;
#[cfg(feature = "auth")]
pub mod auth;
pub mod catalog;
pub mod orders;
pub mod serde;
pub mod storage;
