//! In-memory storage backend.
//!
//! Keeps every table behind one `Arc<RwLock<_>>` so cascading deletes and
//! existence checks see a consistent snapshot. Used by the test suite and by
//! builds with the `inmemory` feature.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! ```

mod repository;

pub use repository::InMemoryRepository;
