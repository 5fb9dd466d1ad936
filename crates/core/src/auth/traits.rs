use async_trait::async_trait;

use super::{AuthError, SessionData, SessionId};

/// Result type for auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Session storage abstraction.
///
/// Sessions never expire on their own; they live until deleted or until the
/// store is cleared.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Store a new session under a freshly generated ID.
    async fn create(&self, data: &SessionData) -> Result<SessionId>;

    /// Retrieve session data by ID.
    async fn get(&self, id: &SessionId) -> Result<Option<SessionData>>;

    /// Delete a session. Deleting an unknown ID is not an error.
    async fn delete(&self, id: &SessionId) -> Result<()>;

    /// Delete every session.
    async fn clear(&self) -> Result<()>;
}
