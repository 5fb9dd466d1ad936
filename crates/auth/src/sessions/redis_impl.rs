//! Redis session storage implementation.

use async_trait::async_trait;
use fred::prelude::*;
use storefront_core::auth::{
    generate_session_id, AuthError, Result, SessionData, SessionId, SessionRepository,
};

const SESSION_INDEX_KEY: &str = "demo_sessions";

/// Redis-backed session storage.
///
/// Every session ID is also tracked in a set so `clear` can remove the
/// sessions without scanning the keyspace.
pub struct SessionStore {
    pool: Pool,
}

impl SessionStore {
    /// Creates a new Redis session store.
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    fn session_key(id: &str) -> String {
        format!("demo_session:{}", id)
    }
}

#[async_trait]
impl SessionRepository for SessionStore {
    async fn create(&self, data: &SessionData) -> Result<SessionId> {
        let id = generate_session_id();
        let key = Self::session_key(id.as_str());
        let value = serde_json::to_string(data).map_err(|e| AuthError::Storage(e.to_string()))?;

        self.pool
            .set::<(), _, _>(&key, &value, None, None, false)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        self.pool
            .sadd::<(), _, _>(SESSION_INDEX_KEY, id.as_str())
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        Ok(id)
    }

    async fn get(&self, id: &SessionId) -> Result<Option<SessionData>> {
        let key = Self::session_key(id.as_str());
        let value: Option<String> = self
            .pool
            .get(&key)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        match value {
            Some(json) => {
                let data: SessionData =
                    serde_json::from_str(&json).map_err(|e| AuthError::Storage(e.to_string()))?;
                Ok(Some(data))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &SessionId) -> Result<()> {
        let key = Self::session_key(id.as_str());
        self.pool
            .del::<(), _>(&key)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        self.pool
            .srem::<(), _, _>(SESSION_INDEX_KEY, id.as_str())
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let ids: Vec<String> = self
            .pool
            .smembers(SESSION_INDEX_KEY)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        for id in &ids {
            self.pool
                .del::<(), _>(Self::session_key(id))
                .await
                .map_err(|e| AuthError::Storage(e.to_string()))?;
        }

        self.pool
            .del::<(), _>(SESSION_INDEX_KEY)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        tracing::debug!(count = ids.len(), "Cleared Redis sessions");
        Ok(())
    }
}
