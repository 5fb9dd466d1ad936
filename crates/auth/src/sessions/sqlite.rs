//! SQLite session storage implementation.

use async_trait::async_trait;
use sqlx::SqlitePool;
use storefront_core::auth::{
    generate_session_id, AuthError, Result, SessionData, SessionId, SessionRepository,
};

/// SQLite-backed session storage.
pub struct SessionStore {
    pool: SqlitePool,
}

impl SessionStore {
    /// Creates a new SQLite session store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates the sessions table if it does not exist.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS demo_sessions (
                id TEXT PRIMARY KEY,
                username TEXT NOT NULL,
                login_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::Storage(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl SessionRepository for SessionStore {
    async fn create(&self, data: &SessionData) -> Result<SessionId> {
        let id = generate_session_id();
        sqlx::query("INSERT INTO demo_sessions (id, username, login_at) VALUES (?, ?, ?)")
            .bind(id.as_str())
            .bind(&data.username)
            .bind(data.login_at)
            .execute(&self.pool)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        Ok(id)
    }

    async fn get(&self, id: &SessionId) -> Result<Option<SessionData>> {
        let row = sqlx::query_as::<_, (String, i64)>(
            "SELECT username, login_at FROM demo_sessions WHERE id = ?",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::Storage(e.to_string()))?;

        Ok(row.map(|(username, login_at)| SessionData { username, login_at }))
    }

    async fn delete(&self, id: &SessionId) -> Result<()> {
        sqlx::query("DELETE FROM demo_sessions WHERE id = ?")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        sqlx::query("DELETE FROM demo_sessions")
            .execute(&self.pool)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn store() -> SessionStore {
        // A single connection keeps every query on the same in-memory database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let store = SessionStore::new(pool);
        store.migrate().await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_create_get_delete() {
        let store = store().await;
        let data = SessionData::new("admin", 1_700_000_000);

        let id = store.create(&data).await.unwrap();
        assert_eq!(store.get(&id).await.unwrap(), Some(data));

        store.delete(&id).await.unwrap();
        assert!(store.get(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear() {
        let store = store().await;
        let id = store.create(&SessionData::new("eggs", 1)).await.unwrap();

        store.clear().await.unwrap();

        assert!(store.get(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let store = store().await;
        store.migrate().await.unwrap();
    }
}
