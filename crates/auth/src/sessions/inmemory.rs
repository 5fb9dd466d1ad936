//! In-memory session storage.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use storefront_core::auth::{
    generate_session_id, Result, SessionData, SessionId, SessionRepository,
};

/// In-memory session store.
///
/// Sessions live in a HashMap wrapped in `Arc<RwLock<_>>` and are lost when
/// the store is dropped.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SessionData>>>,
}

impl SessionStore {
    /// Creates a new empty in-memory session store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for SessionStore {
    async fn create(&self, data: &SessionData) -> Result<SessionId> {
        let mut sessions = self.sessions.write().await;
        let mut id = generate_session_id();
        while sessions.contains_key(&id) {
            id = generate_session_id();
        }
        sessions.insert(id.clone(), data.clone());
        Ok(id)
    }

    async fn get(&self, id: &SessionId) -> Result<Option<SessionData>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(id).cloned())
    }

    async fn delete(&self, id: &SessionId) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(id);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_session_create_and_get() {
        let store = SessionStore::new();
        let data = SessionData::new("admin", 1_700_000_000);

        let id = store.create(&data).await.unwrap();

        assert_eq!(id.as_str().len(), 32);
        assert_eq!(store.get(&id).await.unwrap(), Some(data));
    }

    #[tokio::test]
    async fn test_session_get_nonexistent() {
        let store = SessionStore::new();
        let result = store
            .get(&SessionId::new("nonexistent".to_string()))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_session_delete() {
        let store = SessionStore::new();
        let id = store
            .create(&SessionData::new("admin", 1))
            .await
            .unwrap();

        store.delete(&id).await.unwrap();

        assert!(store.get(&id).await.unwrap().is_none());
        // Deleting twice is fine.
        store.delete(&id).await.unwrap();
    }

    #[tokio::test]
    async fn test_clear_removes_all_sessions() {
        let store = SessionStore::new();
        let a = store.create(&SessionData::new("admin", 1)).await.unwrap();
        let b = store.create(&SessionData::new("eggs", 2)).await.unwrap();
        assert_ne!(a, b);

        store.clear().await.unwrap();

        assert!(store.get(&a).await.unwrap().is_none());
        assert!(store.get(&b).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_logins_get_distinct_sessions() {
        let store = SessionStore::new();
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .create(&SessionData::new(format!("user-{i}"), i))
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        ids.dedup();
        assert_eq!(ids.len(), 16);
    }
}
