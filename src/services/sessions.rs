use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::poll::Poll;

/// Send side of one connected messaging session.
#[async_trait]
pub trait SessionClient: Send + Sync {
    async fn send_poll(&self, chat_id: &str, poll: &Poll) -> Result<(), String>;
}

/// Process-wide map from session id to its connected client. Request handlers
/// only ever read from it; entries are owned by whoever bootstraps the
/// sessions.
pub struct SessionRegistry {
    inner: RwLock<HashMap<String, Arc<dyn SessionClient>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    pub async fn insert(&self, session_id: impl Into<String>, client: Arc<dyn SessionClient>) {
        self.inner.write().await.insert(session_id.into(), client);
    }

    pub async fn get(&self, session_id: &str) -> Option<Arc<dyn SessionClient>> {
        self.inner.read().await.get(session_id).cloned()
    }
}
