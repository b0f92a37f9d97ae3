//! Session persistence: the key-value storage port and the user store
//! layered on top of it.
//!
//! The backend is deliberately dumb: three operations on string values,
//! matching a browser-style session store. Everything about the persisted
//! shape (JSON envelope, timestamp, integrity hash, the fixed key) lives in
//! `UserStore`, so backends stay interchangeable.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::{self, AuthError};
use crate::session::principal::AuthenticatedUser;

/// Storage key under which the current user is persisted
pub const USER_STORAGE_KEY: &str = "ua-user";

/// Session-scoped key-value storage port
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Store a value under a key, replacing any previous value
    async fn set_item(&self, key: &str, value: String) -> Result<(), AuthError>;

    /// Retrieve the value stored under a key
    async fn get_item(&self, key: &str) -> Result<Option<String>, AuthError>;

    /// Remove the value stored under a key, if any
    async fn remove_item(&self, key: &str) -> Result<(), AuthError>;
}

/// In-memory storage backend with the same per-call atomicity as a browser
/// session store
#[derive(Default)]
pub struct MemorySessionStorage {
    items: RwLock<HashMap<String, String>>,
}

impl MemorySessionStorage {
    /// Create an empty storage backend
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStorage for MemorySessionStorage {
    async fn set_item(&self, key: &str, value: String) -> Result<(), AuthError> {
        self.items.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn get_item(&self, key: &str) -> Result<Option<String>, AuthError> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn remove_item(&self, key: &str) -> Result<(), AuthError> {
        self.items.write().await.remove(key);
        Ok(())
    }
}

/// Envelope persisted under [`USER_STORAGE_KEY`]
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredSession {
    /// The authenticated user
    user: AuthenticatedUser,
    /// When this envelope was written
    stored_at: DateTime<Utc>,
    /// Hash to verify the identity fields were not altered in storage
    integrity_hash: String,
}

/// Store for the persisted current user
pub struct UserStore {
    backend: Arc<dyn SessionStorage>,
    key: String,
}

impl UserStore {
    /// Create a user store over a storage backend
    pub fn new(backend: Arc<dyn SessionStorage>) -> Self {
        Self {
            backend,
            key: USER_STORAGE_KEY.to_string(),
        }
    }

    /// Persist the authenticated user
    pub async fn store(&self, user: &AuthenticatedUser) -> Result<(), AuthError> {
        let envelope = StoredSession {
            user: user.clone(),
            stored_at: Utc::now(),
            integrity_hash: integrity_hash(user),
        };
        let json = serde_json::to_string(&envelope).map_err(error::storage_failed)?;
        self.backend.set_item(&self.key, json).await?;

        debug!(username = %user.username, "Stored session user");
        Ok(())
    }

    /// Retrieve the persisted user.
    ///
    /// An unparsable or tampered envelope is reported as absent, not as an
    /// error; only a backend failure surfaces as `Err`.
    pub async fn retrieve(&self) -> Result<Option<AuthenticatedUser>, AuthError> {
        let raw = match self.backend.get_item(&self.key).await? {
            Some(raw) => raw,
            None => return Ok(None),
        };

        let envelope: StoredSession = match serde_json::from_str(&raw) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(error = %e, "Persisted session did not parse, treating as absent");
                return Ok(None);
            }
        };

        if integrity_hash(&envelope.user) != envelope.integrity_hash {
            warn!("Persisted session failed integrity check, treating as absent");
            return Ok(None);
        }

        Ok(Some(envelope.user))
    }

    /// Remove the persisted user, if any
    pub async fn clear(&self) -> Result<(), AuthError> {
        self.backend.remove_item(&self.key).await
    }
}

/// Calculate an integrity hash over the identity fields
fn integrity_hash(user: &AuthenticatedUser) -> String {
    let fields = format!("{}:{}:{}", user.username, user.token, user.roles.join(","));

    let mut hasher = Sha256::new();
    hasher.update(fields.as_bytes());
    format!("{:x}", hasher.finalize())
}
