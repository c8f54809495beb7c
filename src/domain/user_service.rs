//! User domain service implementing the [`UserDirectory`] driving port.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{EntityStore, UserDirectory};
use crate::domain::reconcile::{map_store_error, reconcile};
use crate::domain::{Error, User};

/// User service backed by an entity store.
#[derive(Clone)]
pub struct UserDirectoryService<S> {
    store: Arc<S>,
}

impl<S> UserDirectoryService<S> {
    /// Create a new service with the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> UserDirectory for UserDirectoryService<S>
where
    S: EntityStore<Entity = User>,
{
    async fn get_all(&self) -> Result<Vec<User>, Error> {
        debug!("retrieving all users");
        self.store.get_all().await.map_err(map_store_error)
    }

    async fn get_by_id(&self, id: i64) -> Result<User, Error> {
        debug!(id, "retrieving user");
        self.store.get_by_id(id).await.map_err(map_store_error)
    }

    async fn get_by_login_name(&self, login_name: &str) -> Result<User, Error> {
        debug!(login_name, "retrieving user by login name");
        self.store
            .get_by_key(login_name)
            .await
            .map_err(map_store_error)
    }

    async fn upsert(&self, user: User) -> Result<User, Error> {
        reconcile(self.store.as_ref(), user).await
    }

    async fn delete(&self, id: i64) -> Result<(), Error> {
        // User deletion is intentionally disabled; acknowledge and log.
        warn!(id, "user deletion requested but deletion is disabled");
        Ok(())
    }
}
