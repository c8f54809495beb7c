//! Driving port for user operations exposed to inbound adapters.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// User operations consumed by the HTTP layer.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// All users.
    async fn get_all(&self) -> Result<Vec<User>, Error>;

    /// Fetch a user by identifier.
    async fn get_by_id(&self, id: i64) -> Result<User, Error>;

    /// Fetch a user by login name.
    async fn get_by_login_name(&self, login_name: &str) -> Result<User, Error>;

    /// Create or update a user, keyed by the presence of its identifier.
    async fn upsert(&self, user: User) -> Result<User, Error>;

    /// Delete a user by identifier.
    ///
    /// Currently a deliberate no-op: user deletion is disabled until account
    /// lifecycle rules are settled. The request is acknowledged and logged.
    async fn delete(&self, id: i64) -> Result<(), Error>;
}
