//! Driven port for entity persistence.
//!
//! Both aggregates (users and points of sale) share one persistence shape:
//! lookup by identifier, lookup by unique key, an insert-or-replace upsert
//! primitive, and deletion. The reconciliation routine in
//! [`crate::domain::reconcile`] is written once against this capability set
//! and instantiated per entity type.

use async_trait::async_trait;

/// Behaviour an entity must expose to be persisted through [`EntityStore`]
/// and reconciled generically.
pub trait EntityRecord: Clone + Send + Sync + 'static {
    /// Entity kind used in logs and store diagnostics.
    const KIND: &'static str;
    /// JSON field name of the unique key, surfaced in conflict details.
    const KEY_FIELD: &'static str;

    /// Store-assigned identifier; `None` for a not-yet-persisted record.
    fn id(&self) -> Option<i64>;

    /// Return the record with the given identifier assigned.
    fn with_id(self, id: i64) -> Self;

    /// Value of the unique key field.
    fn key(&self) -> &str;
}

/// Errors raised by store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No record matches the given selector.
    #[error("no {kind} record matching {selector}")]
    NotFound { kind: &'static str, selector: String },
    /// The write would collide with another record's unique key.
    #[error("{kind} {field} '{value}' already exists")]
    Duplicate {
        kind: &'static str,
        field: &'static str,
        value: String,
    },
    /// The backing store itself failed.
    #[error("store backend failure: {message}")]
    Backend { message: String },
}

impl StoreError {
    /// NotFound selector for an id lookup.
    pub fn missing_id<E: EntityRecord>(id: i64) -> Self {
        Self::NotFound {
            kind: E::KIND,
            selector: format!("id {id}"),
        }
    }

    /// NotFound selector for a unique-key lookup.
    pub fn missing_key<E: EntityRecord>(key: &str) -> Self {
        Self::NotFound {
            kind: E::KIND,
            selector: format!("{} '{key}'", E::KEY_FIELD),
        }
    }

    /// Duplicate conflict on the entity's unique key.
    pub fn duplicate_key<E: EntityRecord>(value: impl Into<String>) -> Self {
        Self::Duplicate {
            kind: E::KIND,
            field: E::KEY_FIELD,
            value: value.into(),
        }
    }
}

/// Persistence capability set consumed by the domain services.
///
/// The upsert primitive inserts when the record carries no identifier,
/// assigning a fresh one, and replaces wholesale when it does. It fails with
/// [`StoreError::Duplicate`] when the unique key would collide with a
/// different record, leaving the store unchanged.
#[async_trait]
pub trait EntityStore: Send + Sync {
    type Entity: EntityRecord;

    /// All records, ordered by identifier.
    async fn get_all(&self) -> Result<Vec<Self::Entity>, StoreError>;

    /// Fetch a record by identifier.
    async fn get_by_id(&self, id: i64) -> Result<Self::Entity, StoreError>;

    /// Fetch a record by its unique key.
    async fn get_by_key(&self, key: &str) -> Result<Self::Entity, StoreError>;

    /// Insert or replace a record, returning the canonical persisted form.
    async fn upsert(&self, entity: Self::Entity) -> Result<Self::Entity, StoreError>;

    /// Remove a record by identifier.
    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}
