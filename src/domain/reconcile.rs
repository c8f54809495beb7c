//! Shared create-or-update reconciliation.
//!
//! Both aggregates funnel every write through [`reconcile`]: the presence of
//! an identifier classifies the operation as a creation or an update, an
//! update is admitted only after the record's existence has been confirmed,
//! and a uniqueness violation reported by the store is surfaced verbatim as
//! a conflict. The routine performs no local recovery and never retries;
//! repairing a naming collision or a stale reference is the caller's job.

use serde_json::json;
use tracing::{error, info};

use crate::domain::Error;
use crate::domain::ports::{EntityRecord, EntityStore, StoreError};

/// Persist an entity through the owning store, classifying the write by the
/// presence of its identifier.
///
/// - No identifier: a creation. No read is issued; the store assigns a fresh
///   identifier.
/// - Identifier present: an update. The record must currently exist; a
///   missing record aborts the upsert before any write and propagates as
///   NotFound. The fetched record itself is discarded.
///
/// On success the returned entity always carries an identifier; updates
/// preserve the submitted one.
pub async fn reconcile<S>(store: &S, entity: S::Entity) -> Result<S::Entity, Error>
where
    S: EntityStore + ?Sized,
{
    match EntityRecord::id(&entity) {
        None => {
            info!(kind = S::Entity::KIND, key = entity.key(), "creating record");
        }
        Some(id) => {
            info!(kind = S::Entity::KIND, id, "updating record");
            // Existence check only; the stored record is discarded.
            store.get_by_id(id).await.map_err(map_store_error)?;
        }
    }

    match store.upsert(entity).await {
        Ok(saved) => {
            info!(
                kind = S::Entity::KIND,
                id = EntityRecord::id(&saved),
                "record upserted"
            );
            Ok(saved)
        }
        Err(err @ StoreError::Duplicate { .. }) => {
            error!(kind = S::Entity::KIND, %err, "upsert rejected: unique key conflict");
            Err(map_store_error(err))
        }
        Err(err) => Err(map_store_error(err)),
    }
}

/// Map a store outcome onto the domain error taxonomy without altering its
/// identity: missing records stay NotFound, unique-key collisions stay
/// conflicts carrying the offending field and value.
pub(crate) fn map_store_error(err: StoreError) -> Error {
    let message = err.to_string();
    match err {
        StoreError::NotFound { .. } => Error::not_found(message),
        StoreError::Duplicate { field, value, .. } => Error::conflict(message).with_details(json!({
            "field": field,
            "value": value,
            "code": "duplicate_key",
        })),
        StoreError::Backend { .. } => Error::internal(message),
    }
}
