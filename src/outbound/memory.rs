//! In-memory store adapter.
//!
//! Realises the [`EntityStore`] contract the domain assumes from its
//! persistence collaborator: atomic CRUD primitives, store-assigned
//! identifiers, and uniqueness enforcement on the entity's key field. Used
//! by the runnable server and by tests.

use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;

use crate::domain::ports::{EntityRecord, EntityStore, StoreError};

/// Map-backed store generic over the entity type.
pub struct InMemoryStore<E> {
    records: RwLock<BTreeMap<i64, E>>,
    next_id: AtomicI64,
}

impl<E> InMemoryStore<E> {
    /// Create an empty store; identifiers start at 1.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl<E> Default for InMemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> StoreError {
    StoreError::Backend {
        message: "store lock poisoned".into(),
    }
}

#[async_trait]
impl<E: EntityRecord> EntityStore for InMemoryStore<E> {
    type Entity = E;

    async fn get_all(&self) -> Result<Vec<E>, StoreError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<E, StoreError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        records
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::missing_id::<E>(id))
    }

    async fn get_by_key(&self, key: &str) -> Result<E, StoreError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        records
            .values()
            .find(|record| record.key() == key)
            .cloned()
            .ok_or_else(|| StoreError::missing_key::<E>(key))
    }

    async fn upsert(&self, entity: E) -> Result<E, StoreError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        let collides = records
            .values()
            .any(|other| other.key() == entity.key() && other.id() != entity.id());
        if collides {
            return Err(StoreError::duplicate_key::<E>(entity.key()));
        }

        let saved = match entity.id() {
            Some(id) => {
                records.insert(id, entity.clone());
                entity
            }
            None => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                let saved = entity.with_id(id);
                records.insert(id, saved.clone());
                saved
            }
        };
        Ok(saved)
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        records
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::missing_id::<E>(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;

    fn user(id: Option<i64>, login_name: &str) -> User {
        User::try_from_parts(id, login_name).expect("valid user")
    }

    #[tokio::test]
    async fn upsert_assigns_sequential_identifiers() {
        let store = InMemoryStore::new();
        let a = store.upsert(user(None, "alice")).await.expect("insert a");
        let b = store.upsert(user(None, "bob")).await.expect("insert b");
        assert_eq!(a.id(), Some(1));
        assert_eq!(b.id(), Some(2));
    }

    #[tokio::test]
    async fn upsert_rejects_duplicate_keys_and_leaves_store_unchanged() {
        let store = InMemoryStore::new();
        store.upsert(user(None, "alice")).await.expect("insert");

        let err = store
            .upsert(user(None, "alice"))
            .await
            .expect_err("duplicate must fail");
        assert!(matches!(err, StoreError::Duplicate { value, .. } if value == "alice"));

        let all = store.get_all().await.expect("list");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id(), Some(1));
    }

    #[tokio::test]
    async fn upsert_rejects_rename_onto_taken_key() {
        let store = InMemoryStore::new();
        store.upsert(user(None, "alice")).await.expect("insert");
        let bob = store.upsert(user(None, "bob")).await.expect("insert");

        let renamed = user(bob.id(), "alice");
        assert!(matches!(
            store.upsert(renamed).await,
            Err(StoreError::Duplicate { .. })
        ));
        // bob keeps his original login name
        let stored = store.get_by_id(bob.id().expect("id")).await.expect("get");
        assert_eq!(stored.login_name().as_ref(), "bob");
    }

    #[tokio::test]
    async fn upsert_with_id_replaces_fields_wholesale() {
        let store = InMemoryStore::new();
        let alice = store.upsert(user(None, "alice")).await.expect("insert");
        let updated = store
            .upsert(user(alice.id(), "alice2"))
            .await
            .expect("update");
        assert_eq!(updated.id(), alice.id());
        let stored = store.get_by_key("alice2").await.expect("lookup");
        assert_eq!(stored.id(), alice.id());
        assert!(store.get_by_key("alice").await.is_err());
    }

    #[tokio::test]
    async fn delete_removes_records_and_reports_missing_ones() {
        let store = InMemoryStore::new();
        let alice = store.upsert(user(None, "alice")).await.expect("insert");
        let id = alice.id().expect("id");

        store.delete(id).await.expect("delete");
        assert!(matches!(
            store.delete(id).await,
            Err(StoreError::NotFound { .. })
        ));
        assert!(store.get_by_id(id).await.is_err());
    }

    #[tokio::test]
    async fn get_all_returns_records_ordered_by_id() {
        let store = InMemoryStore::new();
        for name in ["carol", "alice", "bob"] {
            store.upsert(user(None, name)).await.expect("insert");
        }
        let ids: Vec<_> = store
            .get_all()
            .await
            .expect("list")
            .iter()
            .map(|record| record.id())
            .collect();
        assert_eq!(ids, vec![Some(1), Some(2), Some(3)]);
    }
}
