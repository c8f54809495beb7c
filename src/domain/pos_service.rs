//! Point-of-sale domain service implementing the [`PosCatalogue`] driving
//! port, including the OSM import pipeline.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{EntityStore, OsmNode, OsmNodeSource, OsmSourceError, PosCatalogue};
use crate::domain::reconcile::{map_store_error, reconcile};
use crate::domain::{CampusType, Error, Pos, PosName, Position};

/// POS service backed by an entity store and an OSM node source.
#[derive(Clone)]
pub struct PosCatalogueService<S, O> {
    store: Arc<S>,
    osm: Arc<O>,
}

impl<S, O> PosCatalogueService<S, O> {
    /// Create a new service with the given collaborators.
    pub fn new(store: Arc<S>, osm: Arc<O>) -> Self {
        Self { store, osm }
    }
}

#[async_trait]
impl<S, O> PosCatalogue for PosCatalogueService<S, O>
where
    S: EntityStore<Entity = Pos>,
    O: OsmNodeSource,
{
    async fn get_all(&self) -> Result<Vec<Pos>, Error> {
        debug!("retrieving all pos");
        self.store.get_all().await.map_err(map_store_error)
    }

    async fn get_by_id(&self, id: i64) -> Result<Pos, Error> {
        debug!(id, "retrieving pos");
        self.store.get_by_id(id).await.map_err(map_store_error)
    }

    async fn get_by_name(&self, name: &str) -> Result<Pos, Error> {
        debug!(name, "retrieving pos by name");
        self.store.get_by_key(name).await.map_err(map_store_error)
    }

    async fn upsert(&self, pos: Pos) -> Result<Pos, Error> {
        reconcile(self.store.as_ref(), pos).await
    }

    async fn delete(&self, id: i64) -> Result<(), Error> {
        info!(id, "deleting pos");
        self.store.delete(id).await.map_err(map_store_error)
    }

    async fn import_from_osm_node(
        &self,
        node_id: i64,
        campus_type: CampusType,
    ) -> Result<Pos, Error> {
        info!(node_id, ?campus_type, "importing pos from osm node");
        let node = self.osm.get_node(node_id).await.map_err(map_osm_error)?;
        // The constructed POS carries no identifier, so the shared
        // reconciliation always treats an import as a creation.
        let pos = pos_from_node(node, campus_type)?;
        reconcile(self.store.as_ref(), pos).await
    }
}

fn pos_from_node(node: OsmNode, campus_type: CampusType) -> Result<Pos, Error> {
    let name = node
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| Error::invalid_request(format!("osm node {} has no name tag", node.id)))?;
    let name = PosName::new(name)
        .map_err(|err| Error::invalid_request(format!("osm node {} name: {err}", node.id)))?;
    let position = Position::new(node.latitude, node.longitude)
        .map_err(|err| Error::invalid_request(format!("osm node {}: {err}", node.id)))?;

    Ok(Pos::new(
        None,
        name,
        node.description.unwrap_or_default(),
        position,
        campus_type,
    ))
}

fn map_osm_error(err: OsmSourceError) -> Error {
    let message = err.to_string();
    match err {
        OsmSourceError::NotFound { .. } => Error::not_found(message),
        OsmSourceError::Decode { .. } => Error::invalid_request(message),
        OsmSourceError::Transport { .. } => Error::service_unavailable(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockOsmNodeSource;
    use crate::outbound::memory::InMemoryStore;

    fn node(id: i64, name: Option<&str>) -> OsmNode {
        OsmNode {
            id,
            name: name.map(str::to_owned),
            description: None,
            latitude: 49.41,
            longitude: 8.71,
        }
    }

    fn service_with(
        osm: MockOsmNodeSource,
    ) -> PosCatalogueService<InMemoryStore<Pos>, MockOsmNodeSource> {
        PosCatalogueService::new(Arc::new(InMemoryStore::new()), Arc::new(osm))
    }

    fn pos(id: Option<i64>, name: &str) -> Pos {
        Pos::new(
            id,
            PosName::new(name).expect("valid name"),
            "",
            Position::new(49.41, 8.71).expect("valid position"),
            CampusType::North,
        )
    }

    #[tokio::test]
    async fn import_creates_new_pos_with_assigned_id() {
        let mut osm = MockOsmNodeSource::new();
        osm.expect_get_node()
            .times(1)
            .return_once(|node_id| Ok(node(node_id, Some("Central Café"))));

        let service = service_with(osm);
        let imported = service
            .import_from_osm_node(555, CampusType::North)
            .await
            .expect("import succeeds");

        assert!(imported.id().is_some());
        assert_eq!(imported.name().as_ref(), "Central Café");
        assert_eq!(imported.campus_type(), CampusType::North);
        assert_eq!(imported.position().latitude(), 49.41);
        assert_eq!(imported.position().longitude(), 8.71);
    }

    #[tokio::test]
    async fn import_never_mutates_an_existing_pos() {
        let mut osm = MockOsmNodeSource::new();
        osm.expect_get_node()
            .times(1)
            .return_once(|node_id| Ok(node(node_id, Some("Kiosk"))));

        let service = service_with(osm);
        let existing = service.upsert(pos(None, "Library Bar")).await.expect("seed");

        let imported = service
            .import_from_osm_node(1, CampusType::West)
            .await
            .expect("import succeeds");
        assert_ne!(imported.id(), existing.id());
    }

    #[tokio::test]
    async fn import_of_missing_node_fails_without_persisting() {
        let mut osm = MockOsmNodeSource::new();
        osm.expect_get_node()
            .times(1)
            .return_once(|node_id| Err(OsmSourceError::NotFound { node_id }));

        let service = service_with(osm);
        let err = service
            .import_from_osm_node(404, CampusType::South)
            .await
            .expect_err("import must fail");
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(
            service
                .get_all()
                .await
                .expect("list succeeds")
                .is_empty()
        );
    }

    #[tokio::test]
    async fn import_with_colliding_name_fails_with_conflict() {
        let mut osm = MockOsmNodeSource::new();
        osm.expect_get_node()
            .times(1)
            .return_once(|node_id| Ok(node(node_id, Some("Central Café"))));

        let service = service_with(osm);
        service.upsert(pos(None, "Central Café")).await.expect("seed");

        let err = service
            .import_from_osm_node(555, CampusType::North)
            .await
            .expect_err("import must fail");
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(
            service.get_all().await.expect("list succeeds").len(),
            1,
            "losing import must not persist anything"
        );
    }

    #[tokio::test]
    async fn import_rejects_nodes_without_a_name_tag() {
        let mut osm = MockOsmNodeSource::new();
        osm.expect_get_node()
            .times(1)
            .return_once(|node_id| Ok(node(node_id, None)));

        let service = service_with(osm);
        let err = service
            .import_from_osm_node(7, CampusType::East)
            .await
            .expect_err("import must fail");
        assert_eq!(err.code, ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn transport_failures_surface_as_service_unavailable() {
        let mut osm = MockOsmNodeSource::new();
        osm.expect_get_node().times(1).return_once(|_| {
            Err(OsmSourceError::Transport {
                message: "connect timeout".into(),
            })
        });

        let service = service_with(osm);
        let err = service
            .import_from_osm_node(7, CampusType::East)
            .await
            .expect_err("import must fail");
        assert_eq!(err.code, ErrorCode::ServiceUnavailable);
    }

    #[tokio::test]
    async fn delete_propagates_missing_records() {
        let osm = MockOsmNodeSource::new();
        let service = service_with(osm);
        let err = service.delete(42).await.expect_err("must fail");
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
