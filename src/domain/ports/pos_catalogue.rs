//! Driving port for point-of-sale operations exposed to inbound adapters.

use async_trait::async_trait;

use crate::domain::{CampusType, Error, Pos};

/// Point-of-sale operations consumed by the HTTP layer.
#[async_trait]
pub trait PosCatalogue: Send + Sync {
    /// All points of sale.
    async fn get_all(&self) -> Result<Vec<Pos>, Error>;

    /// Fetch a POS by identifier.
    async fn get_by_id(&self, id: i64) -> Result<Pos, Error>;

    /// Fetch a POS by display name.
    async fn get_by_name(&self, name: &str) -> Result<Pos, Error>;

    /// Create or update a POS, keyed by the presence of its identifier.
    async fn upsert(&self, pos: Pos) -> Result<Pos, Error>;

    /// Delete a POS by identifier; fails NotFound when absent.
    async fn delete(&self, id: i64) -> Result<(), Error>;

    /// Import a new POS from an OSM node.
    ///
    /// Every import is a creation attempt; imports never mutate an existing
    /// POS. A node whose name collides with an existing POS fails with the
    /// same duplication conflict as any other create.
    async fn import_from_osm_node(&self, node_id: i64, campus_type: CampusType)
    -> Result<Pos, Error>;
}
