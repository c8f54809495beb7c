//! Driven port for resolving OpenStreetMap nodes by identifier.

use async_trait::async_trait;

/// Geographic attributes of a resolved OSM node.
#[derive(Debug, Clone, PartialEq)]
pub struct OsmNode {
    /// OSM node identifier.
    pub id: i64,
    /// Value of the node's `name` tag, if present.
    pub name: Option<String>,
    /// Value of the node's `description` tag, if present.
    pub description: Option<String>,
    /// Latitude in WGS84.
    pub latitude: f64,
    /// Longitude in WGS84.
    pub longitude: f64,
}

/// Errors raised by OSM source adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OsmSourceError {
    /// The source has no node with the given identifier.
    #[error("osm node {node_id} was not found")]
    NotFound { node_id: i64 },
    /// The source answered with a payload that could not be decoded.
    #[error("osm response could not be decoded: {message}")]
    Decode { message: String },
    /// The source could not be reached or answered with a failure status.
    #[error("osm request failed: {message}")]
    Transport { message: String },
}

/// Port for resolving a single OSM node.
///
/// Node identifiers are caller-controlled lookups; a missing node is a
/// caller error and is never retried.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OsmNodeSource: Send + Sync {
    /// Resolve the node with the given identifier.
    async fn get_node(&self, node_id: i64) -> Result<OsmNode, OsmSourceError>;
}
