//! Domain ports: driven collaborator contracts and driving service traits.

pub mod entity_store;
pub mod osm_source;
pub mod pos_catalogue;
pub mod user_directory;

pub use entity_store::{EntityRecord, EntityStore, StoreError};
pub use osm_source::{OsmNode, OsmNodeSource, OsmSourceError};
pub use pos_catalogue::PosCatalogue;
pub use user_directory::UserDirectory;

#[cfg(test)]
pub use osm_source::MockOsmNodeSource;
