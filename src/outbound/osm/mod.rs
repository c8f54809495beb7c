//! OSM outbound adapter: node resolution over the public OSM API.

mod dto;
mod http_source;

pub use http_source::OsmHttpSource;
