//! DTOs for decoding OSM API node responses.
//!
//! The adapter decodes into these transport DTOs first, then maps into the
//! domain [`OsmNode`] record in one pass.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::ports::{OsmNode, OsmSourceError};

#[derive(Debug, Deserialize)]
pub(super) struct OsmNodeResponseDto {
    #[serde(default)]
    pub(super) elements: Vec<OsmElementDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OsmElementDto {
    #[serde(rename = "type")]
    pub(super) element_type: String,
    pub(super) id: i64,
    pub(super) lat: Option<f64>,
    pub(super) lon: Option<f64>,
    #[serde(default)]
    pub(super) tags: BTreeMap<String, String>,
}

impl OsmNodeResponseDto {
    pub(super) fn into_node(self, node_id: i64) -> Result<OsmNode, OsmSourceError> {
        let element = self
            .elements
            .into_iter()
            .find(|element| element.element_type == "node" && element.id == node_id)
            .ok_or_else(|| OsmSourceError::Decode {
                message: format!("response contains no node element with id {node_id}"),
            })?;
        element.into_node()
    }
}

impl OsmElementDto {
    fn into_node(self) -> Result<OsmNode, OsmSourceError> {
        let (Some(latitude), Some(longitude)) = (self.lat, self.lon) else {
            return Err(OsmSourceError::Decode {
                message: format!("node {} is missing coordinates", self.id),
            });
        };
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(OsmSourceError::Decode {
                message: format!("node {} has non-finite coordinates", self.id),
            });
        }

        let mut tags = self.tags;
        Ok(OsmNode {
            id: self.id,
            name: tags.remove("name"),
            description: tags.remove("description"),
            latitude,
            longitude,
        })
    }
}
