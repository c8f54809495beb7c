//! Reqwest-backed OSM node source adapter.
//!
//! Owns transport details only: URL construction, timeout and HTTP error
//! mapping, and JSON decoding into the domain node record.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url, header};

use super::dto::OsmNodeResponseDto;
use crate::domain::ports::{OsmNode, OsmNodeSource, OsmSourceError};

const DEFAULT_USER_AGENT: &str = "campuscoffee-backend/0.1";

/// OSM API adapter resolving single nodes via `GET /api/0.6/node/{id}.json`.
pub struct OsmHttpSource {
    client: Client,
    base: Url,
    user_agent: String,
}

impl OsmHttpSource {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        })
    }

    fn node_url(&self, node_id: i64) -> Result<Url, OsmSourceError> {
        let raw = format!(
            "{}/api/0.6/node/{node_id}.json",
            self.base.as_str().trim_end_matches('/')
        );
        Url::parse(&raw).map_err(|error| OsmSourceError::Transport {
            message: format!("invalid node URL '{raw}': {error}"),
        })
    }
}

#[async_trait]
impl OsmNodeSource for OsmHttpSource {
    async fn get_node(&self, node_id: i64) -> Result<OsmNode, OsmSourceError> {
        let url = self.node_url(node_id)?;
        let response = self
            .client
            .get(url)
            .header(header::USER_AGENT, self.user_agent.as_str())
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        // The OSM API answers 404 for unknown and 410 for deleted nodes;
        // both mean the identifier resolves to nothing usable.
        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            return Err(OsmSourceError::NotFound { node_id });
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_node(node_id, body.as_ref())
    }
}

fn parse_node(node_id: i64, body: &[u8]) -> Result<OsmNode, OsmSourceError> {
    let decoded: OsmNodeResponseDto =
        serde_json::from_slice(body).map_err(|error| OsmSourceError::Decode {
            message: format!("invalid OSM JSON payload: {error}"),
        })?;
    decoded.into_node(node_id)
}

fn map_transport_error(error: reqwest::Error) -> OsmSourceError {
    OsmSourceError::Transport {
        message: error.to_string(),
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> OsmSourceError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    };
    OsmSourceError::Transport { message }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
