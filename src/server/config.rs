//! Server configuration parsed from the command line and environment.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use url::Url;

/// Runtime configuration for the HTTP server.
#[derive(Debug, Parser)]
#[command(name = "campuscoffee", about = "Campus coffee point-of-sale API server")]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind_addr: SocketAddr,

    /// Base URL of the OpenStreetMap API used for node imports.
    #[arg(long, env = "OSM_API_BASE", default_value = "https://api.openstreetmap.org")]
    pub osm_api_base: Url,

    /// Request timeout for OpenStreetMap lookups, in seconds.
    #[arg(long, env = "OSM_TIMEOUT_SECS", default_value_t = 30)]
    pub osm_timeout_secs: u64,
}

impl ServerConfig {
    /// OSM request timeout as a [`Duration`].
    #[must_use]
    pub fn osm_timeout(&self) -> Duration {
        Duration::from_secs(self.osm_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_all_settings() {
        let config = ServerConfig::parse_from(["campuscoffee"]);
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.osm_api_base.as_str(), "https://api.openstreetmap.org/");
        assert_eq!(config.osm_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn flags_override_defaults() {
        let config = ServerConfig::parse_from([
            "campuscoffee",
            "--bind-addr",
            "127.0.0.1:9090",
            "--osm-api-base",
            "http://localhost:3001",
            "--osm-timeout-secs",
            "5",
        ]);
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:9090");
        assert_eq!(config.osm_api_base.as_str(), "http://localhost:3001/");
        assert_eq!(config.osm_timeout(), Duration::from_secs(5));
    }
}
