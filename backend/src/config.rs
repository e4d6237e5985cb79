//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `DATA_API_*` environment variables and
//! configuration files, in OrthoConfig's usual precedence order.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::doc::{DEFAULT_PUBLIC_URL, DOCUMENTED_RESOURCE_PATH};

/// Port the service listens on unless configured otherwise.
pub const DEFAULT_PORT: u16 = 7070;

/// Settings controlling the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DATA_API")]
pub struct ServerSettings {
    /// Socket address to bind.
    pub bind_addr: Option<SocketAddr>,
    /// Prefix for the record endpoints.
    pub resource_path: Option<String>,
    /// Base URL advertised in the OpenAPI document.
    pub public_url: Option<String>,
    /// Serve Swagger UI and the OpenAPI document.
    #[ortho_config(default = true)]
    pub docs_enabled: bool,
}

impl ServerSettings {
    /// Return the bind address, defaulting to all interfaces on port 7070.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or_else(|| {
            SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, DEFAULT_PORT))
        })
    }

    /// Return the record prefix with exactly one leading slash and no
    /// trailing slash. Blank values fall back to `/data`.
    #[must_use]
    pub fn resource_path(&self) -> String {
        let trimmed = self
            .resource_path
            .as_deref()
            .map(|path| path.trim().trim_matches('/'))
            .unwrap_or_default();
        if trimmed.is_empty() {
            DOCUMENTED_RESOURCE_PATH.to_owned()
        } else {
            format!("/{trimmed}")
        }
    }

    /// Return the advertised server URL.
    #[must_use]
    pub fn public_url(&self) -> &str {
        self.public_url.as_deref().unwrap_or(DEFAULT_PUBLIC_URL)
    }
}
