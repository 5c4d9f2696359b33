//! Configuration schema definitions.
//!
//! The agent's YAML document is read through [`MapAccessor`](super::accessor::MapAccessor)
//! lookups rather than a derived deserializer, so keys that belong to
//! collectors are left alone. These types hold the values the agent itself uses.

/// Root configuration for the exporter agent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExporterConfig {
    /// Seconds to wait before starting the HTTP server.
    pub start_delay_seconds: u64,

    /// HTTP exposition endpoint settings.
    pub http_server: HttpServerConfig,
}

/// Settings under `/httpServer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpServerConfig {
    /// Basic authentication required for every request, if configured.
    pub authentication: Option<BasicAuthConfig>,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl HttpServerConfig {
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            authentication: None,
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Credentials under `/httpServer/authentication/basic`.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuthConfig {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for BasicAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuthConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
