//! Prometheus exporter agent library.
//!
//! Attach-argument parsing, YAML configuration access, and the HTTP
//! exposition endpoint used by the `exporter-agent` binary.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::{parse_agent_args, AgentArgs, ConvertToMapAccessor, ExporterConfig, MapAccessor};
pub use http::MetricsServer;
pub use lifecycle::Shutdown;
