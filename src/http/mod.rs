//! HTTP exposition subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, trace + timeout layers)
//!     → auth.rs (Basic credentials check, when configured)
//!     → /metrics, / (Prometheus text format)
//!     → /-/healthy (liveness)
//! ```

pub mod auth;
pub mod server;

pub use server::{MetricsServer, PROMETHEUS_CONTENT_TYPE};
