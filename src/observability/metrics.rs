//! Metrics registry and exposition.
//!
//! # Metrics
//! - `exporter_agent_build_info` (gauge): always 1, labelled with `name` and `version`
//!
//! Anything else recorded through the `metrics` facade shows up on the
//! scrape endpoint once [`install_recorder`] has run.

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

pub const BUILD_INFO: &str = "exporter_agent_build_info";

/// Install the global Prometheus recorder and return a handle for rendering.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    tracing::debug!("Prometheus recorder installed");
    Ok(handle)
}

/// Publish the build-info gauge on the current recorder.
pub fn register_build_info() {
    metrics::describe_gauge!(
        BUILD_INFO,
        "A metric with a constant '1' value labeled with the agent's name and version"
    );
    metrics::gauge!(
        BUILD_INFO,
        "name" => env!("CARGO_PKG_NAME"),
        "version" => env!("CARGO_PKG_VERSION")
    )
    .set(1.0);
}
