//! Startup orchestration.
//!
//! # Responsibilities
//! - Parse the attach argument and load the configuration it points at
//! - Install the metrics recorder and register the build-info collector
//! - Bind the exposition listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal and returned to `main`
//! - Only `main` decides exit status; nothing here exits the process
//! - The listener binds last (scrapes only once everything is registered),
//!   after the configured start delay

use std::io;
use std::path::Path;
use std::time::Duration;

use metrics_exporter_prometheus::{BuildError, PrometheusHandle};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::config::{
    load_config, parse_agent_args, AgentArgs, ArgsError, ConfigError, ExporterConfig,
};
use crate::http::MetricsServer;
use crate::observability::metrics;

/// Errors that abort agent startup.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Args(#[from] ArgsError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to install metrics recorder: {0}")]
    Metrics(#[from] BuildError),

    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: std::net::SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("HTTP server error: {0}")]
    Server(#[source] io::Error),
}

/// Parsed arguments plus the configuration they point at.
#[derive(Debug)]
pub struct Bootstrap {
    args: AgentArgs,
    config: ExporterConfig,
}

impl Bootstrap {
    /// Parse `agent_argument` and load its configuration file.
    pub fn prepare(agent_argument: &str, default_interface: &str) -> Result<Self, AgentError> {
        let args = parse_agent_args(agent_argument, default_interface)?;
        let config = load_config(Path::new(args.file_path()))?;
        Ok(Self { args, config })
    }

    pub fn args(&self) -> &AgentArgs {
        &self.args
    }

    pub fn config(&self) -> &ExporterConfig {
        &self.config
    }

    /// Wait out `startDelaySeconds`, then bind the resolved address and serve
    /// until shutdown.
    ///
    /// Nothing listens during the delay, so early scrapes are refused rather
    /// than queued.
    pub async fn start(
        self,
        handle: PrometheusHandle,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), AgentError> {
        if self.config.start_delay_seconds > 0 {
            tracing::info!(
                seconds = self.config.start_delay_seconds,
                "Delaying HTTP server start"
            );
            tokio::time::sleep(Duration::from_secs(self.config.start_delay_seconds)).await;
        }

        let address = self.args.resolved_address();
        let listener = TcpListener::bind(address)
            .await
            .map_err(|source| AgentError::Bind { address, source })?;

        self.serve(listener, handle, shutdown).await
    }

    /// Serve on an already-bound listener, without any start delay.
    pub async fn serve(
        self,
        listener: TcpListener,
        handle: PrometheusHandle,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), AgentError> {
        MetricsServer::new(&self.config.http_server, handle)
            .run(listener, shutdown)
            .await
            .map_err(AgentError::Server)
    }
}

/// Run the agent for `agent_argument` until shutdown.
///
/// Installs the global metrics recorder, so this may only be called once per process.
pub async fn run(
    agent_argument: &str,
    default_interface: &str,
    shutdown: broadcast::Receiver<()>,
) -> Result<(), AgentError> {
    let bootstrap = Bootstrap::prepare(agent_argument, default_interface)?;

    tracing::info!(
        host = %bootstrap.args().host(),
        port = bootstrap.args().port(),
        file = %bootstrap.args().file_path(),
        "Agent configured"
    );

    let handle = metrics::install_recorder()?;
    metrics::register_build_info();

    bootstrap.start(handle, shutdown).await
}
