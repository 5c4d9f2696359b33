//! Prometheus exporter agent.
//!
//! Started with a single attach argument, `[host:]<port>:<yaml configuration file>`,
//! it loads the configuration and serves collected metrics over HTTP.
//!
//! ```text
//!   attach argument ──▶ config::agent_args ──▶ AgentArgs ─────────────┐
//!                                                │ file_path           │ resolved_address
//!                                                ▼                     ▼
//!                          config::loader ──▶ ExporterConfig ──▶ http::server ◀── scrape
//!                                                                      ▲
//!                          observability::metrics (recorder, build info)
//! ```

use std::process::ExitCode;

use clap::Parser;

use exporter_agent::config::{ArgsError, DEFAULT_BIND_INTERFACE};
use exporter_agent::lifecycle::{startup, AgentError, Shutdown};
use exporter_agent::observability::logging;

#[derive(Parser)]
#[command(name = "exporter-agent", version)]
#[command(about = "Expose application metrics in the Prometheus text format", long_about = None)]
struct Cli {
    /// `[host:]<port>:<yaml configuration file>`
    agent_argument: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "exporter-agent starting");

    let shutdown = Shutdown::new();
    let result = startup::run(
        &cli.agent_argument,
        DEFAULT_BIND_INTERFACE,
        shutdown.subscribe(),
    )
    .await;

    match result {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(AgentError::Args(e @ ArgsError::InvalidFormat(_))) => {
            eprintln!(
                "Usage: exporter-agent [host:]<port>:<yaml configuration file> {}",
                e
            );
            ExitCode::FAILURE
        }
        Err(AgentError::Config(e)) => {
            eprintln!("Configuration Exception : {}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!(error = %e, "Agent failed to start");
            ExitCode::FAILURE
        }
    }
}
