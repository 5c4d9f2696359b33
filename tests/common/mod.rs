//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::net::SocketAddr;
use std::time::Duration;

use exporter_agent::lifecycle::{AgentError, Bootstrap, Shutdown};
use exporter_agent::observability::metrics::register_build_info;
use metrics_exporter_prometheus::PrometheusBuilder;
use tempfile::NamedTempFile;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Write `contents` to a temporary YAML file.
pub fn write_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// An agent serving on an ephemeral loopback port.
pub struct RunningAgent {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub task: JoinHandle<Result<(), AgentError>>,
    _config: NamedTempFile,
}

impl RunningAgent {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Trigger shutdown and wait for the server task to finish.
    pub async fn stop(self) -> Result<(), AgentError> {
        self.shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(5), self.task)
            .await
            .expect("server did not stop in time")
            .expect("server task panicked")
    }
}

/// Start an agent with `config_yaml`, using a recorder local to this test.
pub async fn start_agent(config_yaml: &str) -> RunningAgent {
    let config = write_config(config_yaml);
    let argument = format!("127.0.0.1:0:{}", config.path().display());
    let bootstrap = Bootstrap::prepare(&argument, "0.0.0.0").unwrap();

    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();
    metrics::with_local_recorder(&recorder, register_build_info);

    let listener = TcpListener::bind(bootstrap.args().resolved_address())
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let task = tokio::spawn(bootstrap.serve(listener, handle, server_shutdown));

    RunningAgent {
        addr,
        shutdown,
        task,
        _config: config,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}
