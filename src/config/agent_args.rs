//! Attach-argument parsing.
//!
//! The agent receives exactly one argument of the form
//! `[host:]<port>:<configuration file>`. The host may be a name, an IPv4
//! address, or a bracketed IPv6 literal. The file path swallows everything
//! after the port, colons included.

use std::io;
use std::net::{IpAddr, SocketAddr, ToSocketAddrs};
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Interface bound when the attach argument omits a host (all interfaces).
pub const DEFAULT_BIND_INTERFACE: &str = "0.0.0.0";

// ASCII-only classes; `.` stops at any line terminator, not just `\n`.
const ARGUMENT_PATTERN: &str = concat!(
    // host name, ipv4, or bracketed ipv6
    r"^(?:([A-Za-z0-9_.-]+|\[[^\n\r\x{85}\x{2028}\x{2029}]+\]):)?",
    // port
    r"([0-9]{1,5}):",
    // configuration file
    r"([^\n\r\x{85}\x{2028}\x{2029}]+)$",
);

/// Errors produced while turning the attach argument into [`AgentArgs`].
#[derive(Debug, Error)]
pub enum ArgsError {
    /// The argument does not follow `[host:]<port>:<file>`.
    #[error("Malformed arguments - {0}")]
    InvalidFormat(String),

    /// The host could not be turned into a socket address by the platform resolver.
    #[error("Failed to resolve {host}: {source}")]
    Resolve {
        host: String,
        #[source]
        source: io::Error,
    },
}

/// Parsed attach argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentArgs {
    host: String,
    port: u16,
    file_path: String,
    resolved_address: SocketAddr,
}

impl AgentArgs {
    /// Host exactly as given, or the default interface when omitted.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Path of the YAML configuration document.
    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    /// Address the HTTP endpoint binds to.
    pub fn resolved_address(&self) -> SocketAddr {
        self.resolved_address
    }
}

fn argument_regex() -> &'static Regex {
    static ARGUMENT_REGEX: OnceLock<Regex> = OnceLock::new();
    ARGUMENT_REGEX.get_or_init(|| Regex::new(ARGUMENT_PATTERN).expect("argument pattern is valid"))
}

/// Parse the attach argument.
///
/// `default_interface` is used as the host when `raw` does not name one.
/// Resolving a host name may block on the platform resolver; IP literals
/// never do.
pub fn parse_agent_args(raw: &str, default_interface: &str) -> Result<AgentArgs, ArgsError> {
    let captures = argument_regex()
        .captures(raw)
        .ok_or_else(|| ArgsError::InvalidFormat(raw.to_string()))?;

    let given_host = captures.get(1).map(|m| m.as_str()).filter(|h| !h.is_empty());
    let given_port = &captures[2];
    let file_path = captures[3].to_string();

    // At most five digits, so the only failure is a value above u16::MAX.
    let port: u16 = given_port
        .parse()
        .map_err(|_| ArgsError::InvalidFormat(raw.to_string()))?;

    let host = given_host.unwrap_or(default_interface).to_string();
    let resolved_address = resolve(&host, port)?;

    tracing::debug!(
        host = %host,
        port,
        file_path = %file_path,
        address = %resolved_address,
        "Attach argument parsed"
    );

    Ok(AgentArgs {
        host,
        port,
        file_path,
        resolved_address,
    })
}

/// Resolve `host` to the first socket address the platform reports.
fn resolve(host: &str, port: u16) -> Result<SocketAddr, ArgsError> {
    let bare = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);

    if let Ok(ip) = bare.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, port));
    }

    let resolve_error = |source| ArgsError::Resolve {
        host: host.to_string(),
        source,
    };

    (bare, port)
        .to_socket_addrs()
        .map_err(resolve_error)?
        .next()
        .ok_or_else(|| {
            resolve_error(io::Error::new(
                io::ErrorKind::NotFound,
                "no addresses returned by resolver",
            ))
        })
}
