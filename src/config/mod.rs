//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! attach argument "[host:]<port>:<file>"
//!     → agent_args.rs (grammar match, port parse, address resolution)
//!     → AgentArgs { host, port, file_path, resolved_address }
//!
//! config file (YAML)
//!     → loader.rs (parse to serde_yaml::Value)
//!     → accessor.rs (coerce each section to a MapAccessor, caller-worded errors)
//!     → validation.rs (semantic checks)
//!     → ExporterConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - Every section is optional and falls back to defaults
//! - Shape errors name the document path they occurred at

pub mod accessor;
pub mod agent_args;
pub mod loader;
pub mod schema;
pub mod validation;

pub use accessor::{ConvertToMapAccessor, MapAccessor, PreconditionViolation};
pub use agent_args::{parse_agent_args, AgentArgs, ArgsError, DEFAULT_BIND_INTERFACE};
pub use loader::{load_config, ConfigError};
pub use schema::{BasicAuthConfig, ExporterConfig, HttpServerConfig};
